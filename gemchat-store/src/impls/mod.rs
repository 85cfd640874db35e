pub mod history;
pub mod rate_limit;
