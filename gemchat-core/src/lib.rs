pub mod error;
pub mod session;

pub use error::{ChatError, GENERIC_ERROR_MESSAGE};
pub use session::{ChatSession, Reply};
