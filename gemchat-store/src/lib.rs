pub mod impls;
pub mod model;

pub use impls::history::{ConversationHistory, GREETING};
pub use impls::rate_limit::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW, RateLimiter};
pub use model::message::{Message, Role};
