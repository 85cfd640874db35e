pub mod client;
pub mod error;
pub mod wire;

pub use client::{DEFAULT_API_URL, GeminiClient, PROBE_PROMPT};
pub use error::GenerateError;
