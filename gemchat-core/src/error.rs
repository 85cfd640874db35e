use gemchat_llm::GenerateError;
use thiserror::Error;

/// The only failure text that reaches the user.
pub const GENERIC_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Rate limit exceeded. Please wait a moment before sending another message.")]
    RateLimitExceeded,
    #[error("API request failed: {status} {status_text}")]
    RequestFailed { status: u16, status_text: String },
    #[error("malformed response from generation endpoint")]
    MalformedResponse,
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<GenerateError> for ChatError {
    fn from(error: GenerateError) -> Self {
        match error {
            GenerateError::RequestFailed {
                status,
                status_text,
            } => Self::RequestFailed {
                status,
                status_text,
            },
            GenerateError::MalformedResponse => Self::MalformedResponse,
            GenerateError::Transport(source) => Self::Transport(source.to_string()),
        }
    }
}
