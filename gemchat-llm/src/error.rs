use thiserror::Error;

/// Failures talking to the generation endpoint.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("API request failed: {status} {status_text}")]
    RequestFailed { status: u16, status_text: String },
    #[error("response did not contain candidates[0].content.parts[0].text")]
    MalformedResponse,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
