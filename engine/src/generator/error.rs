use thiserror::Error;

/// Failure taxonomy of a generation request. `Clone` because results travel
/// through UI messages.
#[derive(Debug, Clone, Error)]
pub enum GenerateError {
    /// The service answered but signaled failure, or left out the image
    /// location. The message is whatever the service provided.
    #[error("{}", message.as_deref().unwrap_or("the service reported a failure"))]
    Service { message: Option<String> },

    /// The request never completed, or the response was unreadable
    #[error("transport error: {0}")]
    Transport(String),
}

impl GenerateError {
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: Some(message.into()),
        }
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
