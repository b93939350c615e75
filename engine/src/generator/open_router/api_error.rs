use thiserror::Error;

/// Errors returned by the OpenRouter API
#[derive(Debug, Clone, Error)]
pub enum OpenRouterApiError {
    #[error("Invalid request (400): {message}")]
    InvalidRequest { message: String },

    #[error("Authentication error (401): {message}")]
    Authentication { message: String },

    #[error("Insufficient credits (402): {message}")]
    InsufficientCredits { message: String },

    #[error("Flagged by moderation (403): {message}")]
    Moderation { message: String },

    #[error("Request timed out (408): {message}")]
    Timeout { message: String },

    #[error("Rate limit exceeded (429): {message}")]
    RateLimit { message: String },

    #[error("Model is down (502): {message}")]
    ModelDown { message: String },

    #[error("No available provider (503): {message}")]
    NoProvider { message: String },

    /// Catch-all for unexpected status codes
    #[error("Unexpected API error ({status}): {message}")]
    Unexpected { status: u16, message: String },
}

impl OpenRouterApiError {
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();

        match status {
            400 => Self::InvalidRequest { message },
            401 => Self::Authentication { message },
            402 => Self::InsufficientCredits { message },
            403 => Self::Moderation { message },
            408 => Self::Timeout { message },
            429 => Self::RateLimit { message },
            502 => Self::ModelDown { message },
            503 => Self::NoProvider { message },
            other => Self::Unexpected {
                status: other,
                message,
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(
            OpenRouterApiError::from_status(401, "bad key"),
            OpenRouterApiError::Authentication { .. }
        ));
        assert!(matches!(
            OpenRouterApiError::from_status(429, "slow down"),
            OpenRouterApiError::RateLimit { .. }
        ));
        assert!(matches!(
            OpenRouterApiError::from_status(418, "teapot"),
            OpenRouterApiError::Unexpected { status: 418, .. }
        ));
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = OpenRouterApiError::from_status(503, "no provider for model");
        assert_eq!(
            err.to_string(),
            "No available provider (503): no provider for model"
        );
    }
}
