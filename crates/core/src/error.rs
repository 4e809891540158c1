use thiserror::Error;

/// Everything that can end a gateway request early.
///
/// `Display` carries the full diagnostic for server-side logs. What the client
/// sees comes from [`GatewayError::public_message`].
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("missing parameter: url")]
    MissingParameter,

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("parse failed: {0}")]
    Parse(String),

    #[error("template error: {0}")]
    Template(String),
}

impl GatewayError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingParameter => 400,
            Self::Fetch(_) | Self::Parse(_) | Self::Template(_) => 500,
        }
    }

    /// Body text for the HTTP response. Fetch and parse diagnostics stay out of it.
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingParameter => "URL parameter is required".to_string(),
            Self::Fetch(_) => {
                "Failed to fetch video info. Make sure the URL is correct and public.".to_string()
            }
            Self::Parse(_) => "Error parsing video info".to_string(),
            Self::Template(detail) => format!("Template error: {detail}"),
        }
    }

    /// Whether this error should be logged as a server fault.
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }
}
