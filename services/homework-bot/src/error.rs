//! Error types for the homework bot

/// Errors that can occur while polling and notifying
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required environment variables: {0}")]
    MissingCredentials(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API request failed: {0}")]
    ApiConnect(String),

    #[error("API response could not be decoded: {0}")]
    ApiResponse(String),

    #[error("Unexpected type: {0}")]
    UnexpectedType(String),

    #[error("Missing key '{0}' in API response")]
    MissingKey(String),

    #[error("Unknown homework status '{0}'")]
    UnknownStatus(String),

    #[error("Message delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, BotError>;
