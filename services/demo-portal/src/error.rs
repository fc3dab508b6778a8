//! Error types for the demo portal

/// Errors that can occur while talking to the backend or serving the page
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network failure: {0}")]
    Network(String),

    #[error("Decode failure: {0}")]
    Decode(String),

    #[error("Backend rejected request with HTTP {status}")]
    Application { status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for demo portal operations
pub type Result<T> = std::result::Result<T, PortalError>;
