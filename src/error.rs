// Error types for the stockroom data layer.
// Covers API transport errors, cache persistence errors, and fetch exhaustion.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockroomError {
    #[error("API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Backend rejected request: {0}")]
    Rejected(String),

    #[error("Fetch failed after {attempts} attempts: {message}")]
    FetchFailed { attempts: u32, message: String },

    #[error("Missing STOCKROOM_TOKEN environment variable")]
    MissingToken,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, StockroomError>;
