use thiserror::Error;

#[derive(Error, Debug)]
pub enum McpError {
    #[error("Transport I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}
