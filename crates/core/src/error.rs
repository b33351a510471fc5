use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TldlError {
    #[error("Service responded with HTTP {status}")]
    Status { status: u16 },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Link storage at {path} is unusable: {reason}")]
    Storage { path: PathBuf, reason: String },

    #[error("Invalid configuration for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, TldlError>;
