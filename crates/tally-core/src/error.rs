//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Xero answered with a non-success status. `message` is already
    /// phrased for the end user.
    #[error("{message}")]
    Xero { status: u16, message: String },
}

impl Error {
    /// HTTP status reported by Xero, if this error came from an API response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Xero { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
