// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    /// An adapter load operation failed. The message is whatever the host's
    /// loader reported; the window treats the edge as exhausted either way.
    Load(String),
    /// The host violated the component contract (e.g. synced a focus value
    /// while the viewer is closed). These indicate programming errors.
    Contract(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Load(e) => write!(f, "Load Error: {}", e),
            Error::Contract(e) => write!(f, "Contract Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Load(message)
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Load(message.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
