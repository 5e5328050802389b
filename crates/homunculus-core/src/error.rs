//! Error types for Homunculus

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("persist failed: {} - {message}", path.display())]
    Persist { path: PathBuf, message: String },

    #[error("cannot read state {}: {message}", path.display())]
    StateRead { path: PathBuf, message: String },

    #[error("state schema v{found} is newer than supported v{supported}")]
    SchemaTooNew { found: u64, supported: u32 },

    #[error("unknown persona: {0}")]
    UnknownPersona(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn persist(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Persist {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn state_read(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::StateRead {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }
}
