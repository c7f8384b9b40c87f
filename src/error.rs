//! Errors.

use std::path::PathBuf;

/// Errors surfaced by fallible operations of the runtime.
///
/// Most runtime conditions (dead animation targets, failed decodes observed by a texture node,
/// out-of-range navigation) are absorbed and logged instead; see the individual modules.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("graphics context rejected the image for {path:?}")]
    Upload { path: String },

    #[error("failed to enumerate images in {dir:?}: {reason}")]
    Enumerate { dir: PathBuf, reason: String },
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
