//! Error types for sfmx

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Input is not valid {encoding}")]
    Decode { encoding: &'static str },

    #[error("Text cannot be represented in {encoding}")]
    Encode { encoding: &'static str },

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    /// True if the error comes from a missing input or output file
    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::NotFound)
    }

    /// True if the error comes from insufficient file permissions
    pub fn is_permission_denied(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::PermissionDenied)
    }

    fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Read { source, .. } | Error::Write { source, .. } | Error::Io(source) => {
                Some(source.kind())
            }
            _ => None,
        }
    }
}
