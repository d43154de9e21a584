//! Crate-wide error type.
//!
//! Every traversal-level failure aborts the whole run, so there is a single
//! error enum at the top. Lower layers keep their own errors
//! ([`CodecError`](crate::imaging::CodecError),
//! [`ConfigError`](crate::config::ConfigError)) and convert into this one.

use crate::config::ConfigError;
use crate::imaging::CodecError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Root path is missing or is neither a file nor a directory.
    #[error("path is not a file or directory: '{}'", .0.display())]
    InvalidPath(PathBuf),
    #[error("filesystem error at '{}': {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{format} does not support transparency: '{}'", path.display())]
    UnsupportedFormat { path: PathBuf, format: String },
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Adapter for `map_err` that attaches the offending path to an I/O error.
    pub fn fs(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_error_names_the_path() {
        let err = Error::fs(Path::new("/photos/a.jpg"))(io::Error::from(io::ErrorKind::NotFound));
        let msg = err.to_string();
        assert!(msg.contains("/photos/a.jpg"), "got: {msg}");
    }

    #[test]
    fn invalid_path_message() {
        let err = Error::InvalidPath(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "path is not a file or directory: '/nope'");
    }
}
