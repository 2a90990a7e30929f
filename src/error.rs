//! Error taxonomy for course assembly.
//!
//! Every fatal condition in the pipeline ends up as one [`CourseError`]. The
//! only recoverable condition, an unrecognized content declaration, never
//! becomes an error: it is logged and the entry is dropped.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourseError {
    /// `group.yaml` is missing or not well-formed.
    #[error("manifest error in {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },

    /// A video URL points at a host we cannot embed.
    #[error("unsupported video source in group {group}: {url}")]
    UnsupportedContent { group: String, url: String },

    /// An author entry lacks a field the intro page needs.
    #[error("author #{index} of group {group} is missing '{field}'")]
    Author {
        group: String,
        index: usize,
        field: &'static str,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, CourseError>;

impl CourseError {
    pub fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a `std::io::Error` with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Attach a path to the error side of an I/O result.
pub(crate) trait IoContext<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| CourseError::io(path, e))
    }
}
