use std::fmt;

use thiserror::Error;

use crate::vfs::Location;

/// Result type for memfm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the virtual file manager
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{operation} is not expected to be used in this context")]
    UnsupportedOperation { operation: &'static str },

    #[error("{operation} requests against location {location} are not supported")]
    UnsupportedLocation {
        location: Location,
        operation: &'static str,
    },

    #[error("Not a class file handle: {name}")]
    NotAClassFile { name: String },

    #[error("Archive error in {url}: {message}")]
    Archive { url: String, message: String },

    #[error("Failed to release {} archive(s): {}", .failures.len(), ReleaseSummary(.failures))]
    Release { failures: Vec<ReleaseFailure> },

    #[error("File manager is closed")]
    Closed,
}

impl Error {
    /// Create an unsupported operation error
    pub fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedOperation { operation }
    }

    /// Create an unsupported location error
    pub fn unsupported_location(location: Location, operation: &'static str) -> Self {
        Self::UnsupportedLocation {
            location,
            operation,
        }
    }

    /// Create an archive error
    pub fn archive_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Archive {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// One archive that could not be released during shutdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseFailure {
    pub url: String,
    pub message: String,
}

impl ReleaseFailure {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ReleaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.url, self.message)
    }
}

struct ReleaseSummary<'a>(&'a [ReleaseFailure]);

impl fmt::Display for ReleaseSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, failure) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}
