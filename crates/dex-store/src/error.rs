//! Error types for the dex-store crate.

use camino::Utf8PathBuf;

/// Errors from a [`KeyValueStore`](crate::KeyValueStore) backend.
///
/// Stores above the backend never surface these to their callers: a failed
/// read yields empty state and a failed write is logged.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        /// Backing file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object of strings.
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        /// Backing file.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// No platform data directory could be determined.
    #[error("no data directory available on this platform")]
    NoDataDir,

    /// The platform data directory is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

impl StorageError {
    /// Creates a new [`StorageError::Io`] error.
    #[inline]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`StorageError::Corrupt`] error.
    #[inline]
    pub fn corrupt(path: impl Into<Utf8PathBuf>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_display() {
        let err = StorageError::io(
            "/tmp/favorites.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/favorites.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_corrupt_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StorageError::corrupt("/tmp/favorites.json", source);
        assert!(err.to_string().starts_with("storage file /tmp/favorites.json is corrupt"));
    }
}
