//! Domain error type shared by every backup operation.
//!
//! Command handlers turn these into a failed [`crate::ui::Outcome`]; only
//! setup failures in `main` travel as `anyhow::Error`.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias for backup operations.
pub type Result<T> = std::result::Result<T, BackupError>;

#[derive(Debug, Error)]
pub enum BackupError {
    /// The metadata file is missing or lacks the `init: True` marker.
    #[error("backup system not initialized. Run `backup init` first")]
    NotInitialized,

    /// A restore was requested but the backup root holds no snapshots.
    #[error("no backups found")]
    NoSnapshots,

    /// `pull --specific <index>` pointed past the end of the snapshot list.
    #[error("backup index {index} out of range ({count} available)")]
    IndexOutOfRange { index: usize, count: usize },

    /// A filesystem call failed.
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },
}

/// Attach the failing action and path to an [`io::Result`].
pub trait IoContext<T> {
    fn at(self, action: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, action: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| BackupError::Io {
            action,
            path: path.into(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_context_names_action_and_path() {
        let err = Err::<(), _>(io::Error::new(io::ErrorKind::NotFound, "gone"))
            .at("read", "/tmp/x")
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to read /tmp/x: gone");
    }

    #[test]
    fn out_of_range_mentions_count() {
        let err = BackupError::IndexOutOfRange { index: 4, count: 2 };
        insta::assert_snapshot!(err.to_string(), @"backup index 4 out of range (2 available)");
    }
}
