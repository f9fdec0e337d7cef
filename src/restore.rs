//! Restoring a snapshot over the working directory.
//!
//! Restore is an overlay: every entry of the chosen snapshot is copied into
//! the root, replacing same-named entries, and nothing that is absent from the
//! snapshot is deleted.  A failing entry does not stop the others.

use std::path::{Path, PathBuf};

use crate::{
    copy::copy_entry,
    error::{BackupError, IoContext, Result},
    eventlog::EventLog,
    snapshot,
    workspace::Workspace,
};

/// Which snapshot to restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The newest snapshot.
    Latest,
    /// Position in the newest-first list; `0` is the newest.
    Index(usize),
}

impl Selection {
    fn index(self) -> usize {
        match self {
            Self::Latest => 0,
            Self::Index(i) => i,
        }
    }
}

#[derive(Debug, Default)]
pub struct RestoreReport {
    /// The snapshot directory restored from.
    pub source: PathBuf,
    /// Top-level names written back into the root.
    pub restored: Vec<String>,
    /// Top-level names that failed, with the error message.
    pub failed: Vec<(String, String)>,
}

/// Resolve `selection` against the current snapshot list.
pub fn pick(ws: &Workspace, selection: Selection) -> Result<PathBuf> {
    let snapshots = snapshot::list(ws)?;
    if snapshots.is_empty() {
        return Err(BackupError::NoSnapshots);
    }
    let index = selection.index();
    let count = snapshots.len();
    snapshots
        .into_iter()
        .nth(index)
        .ok_or(BackupError::IndexOutOfRange { index, count })
}

/// Copy the selected snapshot back into the working directory.
pub fn restore(ws: &Workspace, selection: Selection, log: &dyn EventLog) -> Result<RestoreReport> {
    let source = match pick(ws, selection) {
        Ok(path) => path,
        Err(e) => {
            log.error(&e.to_string());
            return Err(e);
        },
    };
    tracing::debug!(source = %source.display(), "restoring snapshot");

    let mut report = RestoreReport {
        source: source.clone(),
        ..RestoreReport::default()
    };

    let entries = std::fs::read_dir(&source).at("read", &source)?;
    let (names, unreadable) = split_entries(
        entries.map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned())),
        &source,
    );
    for err in unreadable {
        log.error(&err.to_string());
        report.failed.push((UNREADABLE_ENTRY.into(), err.to_string()));
    }

    for name in names {
        match copy_entry(&source.join(&name), &ws.root().join(&name)) {
            Ok(_) => {
                log.record(&format!("Restored: {name}"));
                report.restored.push(name);
            },
            Err(e) => {
                log.error(&e.to_string());
                report.failed.push((name, e.to_string()));
            },
        }
    }

    log.record(&format!("Restored from backup: {}", source.display()));
    Ok(report)
}

/// Placeholder name for snapshot entries that could not even be listed.
const UNREADABLE_ENTRY: &str = "<unreadable entry>";

/// Sorted entry names plus the errors hit while listing them.
fn split_entries<I>(entries: I, dir: &Path) -> (Vec<String>, Vec<BackupError>)
where
    I: IntoIterator<Item = std::io::Result<String>>,
{
    let mut names = Vec::new();
    let mut errors = Vec::new();
    for entry in entries {
        match entry.at("read", dir) {
            Ok(name) => names.push(name),
            Err(e) => errors.push(e),
        }
    }
    names.sort();
    (names, errors)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::{config::BackupConfig, eventlog::MemoryLog, meta};

    fn at(s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, s)
            .unwrap()
    }

    /// Three snapshots whose `version.txt` reads `v0`, `v1`, `v2` (oldest first).
    fn three_versions() -> (tempfile::TempDir, Workspace) {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path(), &BackupConfig::default());
        meta::init(&ws, "tester", at(0)).unwrap();
        for v in 0..3 {
            fs::write(dir.path().join("version.txt"), format!("v{v}")).unwrap();
            snapshot::create_at(&ws, at(v + 1), &MemoryLog::default()).unwrap();
        }
        (dir, ws)
    }

    fn current(dir: &tempfile::TempDir) -> String {
        fs::read_to_string(dir.path().join("version.txt")).unwrap()
    }

    #[test]
    fn latest_restores_greatest_name() {
        let (dir, ws) = three_versions();
        fs::write(dir.path().join("version.txt"), "edited").unwrap();

        let log = MemoryLog::default();
        let report = restore(&ws, Selection::Latest, &log).unwrap();

        assert_eq!(current(&dir), "v2");
        assert!(report.source.ends_with("Backup_2024-05-01_12-00-03"));
        assert_eq!(report.restored, vec!["version.txt"]);
        assert!(log.contains("Restored from backup:"));
    }

    #[test]
    fn index_counts_from_newest() {
        let (dir, ws) = three_versions();

        restore(&ws, Selection::Index(1), &MemoryLog::default()).unwrap();
        assert_eq!(current(&dir), "v1");

        restore(&ws, Selection::Index(2), &MemoryLog::default()).unwrap();
        assert_eq!(current(&dir), "v0");
    }

    #[test]
    fn index_zero_matches_latest() {
        let (_dir, ws) = three_versions();
        assert_eq!(
            pick(&ws, Selection::Index(0)).unwrap(),
            pick(&ws, Selection::Latest).unwrap()
        );
    }

    #[test]
    fn out_of_range_changes_nothing() {
        let (dir, ws) = three_versions();
        fs::write(dir.path().join("version.txt"), "edited").unwrap();

        let log = MemoryLog::default();
        let err = restore(&ws, Selection::Index(3), &log).unwrap_err();

        assert!(matches!(err, BackupError::IndexOutOfRange { index: 3, count: 3 }));
        assert_eq!(current(&dir), "edited");
        assert!(log.contains("ERROR: backup index 3 out of range"));
    }

    #[test]
    fn no_snapshots_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path(), &BackupConfig::default());
        meta::init(&ws, "tester", at(0)).unwrap();

        let err = restore(&ws, Selection::Latest, &MemoryLog::default()).unwrap_err();
        assert!(matches!(err, BackupError::NoSnapshots));
    }

    #[test]
    fn restore_keeps_entries_missing_from_snapshot() {
        let (dir, ws) = three_versions();
        fs::write(dir.path().join("new_since.txt"), "fresh").unwrap();

        restore(&ws, Selection::Latest, &MemoryLog::default()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("new_since.txt")).unwrap(),
            "fresh"
        );
    }

    #[test]
    fn listing_errors_are_kept_not_dropped() {
        let entries = vec![
            Ok("b.txt".to_string()),
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")),
            Ok("a.txt".to_string()),
        ];

        let (names, errors) = split_entries(entries, Path::new("/snap"));

        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "failed to read /snap: denied");
    }

    #[test]
    fn restores_directories_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path(), &BackupConfig::default());
        meta::init(&ws, "tester", at(0)).unwrap();
        fs::create_dir_all(dir.path().join("docs").join("img")).unwrap();
        fs::write(dir.path().join("docs").join("img").join("logo.svg"), "<svg/>").unwrap();
        snapshot::create_at(&ws, at(1), &MemoryLog::default()).unwrap();

        fs::remove_dir_all(dir.path().join("docs")).unwrap();
        restore(&ws, Selection::Latest, &MemoryLog::default()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("docs").join("img").join("logo.svg")).unwrap(),
            "<svg/>"
        );
    }
}
