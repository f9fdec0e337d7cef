//! Snapshot creation, listing, and deletion.
//!
//! # Layout
//!
//! ```text
//! <root>/.backup/
//!   __init__                       # metadata record
//!   Backup_2024-05-01_09-30-00/    # one directory per snapshot
//!   Backup_2024-05-01_10-00-00/
//! ```
//!
//! Snapshot names carry a fixed-width, zero-padded local timestamp, so sorting
//! names lexicographically sorts snapshots chronologically.  Resolution is one
//! second: two snapshots taken within the same second share a directory and
//! the later copy overwrites the earlier one.
//!
//! The snapshot directory is visible as soon as it is created.  Nothing is
//! rolled back when a copy fails halfway.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::{
    copy::{copy_entry, is_copyable},
    error::{IoContext, Result},
    eventlog::EventLog,
    ignore::IgnoreSet,
    workspace::Workspace,
};

/// `strftime` format shared by snapshot names and the metadata timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Prefix of every snapshot directory name.
pub const SNAPSHOT_PREFIX: &str = "Backup_";

/// `Backup_<YYYY-MM-DD_HH-MM-SS>`
pub fn snapshot_name(at: NaiveDateTime) -> String {
    format!("{SNAPSHOT_PREFIX}{}", at.format(TIMESTAMP_FORMAT))
}

/// What one snapshot run did.
#[derive(Debug, Default)]
pub struct SnapshotReport {
    /// The snapshot directory.
    pub path: PathBuf,
    /// Top-level names copied into the snapshot.
    pub copied: Vec<String>,
    /// Top-level names left out: ignored, or dangling links and special files.
    pub skipped: Vec<String>,
    /// Regular files written, counting those inside copied directories.
    pub files: u64,
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// Snapshot the workspace into `Backup_<now>`.
pub fn create(ws: &Workspace, log: &dyn EventLog) -> Result<SnapshotReport> {
    create_at(ws, Local::now().naive_local(), log)
}

/// Snapshot the workspace into the directory named for `at`.
///
/// Logs every copy and skip.  The first filesystem error aborts the run; it is
/// logged and returned.
pub fn create_at(ws: &Workspace, at: NaiveDateTime, log: &dyn EventLog) -> Result<SnapshotReport> {
    let result = populate(ws, at, log);
    match &result {
        Ok(report) => log.record(&format!("Backup saved to: {}", report.path.display())),
        Err(e) => log.error(&e.to_string()),
    }
    result
}

fn populate(ws: &Workspace, at: NaiveDateTime, log: &dyn EventLog) -> Result<SnapshotReport> {
    let ignore = IgnoreSet::load(ws)?;
    let dest = ws.backup_root().join(snapshot_name(at));
    std::fs::create_dir_all(&dest).at("create", &dest)?;
    tracing::debug!(dest = %dest.display(), ignored = ignore.len(), "creating snapshot");

    let mut report = SnapshotReport {
        path: dest.clone(),
        ..SnapshotReport::default()
    };

    for name in sorted_entry_names(ws.root())? {
        if name == ws.backup_dir_name() {
            continue;
        }
        if name != ws.ignore_file_name() && ignore.contains(&name) {
            log.record(&format!("Skipped (ignored): {name}"));
            report.skipped.push(name);
            continue;
        }

        let src = ws.root().join(&name);
        if !is_copyable(&src) {
            log.record(&format!("Skipped (not a regular file): {name}"));
            report.skipped.push(name);
            continue;
        }

        report.files += copy_entry(&src, &dest.join(&name))?;
        log.record(&format!("Copied: {name}"));
        report.copied.push(name);
    }

    Ok(report)
}

/// Names of the immediate entries of `dir`, sorted for stable output.
fn sorted_entry_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).at("read", dir)? {
        let entry = entry.at("read", dir)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// Snapshot directories under the backup root, newest first.
///
/// Every immediate subdirectory counts.  A missing backup root yields an
/// empty list.
pub fn list(ws: &Workspace) -> Result<Vec<PathBuf>> {
    let root = ws.backup_root();
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(&root).at("read", &root)? {
        let entry = entry.at("read", &root)?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    Ok(dirs)
}

// ─── Remove ───────────────────────────────────────────────────────────────────

/// Delete the whole backup root, metadata included.
///
/// Returns `false` when there was nothing to delete.
pub fn remove_all(ws: &Workspace, log: &dyn EventLog) -> Result<bool> {
    let root = ws.backup_root();
    if !root.exists() {
        return Ok(false);
    }
    if let Err(e) = std::fs::remove_dir_all(&root).at("remove", &root) {
        log.error(&e.to_string());
        return Err(e);
    }
    log.record(&format!("Removed all backups in {}", root.display()));
    Ok(true)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
