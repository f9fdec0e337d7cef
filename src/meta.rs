//! The metadata record at `.backup/__init__`.
//!
//! A flat `key: value` text file written once by `backup init`:
//!
//! ```text
//! init: True
//! author: alice
//! folder: /home/alice/project
//! timestamp: 2024-05-01_09-30-00
//! ```
//!
//! A working directory counts as initialized when some line of this file
//! contains `init: True`.  No other validation is done.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::{
    error::{IoContext, Result},
    snapshot::TIMESTAMP_FORMAT,
    workspace::Workspace,
};

/// The initialization marker line.
pub const INIT_MARKER: &str = "init: True";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub author: String,
    pub folder: PathBuf,
    pub timestamp: String,
}

impl Metadata {
    pub fn new(author: impl Into<String>, folder: impl Into<PathBuf>, at: NaiveDateTime) -> Self {
        Self {
            author: author.into(),
            folder: folder.into(),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "{INIT_MARKER}\nauthor: {}\nfolder: {}\ntimestamp: {}\n",
            self.author,
            self.folder.display(),
            self.timestamp
        )
    }

    /// Parse the `key: value` lines written by [`Metadata::render`].
    ///
    /// Returns `None` unless `author`, `folder` and `timestamp` are all present.
    pub fn parse(text: &str) -> Option<Self> {
        let mut author = None;
        let mut folder = None;
        let mut timestamp = None;
        for line in text.lines() {
            let Some((key, value)) = line.split_once(": ") else {
                continue;
            };
            match key.trim() {
                "author" => author = Some(value.to_string()),
                "folder" => folder = Some(PathBuf::from(value)),
                "timestamp" => timestamp = Some(value.to_string()),
                _ => {},
            }
        }
        Some(Self {
            author: author?,
            folder: folder?,
            timestamp: timestamp?,
        })
    }
}

/// Resolve the current username from `$USER`, `$USERNAME`, or `$LOGNAME`.
pub fn current_user() -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|k| std::env::var(k).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".into())
}

/// Create the backup root and (over)write the metadata record.
///
/// Re-running `init` replaces the previous author and timestamp.
pub fn init(ws: &Workspace, author: &str, at: NaiveDateTime) -> Result<Metadata> {
    let backup_root = ws.backup_root();
    std::fs::create_dir_all(&backup_root).at("create", &backup_root)?;

    let folder = absolute(ws.root());
    let meta = Metadata::new(author, folder, at);
    let path = ws.meta_path();
    std::fs::write(&path, meta.render()).at("write", &path)?;
    tracing::debug!(path = %path.display(), "wrote metadata");
    Ok(meta)
}

/// True iff the metadata file exists and carries the `init: True` marker.
pub fn is_initialized(ws: &Workspace) -> bool {
    std::fs::read_to_string(ws.meta_path())
        .map(|text| text.lines().any(|l| l.contains(INIT_MARKER)))
        .unwrap_or(false)
}

/// Raw metadata text, or `None` when no metadata file exists.
pub fn read_raw(ws: &Workspace) -> Result<Option<String>> {
    let path = ws.meta_path();
    if !path.is_file() {
        return Ok(None);
    }
    std::fs::read_to_string(&path).at("read", &path).map(Some)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
