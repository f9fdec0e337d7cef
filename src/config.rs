//! Configuration types and loading logic.
//!
//! The config file is entirely optional: every field has a default, so
//! running `backup` without one keeps snapshots in `./.backup`, reads ignore
//! rules from `./.backupignore`, and logs under the platform data directory.
//!
//! # File format
//!
//! ```toml
//! [backup]
//! dir         = ".backup"        # backup root, relative to the working directory
//! ignore_file = ".backupignore"
//!
//! [log]
//! dir = "/home/alice/.local/share/backup"   # optional
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ─── Top-level ────────────────────────────────────────────────────────────────

/// Root configuration object, deserialised from `config.toml`.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// Where snapshots live and which file holds the ignore rules.
    #[serde(default)]
    pub backup: BackupConfig,

    /// Location of the append-only event log.
    #[serde(default)]
    pub log: LogConfig,
}

// ─── [backup] ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct BackupConfig {
    /// Name of the backup root inside the working directory.
    ///
    /// This entry is never copied into a snapshot.
    #[serde(default = "default_backup_dir")]
    pub dir: String,

    /// Name of the ignore-rules file inside the working directory.
    ///
    /// The file itself is always included in every snapshot.
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            dir: default_backup_dir(),
            ignore_file: default_ignore_file(),
        }
    }
}

// ─── [log] ────────────────────────────────────────────────────────────────────

/// Event log settings.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct LogConfig {
    /// Directory holding `.backup-logs`.  Defaults to
    /// `dirs::data_local_dir()/backup` when omitted.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

// ─── Defaults ─────────────────────────────────────────────────────────────────

// serde needs free functions for per-field defaults.

pub fn default_backup_dir() -> String {
    ".backup".into()
}

pub fn default_ignore_file() -> String {
    ".backupignore".into()
}

/// `~/.config/backup/config.toml` (or the platform equivalent).
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|d| d.join("backup").join("config.toml"))
}

// ─── Loader ───────────────────────────────────────────────────────────────────

/// Read and parse a `Config` from `path`.
///
/// A missing file yields the defaults.  A file that exists but cannot be read
/// or is not valid TOML is an error.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::default());
    }

    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
