//! Append-only event log.
//!
//! Operations report what they did (`Copied: a.txt`, `ERROR: …`) through the
//! [`EventLog`] trait.  The binary wires in a [`FileLog`] that appends
//! timestamped lines to `<log dir>/.backup-logs`; tests use an in-memory log
//! so they can assert on the recorded events.
//!
//! Logging is best-effort.  A log line that cannot be written is dropped and
//! only traced at debug level.

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Local;

/// Name of the log file inside the log directory.
pub const LOG_FILE: &str = ".backup-logs";

/// Sink for user-visible backup events.
pub trait EventLog: Send + Sync {
    fn record(&self, message: &str);

    /// Record an `ERROR: <message>` line.
    fn error(&self, message: &str) {
        self.record(&format!("ERROR: {message}"));
    }
}

/// `dirs::data_local_dir()/backup`, e.g. `~/.local/share/backup` on Linux.
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("backup"))
}

/// Where the event log lives: the configured directory, else the platform
/// data directory, else a `backup` directory under the system temp dir.
///
/// Never the working directory, so the log cannot end up inside snapshots.
pub fn resolve_log_dir(configured: Option<PathBuf>, platform: Option<PathBuf>) -> PathBuf {
    configured
        .or(platform)
        .unwrap_or_else(|| std::env::temp_dir().join("backup"))
}

// ─── File log ─────────────────────────────────────────────────────────────────

/// Appends `[YYYY-MM-DD HH:MM:SS] <message>` lines to a file.
#[derive(Debug, Clone)]
pub struct FileLog {
    path: PathBuf,
}

impl FileLog {
    /// Log to `<dir>/.backup-logs`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(LOG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

impl EventLog for FileLog {
    fn record(&self, message: &str) {
        let line = format!("[{}] {message}", Local::now().format("%Y-%m-%d %H:%M:%S"));
        if let Err(e) = self.append(&line) {
            tracing::debug!(path = %self.path.display(), error = %e, "dropping log line");
        }
    }
}

// ─── In-memory log ────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MemoryLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| l.contains(needle))
    }
}

#[cfg(test)]
impl EventLog for MemoryLog {
    fn record(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_log_creates_parent_dirs_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileLog::in_dir(&dir.path().join("nested").join("logs"));

        log.record("Ran: do");
        log.error("disk full");

        let text = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] Ran: do"));
        assert!(lines[1].ends_with("] ERROR: disk full"));
    }

    #[test]
    fn log_dir_prefers_config_then_platform_then_temp() {
        let configured = PathBuf::from("/etc/backup-logs");
        let platform = PathBuf::from("/home/me/.local/share/backup");

        assert_eq!(
            resolve_log_dir(Some(configured.clone()), Some(platform.clone())),
            configured
        );
        assert_eq!(resolve_log_dir(None, Some(platform.clone())), platform);

        let fallback = resolve_log_dir(None, None);
        assert!(fallback.starts_with(std::env::temp_dir()));
        assert_ne!(fallback, PathBuf::from("."));
    }

    #[test]
    fn file_log_swallows_write_failures() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the log directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let log = FileLog::in_dir(&blocker);
        log.record("this line goes nowhere");
        assert!(!log.path().exists());
    }

    #[test]
    fn memory_log_keeps_order() {
        let log = MemoryLog::default();
        log.record("one");
        log.error("two");
        assert_eq!(log.lines(), vec!["one", "ERROR: two"]);
        assert!(log.contains("two"));
    }
}
