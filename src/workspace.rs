//! The working directory being backed up, and the paths derived from it.

use std::path::{Path, PathBuf};

use crate::config::BackupConfig;

/// File inside the backup root that holds the metadata record.
pub const META_FILE: &str = "__init__";

/// A working directory plus the names of its backup root and ignore file.
///
/// Every operation takes a `&Workspace` instead of reading the process cwd,
/// so tests can point it at a temporary directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    backup_dir: String,
    ignore_file: String,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, cfg: &BackupConfig) -> Self {
        Self {
            root: root.into(),
            backup_dir: cfg.dir.clone(),
            ignore_file: cfg.ignore_file.clone(),
        }
    }

    /// The directory whose contents are snapshotted and restored into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/.backup`
    pub fn backup_root(&self) -> PathBuf {
        self.root.join(&self.backup_dir)
    }

    /// `<root>/.backup/__init__`
    pub fn meta_path(&self) -> PathBuf {
        self.backup_root().join(META_FILE)
    }

    /// `<root>/.backupignore`
    pub fn ignore_path(&self) -> PathBuf {
        self.root.join(&self.ignore_file)
    }

    pub fn backup_dir_name(&self) -> &str {
        &self.backup_dir
    }

    pub fn ignore_file_name(&self) -> &str {
        &self.ignore_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_hang_off_root() {
        let ws = Workspace::new("/work/project", &BackupConfig::default());
        assert_eq!(ws.backup_root(), Path::new("/work/project/.backup"));
        assert_eq!(ws.meta_path(), Path::new("/work/project/.backup/__init__"));
        assert_eq!(ws.ignore_path(), Path::new("/work/project/.backupignore"));
    }

    #[test]
    fn names_follow_config() {
        let cfg = BackupConfig {
            dir: ".snapshots".into(),
            ignore_file: ".noback".into(),
        };
        let ws = Workspace::new("/w", &cfg);
        assert_eq!(ws.backup_dir_name(), ".snapshots");
        assert_eq!(ws.ignore_file_name(), ".noback");
        assert_eq!(ws.backup_root(), Path::new("/w/.snapshots"));
    }
}
