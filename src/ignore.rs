//! `.backupignore` parsing.
//!
//! One literal name per line.  Blank lines and lines starting with `#` are
//! skipped.  A line naming an existing directory contributes the names of its
//! immediate children rather than its own name, so the directory itself is
//! still copied as an empty container unless listed separately through some
//! other rule.  No globbing.

use std::{collections::BTreeSet, path::Path};

use crate::{
    error::{IoContext, Result},
    workspace::Workspace,
};

/// Set of top-level entry names excluded from snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    names: BTreeSet<String>,
}

impl IgnoreSet {
    /// Load the workspace's ignore file.  A missing file yields an empty set.
    pub fn load(ws: &Workspace) -> Result<Self> {
        let path = ws.ignore_path();
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).at("read", &path)?;
        Self::parse(&text, ws.root())
    }

    /// Parse ignore rules, resolving directory lines against `root`.
    pub fn parse(text: &str, root: &Path) -> Result<Self> {
        let mut names = BTreeSet::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let candidate = root.join(line);
            if candidate.is_dir() {
                for entry in std::fs::read_dir(&candidate).at("read", &candidate)? {
                    let entry = entry.at("read", &candidate)?;
                    names.insert(entry.file_name().to_string_lossy().into_owned());
                }
            } else {
                names.insert(line.to_string());
            }
        }
        Ok(Self { names })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
