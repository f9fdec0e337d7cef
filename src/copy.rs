//! Overwriting copy of a single file or directory tree.

use std::{fs, path::Path};

use walkdir::WalkDir;

use crate::error::{IoContext, Result};

/// Copy `src` (file or directory) to `dst`, overwriting what is there.
///
/// Directories are merged: entries already under `dst` that are absent from
/// `src` are left alone.  When `src` and `dst` disagree on kind (file vs
/// directory) the destination is removed first.  Returns the number of files
/// copied.
///
/// Dangling symlinks and special files (FIFOs, sockets, devices) are skipped
/// at every depth; see [`is_copyable`].
pub fn copy_entry(src: &Path, dst: &Path) -> Result<u64> {
    if src.is_dir() {
        copy_tree(src, dst)
    } else if !src.is_file() {
        tracing::debug!(path = %src.display(), "skipping non-regular entry");
        Ok(0)
    } else {
        if dst.is_dir() {
            fs::remove_dir_all(dst).at("remove", dst)?;
        }
        fs::copy(src, dst).at("copy", src)?;
        Ok(1)
    }
}

/// True for directories and regular files, following symlinks.
///
/// A FIFO would block `fs::copy` forever and a dangling link cannot be
/// read, so neither is copied.
pub fn is_copyable(path: &Path) -> bool {
    path.is_dir() || path.is_file()
}

fn copy_tree(src: &Path, dst: &Path) -> Result<u64> {
    if dst.exists() && !dst.is_dir() {
        fs::remove_file(dst).at("remove", dst)?;
    }
    fs::create_dir_all(dst).at("create", dst)?;

    let mut files = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from).at("walk", src)?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            if target.exists() && !target.is_dir() {
                fs::remove_file(&target).at("remove", &target)?;
            }
            fs::create_dir_all(&target).at("create", &target)?;
        } else if entry.path().is_file() {
            if target.is_dir() {
                fs::remove_dir_all(&target).at("remove", &target)?;
            }
            fs::copy(entry.path(), &target).at("copy", entry.path())?;
            files += 1;
        } else {
            // Dangling symlinks and special files.
            tracing::debug!(path = %entry.path().display(), "skipping non-regular entry");
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let dst = dir.path().join("b.txt");
        fs::write(&src, "hello").unwrap();

        assert_eq!(copy_entry(&src, &dst).unwrap(), 1);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "hello");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let dst = dir.path().join("b.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old").unwrap();

        copy_entry(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
    }

    #[test]
    fn copies_nested_tree() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("sub").join("deeper")).unwrap();
        fs::write(src.join("top.txt"), "1").unwrap();
        fs::write(src.join("sub").join("deeper").join("leaf.txt"), "2").unwrap();

        let dst = dir.path().join("dst");
        assert_eq!(copy_entry(&src, &dst).unwrap(), 2);
        assert_eq!(fs::read_to_string(dst.join("top.txt")).unwrap(), "1");
        assert_eq!(
            fs::read_to_string(dst.join("sub").join("deeper").join("leaf.txt")).unwrap(),
            "2"
        );
    }

    #[test]
    fn directory_copy_merges_into_existing() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("shared.txt"), "from src").unwrap();
        fs::write(dst.join("shared.txt"), "stale").unwrap();
        fs::write(dst.join("only_dst.txt"), "keep me").unwrap();

        copy_entry(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(dst.join("shared.txt")).unwrap(), "from src");
        assert_eq!(fs::read_to_string(dst.join("only_dst.txt")).unwrap(), "keep me");
    }

    #[test]
    fn file_replaces_directory_of_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("thing");
        fs::write(&src, "file now").unwrap();
        let dst = dir.path().join("out");
        fs::create_dir_all(dst.join("inner")).unwrap();

        copy_entry(&src, &dst).unwrap();
        assert!(dst.is_file());
    }

    #[test]
    fn missing_source_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("dst");
        assert_eq!(copy_entry(&dir.path().join("nope"), &dst).unwrap(), 0);
        assert!(!dst.exists());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_skipped_at_top_level_and_nested() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let top = dir.path().join("dangling");
        symlink("/nonexistent/target", &top).unwrap();
        assert!(!is_copyable(&top));
        assert_eq!(copy_entry(&top, &dir.path().join("dst_link")).unwrap(), 0);

        let src = dir.path().join("tree");
        fs::create_dir(&src).unwrap();
        symlink("/nonexistent/target", src.join("dangling")).unwrap();
        fs::write(src.join("real.txt"), "x").unwrap();
        let dst = dir.path().join("tree_copy");
        assert_eq!(copy_entry(&src, &dst).unwrap(), 1);
        assert!(dst.join("real.txt").is_file());
    }
}
