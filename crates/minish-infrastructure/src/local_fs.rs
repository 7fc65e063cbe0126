//! `std::fs`-backed filesystem collaborator.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use minish_core::error::{Result, ShellError};
use minish_core::fs::{EntryStat, FileSystem};
use walkdir::WalkDir;

/// The real local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    fn copy_tree(&self, src: &Path, dst: &Path) -> Result<()> {
        for entry in WalkDir::new(src).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                ShellError::io(format!("Failed to walk {}: {}", src.display(), e))
            })?;
            let relative = entry
                .path()
                .strip_prefix(src)
                .map_err(|e| ShellError::io(e.to_string()))?;
            let target = dst.join(relative);
            let file_type = entry.file_type();

            if file_type.is_dir() {
                fs::create_dir_all(&target)?;
            } else if file_type.is_symlink() {
                copy_symlink(entry.path(), &target)?;
            } else {
                fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    /// Second half of a move that cannot be a rename.
    ///
    /// A symlink is recreated as a link, never followed.
    fn move_by_copy(&self, src: &Path, dst: &Path) -> Result<()> {
        if self.exists(dst) {
            return Err(ShellError::already_exists(format!(
                "destination '{}' exists",
                dst.display()
            )));
        }

        if self.is_symlink(src) {
            copy_symlink(src, dst)?;
            fs::remove_file(src)?;
            return Ok(());
        }

        self.copy(src, dst, true)?;
        self.remove_tree(src)
    }
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let link = fs::read_link(src)?;
    std::os::unix::fs::symlink(link, dst)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)?;
    Ok(())
}

/// Renders a permission string in the `ls -l` layout.
#[cfg(unix)]
fn mode_string(metadata: &fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = metadata.permissions().mode();
    let file_type = metadata.file_type();
    let kind = if file_type.is_dir() {
        'd'
    } else if file_type.is_symlink() {
        'l'
    } else {
        '-'
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(not(unix))]
fn mode_string(metadata: &fs::Metadata) -> String {
    let kind = if metadata.is_dir() { 'd' } else { '-' };
    let write = if metadata.permissions().readonly() { '-' } else { 'w' };
    format!("{kind}r{write}-r{write}-r{write}-")
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|metadata| metadata.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        Ok(fs::canonicalize(path)?)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(entries)
    }

    fn metadata(&self, path: &Path) -> Result<EntryStat> {
        let metadata = fs::symlink_metadata(path)?;
        Ok(EntryStat {
            size: metadata.len(),
            modified: metadata.modified()?,
            mode: mode_string(&metadata),
        })
    }

    fn copy(&self, src: &Path, dst: &Path, recursive: bool) -> Result<()> {
        if self.exists(dst) {
            return Err(ShellError::already_exists(format!(
                "destination '{}' exists",
                dst.display()
            )));
        }

        if src.is_dir() {
            if !recursive {
                return Err(ShellError::is_directory(format!(
                    "'{}' is a directory",
                    src.display()
                )));
            }
            self.copy_tree(src, dst)
        } else {
            fs::copy(src, dst)?;
            Ok(())
        }
    }

    fn move_path(&self, src: &Path, dst: &Path) -> Result<()> {
        match fs::rename(src, dst) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::CrossesDevices => {
                tracing::debug!(
                    "Rename crosses devices, copying {} to {}",
                    src.display(),
                    dst.display()
                );
                self.move_by_copy(src, dst)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn remove_tree(&self, path: &Path) -> Result<()> {
        let metadata = fs::symlink_metadata(path)?;
        if metadata.is_dir() {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let files = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_dir_sorted() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.txt", "a.txt", "c"] {
            fs::write(temp_dir.path().join(name), "").unwrap();
        }

        let names: Vec<String> = LocalFileSystem
            .list_dir(temp_dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c"]);
    }

    #[test]
    fn test_copy_tree() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested/file.txt"), "payload").unwrap();

        let dst = temp_dir.path().join("dst");
        LocalFileSystem.copy(&src, &dst, true).unwrap();

        assert_eq!(
            fs::read_to_string(dst.join("nested/file.txt")).unwrap(),
            "payload"
        );
        assert!(src.join("nested/file.txt").exists());
    }

    #[test]
    fn test_copy_directory_without_recursive_fails() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir(&src).unwrap();

        let err = LocalFileSystem
            .copy(&src, &temp_dir.path().join("dst"), false)
            .unwrap_err();
        assert!(err.is_is_directory());
        assert!(!temp_dir.path().join("dst").exists());
    }

    #[test]
    fn test_move_and_remove_tree() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("dir");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("f"), "x").unwrap();

        let dst = temp_dir.path().join("moved");
        LocalFileSystem.move_path(&src, &dst).unwrap();
        assert!(!src.exists());
        assert!(dst.join("f").exists());

        LocalFileSystem.remove_tree(&dst).unwrap();
        assert!(!dst.exists());
    }

    #[test]
    fn test_walk_files_only_returns_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("a/b")).unwrap();
        fs::write(temp_dir.path().join("a/b/deep.txt"), "").unwrap();
        fs::write(temp_dir.path().join("top.txt"), "").unwrap();

        let files = LocalFileSystem.walk_files(temp_dir.path()).unwrap();
        assert_eq!(
            files,
            vec![
                temp_dir.path().join("a/b/deep.txt"),
                temp_dir.path().join("top.txt"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_move_by_copy_keeps_symlink_to_directory() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("big.bin"), "payload").unwrap();
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let moved = temp_dir.path().join("moved");
        LocalFileSystem.move_by_copy(&link, &moved).unwrap();

        assert!(LocalFileSystem.is_symlink(&moved));
        assert_eq!(fs::read_link(&moved).unwrap(), target);
        assert!(!LocalFileSystem.exists(&link));
        assert!(target.join("big.bin").exists());
    }

    #[test]
    fn test_move_by_copy_moves_tree() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("dir");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("f"), "x").unwrap();

        let dst = temp_dir.path().join("elsewhere");
        LocalFileSystem.move_by_copy(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dst.join("f")).unwrap(), "x");
    }

    #[cfg(unix)]
    #[test]
    fn test_is_symlink_sees_dangling_link() {
        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join("dangling");
        std::os::unix::fs::symlink(temp_dir.path().join("nowhere"), &link).unwrap();

        assert!(LocalFileSystem.is_symlink(&link));
        assert!(LocalFileSystem.exists(&link));
        assert!(!LocalFileSystem.is_symlink(temp_dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_mode_string() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("script.sh");
        fs::write(&path, "#!/bin/sh").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o754)).unwrap();

        let stat = LocalFileSystem.metadata(&path).unwrap();
        assert_eq!(stat.mode, "-rwxr-xr--");
        assert_eq!(stat.size, 9);

        let stat = LocalFileSystem.metadata(temp_dir.path()).unwrap();
        assert!(stat.mode.starts_with('d'));
    }
}
