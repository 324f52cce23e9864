//! File operations - create, rename, delete, paste, move, open
//!
//! Every function here is a synchronous call against the OS filesystem.
//! Callers are expected to show the error text to the user and move on.

use crate::{FsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Create a folder named `name` under `parent`.
pub fn create_folder(parent: &Path, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FsError::InvalidName("empty folder name".to_string()));
    }

    let path = parent.join(name);
    if path.exists() {
        return Err(FsError::AlreadyExists(path));
    }

    fs::create_dir(&path)?;
    tracing::info!("Created folder: {}", path.display());
    Ok(path)
}

/// Create an empty file named `name` under `parent`.
pub fn create_file(parent: &Path, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FsError::InvalidName("empty file name".to_string()));
    }

    let path = parent.join(name);
    if path.exists() {
        return Err(FsError::AlreadyExists(path));
    }

    fs::write(&path, b"")?;
    tracing::info!("Created file: {}", path.display());
    Ok(path)
}

/// Delete a file or folder. Folders are removed recursively.
pub fn delete_entry(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(FsError::NotFound(path.to_path_buf()));
    }

    if path.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }

    tracing::info!("Deleted: {}", path.display());
    Ok(())
}

/// Rename an entry in place. The new name must not exist yet.
pub fn rename_entry(path: &Path, new_name: &str) -> Result<PathBuf> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(FsError::InvalidName("empty name".to_string()));
    }
    if !path.exists() {
        return Err(FsError::NotFound(path.to_path_buf()));
    }

    let parent = path
        .parent()
        .ok_or_else(|| FsError::InvalidName("no parent directory".to_string()))?;
    let target = parent.join(new_name);
    if target.exists() {
        return Err(FsError::AlreadyExists(target));
    }

    fs::rename(path, &target)?;
    tracing::info!("Renamed: {} -> {}", path.display(), target.display());
    Ok(target)
}

/// Pick an unused destination path by appending " - Copy<N>" before the
/// extension until the name is free.
pub fn unique_destination(dest: &Path) -> PathBuf {
    if !dest.exists() {
        return dest.to_path_buf();
    }

    let parent = dest.parent().map(Path::to_path_buf).unwrap_or_default();
    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = dest.extension().map(|e| e.to_string_lossy().to_string());

    let mut i = 1;
    loop {
        let name = match &ext {
            Some(ext) => format!("{} - Copy{}.{}", stem, i, ext),
            None => format!("{} - Copy{}", stem, i),
        };
        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
        i += 1;
    }
}

/// Copy `src` into `target_dir`, renaming with the " - Copy<N>" suffix
/// when the destination already exists. Returns the path written.
pub fn paste_entry(src: &Path, target_dir: &Path) -> Result<PathBuf> {
    if !src.exists() {
        return Err(FsError::NotFound(src.to_path_buf()));
    }
    if !target_dir.is_dir() {
        return Err(FsError::NotADirectory(target_dir.to_path_buf()));
    }

    let file_name = src
        .file_name()
        .ok_or_else(|| FsError::InvalidName("source has no file name".to_string()))?;
    let dest = unique_destination(&target_dir.join(file_name));

    if src.is_dir() {
        copy_dir_recursive(src, &dest)?;
    } else {
        fs::copy(src, &dest)?;
    }

    tracing::info!("Pasted: {} -> {}", src.display(), dest.display());
    Ok(dest)
}

/// Move `src` into `target_dir`.
///
/// Returns `Ok(None)` without touching the filesystem when source and
/// destination resolve to the same absolute path. No other collision
/// avoidance is attempted; an existing destination fails like any other
/// OS error.
pub fn move_entry(src: &Path, target_dir: &Path) -> Result<Option<PathBuf>> {
    if !src.exists() {
        return Err(FsError::NotFound(src.to_path_buf()));
    }
    if !target_dir.is_dir() {
        return Err(FsError::NotADirectory(target_dir.to_path_buf()));
    }

    let file_name = src
        .file_name()
        .ok_or_else(|| FsError::InvalidName("source has no file name".to_string()))?;
    let dest = target_dir.join(file_name);

    let same = match (src.canonicalize(), dest.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same {
        tracing::debug!("Move skipped, same path: {}", src.display());
        return Ok(None);
    }

    match fs::rename(src, &dest) {
        Ok(()) => {}
        Err(e) if is_cross_device(&e) => {
            // Different filesystem: fall back to copy + delete.
            tracing::info!(
                "Cross-device move, using copy+delete: {} -> {}",
                src.display(),
                dest.display()
            );
            if src.is_dir() {
                copy_dir_recursive(src, &dest)?;
                fs::remove_dir_all(src)?;
            } else {
                fs::copy(src, &dest)?;
                fs::remove_file(src)?;
            }
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!("Moved: {} -> {}", src.display(), dest.display());
    Ok(Some(dest))
}

fn is_cross_device(e: &std::io::Error) -> bool {
    // EXDEV on Unix, ERROR_NOT_SAME_DEVICE on Windows
    match e.raw_os_error() {
        Some(18) => cfg!(unix),
        Some(17) => cfg!(windows),
        _ => false,
    }
}

/// Open an entry with the OS default application. The spawned process is
/// not observed further.
pub fn open_external(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(FsError::NotFound(path.to_path_buf()));
    }

    open::that(path).map_err(|e| FsError::OpenFailed(e.to_string()))?;
    tracing::info!("Opened externally: {}", path.display());
    Ok(())
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    if !dst.exists() {
        fs::create_dir_all(dst)?;
    }

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_folder_and_file() {
        let dir = tempfile::tempdir().unwrap();

        let folder = create_folder(dir.path(), "docs").unwrap();
        assert!(folder.is_dir());
        assert!(matches!(
            create_folder(dir.path(), "docs"),
            Err(FsError::AlreadyExists(_))
        ));

        let file = create_file(dir.path(), "todo.txt").unwrap();
        assert!(file.is_file());
        assert!(matches!(
            create_file(dir.path(), "todo.txt"),
            Err(FsError::AlreadyExists(_))
        ));

        assert!(matches!(
            create_file(dir.path(), "   "),
            Err(FsError::InvalidName(_))
        ));
    }

    #[test]
    fn test_rename() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("a.txt");
        fs::write(&old, b"x").unwrap();
        fs::write(dir.path().join("b.txt"), b"y").unwrap();

        assert!(matches!(
            rename_entry(&old, "b.txt"),
            Err(FsError::AlreadyExists(_))
        ));

        let renamed = rename_entry(&old, "c.txt").unwrap();
        assert!(!old.exists());
        assert!(renamed.exists());
    }

    #[test]
    fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("inner.txt"), b"x").unwrap();

        delete_entry(&sub).unwrap();
        assert!(!sub.exists());
        assert!(matches!(delete_entry(&sub), Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_paste_collision_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("note.txt");
        fs::write(&src, b"content").unwrap();

        let first = paste_entry(&src, dir.path()).unwrap();
        assert_eq!(first.file_name().unwrap(), "note - Copy1.txt");

        let second = paste_entry(&src, dir.path()).unwrap();
        assert_eq!(second.file_name().unwrap(), "note - Copy2.txt");

        assert_eq!(fs::read(&second).unwrap(), b"content");
    }

    #[test]
    fn test_paste_folder() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("stuff");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("inner.txt"), b"x").unwrap();

        let copy = paste_entry(&src, dir.path()).unwrap();
        assert_eq!(copy.file_name().unwrap(), "stuff - Copy1");
        assert!(copy.join("inner.txt").exists());
    }

    #[test]
    fn test_unique_destination_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("README");
        fs::write(&target, b"x").unwrap();

        let unique = unique_destination(&target);
        assert_eq!(unique.file_name().unwrap(), "README - Copy1");
    }

    #[test]
    fn test_move_into_own_folder_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("keep.txt");
        fs::write(&src, b"data").unwrap();

        let result = move_entry(&src, dir.path()).unwrap();
        assert!(result.is_none());
        assert!(src.exists());
        assert_eq!(fs::read(&src).unwrap(), b"data");
    }

    #[test]
    fn test_move_into_subfolder() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("file.txt");
        let sub = dir.path().join("sub");
        fs::write(&src, b"data").unwrap();
        fs::create_dir(&sub).unwrap();

        let moved = move_entry(&src, &sub).unwrap().unwrap();
        assert!(!src.exists());
        assert_eq!(moved, sub.join("file.txt"));
        assert!(moved.exists());
    }
}
