//! Directory scanning - listing, ordering, and name filtering

use crate::{FsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One filesystem object as presented in the list.
///
/// Built fresh on every scan and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_folder: bool,
    /// Human-readable size for files; empty for folders and files whose
    /// metadata could not be read.
    pub size_text: String,
}

impl Entry {
    fn from_dir_entry(entry: &fs::DirEntry) -> Self {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        // Entries whose type cannot be determined are kept as files with
        // no size rather than dropped from the listing.
        let is_folder = entry
            .file_type()
            .map(|t| {
                if t.is_symlink() {
                    path.is_dir()
                } else {
                    t.is_dir()
                }
            })
            .unwrap_or(false);

        let size_text = if is_folder {
            String::new()
        } else {
            fs::metadata(&path)
                .map(|m| human_size(m.len()))
                .unwrap_or_default()
        };

        Self {
            name,
            path,
            is_folder,
            size_text,
        }
    }
}

/// List a directory's immediate children.
///
/// Folders sort case-insensitively before files; within each group the
/// order is case-insensitive by name. A file whose size cannot be read is
/// still listed, with an empty size text.
pub fn scan_directory<P: AsRef<Path>>(path: P) -> Result<Vec<Entry>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FsError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(FsError::NotADirectory(path.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        entries.push(Entry::from_dir_entry(&entry));
    }

    sort_entries(&mut entries);
    Ok(entries)
}

/// Sort folders before files, each group case-insensitively by name.
fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        if a.is_folder != b.is_folder {
            return if a.is_folder {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Greater
            };
        }
        a.name.to_lowercase().cmp(&b.name.to_lowercase())
    });
}

/// Restrict `entries` to those whose name contains `text`
/// case-insensitively, preserving order. Empty text keeps everything.
///
/// This only re-filters an existing scan result; it never lists anything.
pub fn filter_by_name(entries: &[Entry], text: &str) -> Vec<Entry> {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&text))
        .cloned()
        .collect()
}

/// Format a byte count for display.
pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_folder: bool) -> Entry {
        Entry {
            name: name.to_string(),
            path: PathBuf::from(name),
            is_folder,
            size_text: String::new(),
        }
    }

    #[test]
    fn test_scan_orders_folders_before_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("zeta")).unwrap();
        fs::create_dir(dir.path().join("Alpha")).unwrap();
        fs::write(dir.path().join("beta.txt"), b"hi").unwrap();
        fs::write(dir.path().join("ALPHA.txt"), b"hello").unwrap();

        let entries = scan_directory(dir.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "zeta", "ALPHA.txt", "beta.txt"]);
        assert!(entries[0].is_folder);
        assert!(entries[1].is_folder);
        assert!(!entries[2].is_folder);
    }

    #[test]
    fn test_scan_sizes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("data.bin"), vec![0u8; 2048]).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let entries = scan_directory(dir.path()).unwrap();
        let folder = entries.iter().find(|e| e.name == "sub").unwrap();
        let file = entries.iter().find(|e| e.name == "data.bin").unwrap();
        assert_eq!(folder.size_text, "");
        assert_eq!(file.size_text, "2.0 KB");
    }

    #[test]
    fn test_scan_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(matches!(scan_directory(&gone), Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_filter_preserves_order_and_flags() {
        let entries = vec![
            entry("Apps", true),
            entry("app.txt", false),
            entry("readme.md", false),
        ];

        let filtered = filter_by_name(&entries, "app");
        let names: Vec<&str> = filtered.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Apps", "app.txt"]);
        assert!(filtered[0].is_folder);
        assert!(!filtered[1].is_folder);

        // Clearing the filter restores everything in the original order.
        let cleared = filter_by_name(&entries, "");
        assert_eq!(cleared, entries);
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }
}
