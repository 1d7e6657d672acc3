// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Turning user-supplied paths into rename candidates

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::rename::FileEntry;

/// Collect file entries from `paths`.
///
/// Blank or unreadable paths are skipped. Directories are expanded only when
/// `recursive` is set; otherwise they are ignored.
pub fn collect_files<P: AsRef<Path>>(paths: &[P], recursive: bool) -> Vec<FileEntry> {
    let mut files = Vec::new();

    for path in paths {
        let Some(path) = clean_path(path.as_ref()) else {
            continue;
        };

        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                debug!("Skipping {:?}: {}", path, e);
                continue;
            }
        };

        if metadata.is_dir() {
            if recursive {
                walk(&path, &mut files);
            } else {
                debug!("Skipping directory {:?} (not recursive)", path);
            }
        } else {
            push_entry(&path, &mut files);
        }
    }

    files
}

/// Keep entries that still exist, rebuilding `full_path` from
/// `directory` and `name` when it is empty
pub fn retain_existing(entries: Vec<FileEntry>) -> Vec<FileEntry> {
    entries
        .into_iter()
        .filter_map(|mut entry| {
            if entry.full_path.as_os_str().is_empty() {
                if entry.directory.as_os_str().is_empty() || entry.name.is_empty() {
                    return None;
                }
                entry.full_path = entry.directory.join(&entry.name);
            }
            entry.full_path.exists().then_some(entry)
        })
        .collect()
}

fn clean_path(path: &Path) -> Option<PathBuf> {
    match path.to_str() {
        Some(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
        }
        None => Some(path.to_path_buf()),
    }
}

/// Every non-directory descendant, in lexical order. Unreadable
/// subdirectories are skipped.
fn walk(dir: &Path, files: &mut Vec<FileEntry>) {
    let walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => continue,
            Ok(entry) => push_entry(entry.path(), files),
            Err(e) => debug!("Skipping {:?}: {}", e.path().unwrap_or(dir), e),
        }
    }
}

fn push_entry(path: &Path, files: &mut Vec<FileEntry>) {
    match FileEntry::from_path(path) {
        Some(entry) => files.push(entry),
        None => warn!("Skipping {:?}: file name is not valid UTF-8", path),
    }
}
