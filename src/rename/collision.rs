// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Collision resolution for rename targets
//!
//! Existence checks here are advisory: another process may create the
//! target between the existence check and the rename.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Total paths checked per file: the desired name plus `_1` to `_999`
pub const MAX_COLLISION_ATTEMPTS: usize = 1000;

/// Finds free target paths for one batch.
///
/// A path is taken when it exists on disk or was handed out earlier by the
/// same resolver, so two files of a batch never share a target.
#[derive(Debug, Default)]
pub struct CollisionResolver {
    claimed: HashSet<PathBuf>,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `directory/desired+ext` to a free path, appending `_<n>` to
    /// the stem on collision. Returns `None` once the attempt budget is spent.
    pub fn resolve(&mut self, directory: &Path, desired: &str, ext: &str) -> Option<PathBuf> {
        let first = directory.join(format!("{}{}", desired, ext));
        if !self.is_taken(&first) {
            self.claimed.insert(first.clone());
            return Some(first);
        }

        for counter in 1..MAX_COLLISION_ATTEMPTS {
            let candidate = directory.join(format!("{}_{}{}", desired, counter, ext));
            if !self.is_taken(&candidate) {
                debug!("Collision on {:?}, using {:?}", first, candidate);
                self.claimed.insert(candidate.clone());
                return Some(candidate);
            }
        }

        warn!("No free name for {:?} after {} attempts", first, MAX_COLLISION_ATTEMPTS);
        None
    }

    fn is_taken(&self, path: &Path) -> bool {
        if self.claimed.contains(path) {
            return true;
        }
        // Anything but a clean "not found" counts as occupied
        match std::fs::symlink_metadata(path) {
            Ok(_) => true,
            Err(e) => e.kind() != ErrorKind::NotFound,
        }
    }
}

/// Resolve a single target with no batch context
pub fn resolve(directory: &Path, desired: &str, ext: &str) -> Option<PathBuf> {
    CollisionResolver::new().resolve(directory, desired, ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_free_name_is_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = resolve(dir.path(), "report", ".pdf").unwrap();
        assert_eq!(path, dir.path().join("report.pdf"));
        // Idempotent while nothing is created
        assert_eq!(resolve(dir.path(), "report", ".pdf").unwrap(), path);
    }

    #[test]
    fn test_collision_appends_counter() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "new_a.txt");
        touch(dir.path(), "new_a_1.txt");

        let path = resolve(dir.path(), "new_a", ".txt").unwrap();
        assert_eq!(path, dir.path().join("new_a_2.txt"));
    }

    #[test]
    fn test_claimed_paths_are_not_reused() {
        let dir = TempDir::new().unwrap();
        let mut resolver = CollisionResolver::new();

        let first = resolver.resolve(dir.path(), "same", ".png").unwrap();
        let second = resolver.resolve(dir.path(), "same", ".png").unwrap();
        assert_eq!(first, dir.path().join("same.png"));
        assert_eq!(second, dir.path().join("same_1.png"));
    }

    #[test]
    fn test_999_collisions_still_resolve() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "busy.log");
        for n in 1..999 {
            touch(dir.path(), &format!("busy_{}.log", n));
        }

        let path = resolve(dir.path(), "busy", ".log").unwrap();
        assert_eq!(path, dir.path().join("busy_999.log"));
        assert!(!path.exists());
    }

    #[test]
    fn test_exhaustion_after_attempt_budget() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "full");
        for n in 1..MAX_COLLISION_ATTEMPTS {
            touch(dir.path(), &format!("full_{}", n));
        }

        assert_eq!(resolve(dir.path(), "full", ""), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_counts_as_taken() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("link.txt"))
            .unwrap();

        let path = resolve(dir.path(), "link", ".txt").unwrap();
        assert_eq!(path, dir.path().join("link_1.txt"));
    }
}
