//! The set of scanned core roots.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

/// Ordered, duplicate-free list of root directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootSet {
    roots: IndexSet<PathBuf>,
}

impl RootSet {
    pub fn new() -> Self {
        RootSet {
            roots: IndexSet::new(),
        }
    }

    /// Append `path` unless it is already present. Returns true if added.
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        self.roots.insert(path.into())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.roots.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_skips_duplicates() {
        let mut roots = RootSet::new();
        assert!(roots.insert("/b"));
        assert!(roots.insert("/a"));
        assert!(!roots.insert("/b"));

        let order: Vec<_> = roots.iter().collect();
        assert_eq!(order, [Path::new("/b"), Path::new("/a")]);
        assert_eq!(roots.len(), 2);
        assert!(roots.contains(Path::new("/a")));
        assert!(!roots.contains(Path::new("/c")));
    }
}
