//! Path expansion helpers for user-supplied roots.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
///
/// Paths without `~`, or when no home directory is known, are returned as-is.
/// `~user` forms are not expanded.
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            match directories::BaseDirs::new() {
                Some(dirs) => dirs.home_dir().join(components.as_path()),
                None => path.to_path_buf(),
            }
        }
        _ => path.to_path_buf(),
    }
}

/// Make `path` absolute against the current directory and fold `.`/`..`
/// segments without touching the filesystem.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize_lexically(&joined))
}

/// Fold `.` and `..` components. `..` at the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_lexically(Path::new("/a/b/")), PathBuf::from("/a/b"));
        assert_eq!(normalize_lexically(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn test_absolute_relative_path() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute(Path::new("x/../y")).unwrap(), cwd.join("y"));
        assert_eq!(absolute(Path::new("/abs")).unwrap(), PathBuf::from("/abs"));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home(Path::new("/no/tilde")), PathBuf::from("/no/tilde"));
        assert_eq!(expand_home(Path::new("a/~")), PathBuf::from("a/~"));

        if let Some(dirs) = directories::BaseDirs::new() {
            assert_eq!(expand_home(Path::new("~")), dirs.home_dir());
            assert_eq!(
                expand_home(Path::new("~/cores")),
                dirs.home_dir().join("cores")
            );
        }
    }
}
