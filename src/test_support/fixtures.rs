//! Descriptor fixtures written to disk.

use std::fs;
use std::path::{Path, PathBuf};

/// Descriptor text for a core named `name` depending on `depend`.
pub fn descriptor(name: &str, depend: &[&str]) -> String {
    let depend = depend
        .iter()
        .map(|d| format!("\"{}\"", d))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"[core]
name = "{name}"
vendor = "acme"
library = "ip"
version = "1.0"
depend = [{depend}]
"#
    )
}

/// Write `<dir>/<name>.core`, creating `dir` if needed.
pub fn write_core(dir: &Path, name: &str, depend: &[&str]) -> PathBuf {
    write_descriptor(dir, name, &descriptor(name, depend))
}

/// Write `<dir>/<name>.core` with arbitrary contents.
pub fn write_descriptor(dir: &Path, name: &str, contents: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(format!("{}.core", name));
    fs::write(&path, contents).unwrap();
    path
}
