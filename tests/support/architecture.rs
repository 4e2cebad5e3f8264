//! Source-tree scans backing the architecture contract tests.

use std::fs;
use std::path::{Path, PathBuf};

/// A source line that broke a contract: `(file, line number, text)`.
pub type Hit = (String, usize, String);

fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn display(path: &Path) -> String {
    path.strip_prefix(root())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries =
        fs::read_dir(dir).unwrap_or_else(|e| panic!("failed to read dir {}: {e}", dir.display()));
    for entry in entries {
        let path = entry
            .unwrap_or_else(|e| panic!("failed to read dir entry: {e}"))
            .path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// Every `.rs` file under `relative_dir`, sorted.
pub fn rust_files(relative_dir: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(&root().join(relative_dir), &mut files);
    files.sort();
    files
}

/// Lines of every file accepted by `select` for which `violates` holds.
///
/// Scanning stops at a file's `#[cfg(test)]` module so test-only imports do
/// not count.
fn scan(
    relative_dir: &str,
    select: impl Fn(&Path) -> bool,
    violates: impl Fn(&str) -> bool,
) -> Vec<Hit> {
    let mut hits = Vec::new();
    for file in rust_files(relative_dir).into_iter().filter(|f| select(f)) {
        let content = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", file.display()));
        for (idx, line) in content.lines().enumerate() {
            if line.trim() == "#[cfg(test)]" {
                break;
            }
            if violates(line) {
                hits.push((display(&file), idx + 1, line.to_string()));
            }
        }
    }
    hits
}

/// Production lines under `relative_dir` containing any of `patterns`.
pub fn lines_containing(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    scan(relative_dir, |_| true, |line| patterns.iter().any(|p| line.contains(p)))
}

/// Lines of `mod.rs` files that are not module declarations, comments or
/// `cfg` attributes.
pub fn non_export_lines_in_mod_files(relative_dir: &str) -> Vec<Hit> {
    scan(
        relative_dir,
        |file| file.file_name().is_some_and(|name| name == "mod.rs"),
        |raw| {
            let line = raw.trim();
            !(line.is_empty()
                || line.starts_with("//")
                || line.starts_with("pub mod ")
                || line.starts_with("mod ")
                || line.starts_with("#[cfg")
                || line.starts_with("#![allow"))
        },
    )
}

pub fn path_exists(relative_path: &str) -> bool {
    root().join(relative_path).exists()
}
