use std::path::{Path, PathBuf};

/// Turn a relative path into an absolute one rooted at the current directory.
///
/// Paths that are already absolute, and SQLite special names such as
/// `:memory:` or `file:` URIs, are returned unchanged.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() || path.starts_with(':') || path.starts_with("file:") {
        return path.to_string();
    }

    let p = Path::new(path);
    if p.is_absolute() {
        return path.to_string();
    }

    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let joined = base.join(p.strip_prefix("./").unwrap_or(p));
    joined.to_string_lossy().into_owned()
}
