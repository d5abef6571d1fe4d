use std::path::{Path, PathBuf};

/// Walk up from `start` looking for a file named `filename`.
/// Returns the path to the directory containing the file, or `None`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Ensure a directory exists, creating it and any parents if needed.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Write `content` to `path` unless the file already holds exactly that content.
///
/// Parent directories are created as needed. Returns `true` when the file was
/// written, `false` when it was left untouched so its mtime does not trigger
/// downstream rebuilds.
pub fn write_if_changed(path: &Path, content: &str) -> std::io::Result<bool> {
    if path.is_file() && std::fs::read_to_string(path)? == content {
        tracing::debug!("{} is up to date", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(true)
}
