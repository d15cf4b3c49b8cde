use std::io;
use std::path::{Path, PathBuf};

/// Expand a leading `~` and anchor relative paths at the working directory.
pub fn absolute_root(path: &Path) -> io::Result<PathBuf> {
    std::path::absolute(expand_tilde(path))
}

// Only `~` and `~/...` refer to the current user; `~other` is left alone.
fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match directories::BaseDirs::new() {
        Some(base_dirs) => base_dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}
