use std::io;
use std::path::Path;

/// Filesystem operations the registry and remover depend on.
pub trait Filesystem {
    fn path_exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Recursively delete `path` and everything below it.
    fn remove_tree(&self, path: &Path) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// An installation root is live when it exists and is a directory.
    fn is_live_dir(&self, path: &Path) -> bool {
        self.path_exists(path) && self.is_dir(path)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Real filesystem whose deletes always fail.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ReadOnlyFilesystem;

#[cfg(test)]
impl Filesystem for ReadOnlyFilesystem {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("read-only: {}", path.display()),
        ))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}
