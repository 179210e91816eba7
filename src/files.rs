use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Whole-file access used by every step of a run.
///
/// Each call opens, fully reads or writes, and closes the file before
/// returning. Writes create the file or truncate an existing one.
pub trait FileAccess {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Files on the local disk, with relative paths resolved against `root`.
#[derive(Debug, Clone)]
pub struct DiskFiles {
    root: PathBuf,
}

impl DiskFiles {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        DiskFiles { root: root.into() }
    }

    // Absolute paths replace the root when joined
    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileAccess for DiskFiles {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(self.resolve(path), contents)
    }
}

#[cfg(test)]
pub use memory::MemoryFiles;
