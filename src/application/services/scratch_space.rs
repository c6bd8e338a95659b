use std::io;
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};

/// Root under which a conversion creates its temporary files. Everything
/// handed out is removed when the returned guard drops.
#[derive(Debug, Clone)]
pub struct ScratchSpace {
    root: PathBuf,
}

impl ScratchSpace {
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn system() -> Self {
        Self {
            root: std::env::temp_dir(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file(&self, suffix: &str) -> io::Result<NamedTempFile> {
        tempfile::Builder::new()
            .prefix("docmark-")
            .suffix(suffix)
            .tempfile_in(&self.root)
    }

    pub fn dir(&self) -> io::Result<TempDir> {
        tempfile::Builder::new()
            .prefix("docmark-")
            .tempdir_in(&self.root)
    }
}

impl Default for ScratchSpace {
    fn default() -> Self {
        Self::system()
    }
}
