//! Confinement of input and output paths to a root directory.

use crate::common::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Absolute, canonical form of `path`.
///
/// Components that do not exist yet are re-attached to the nearest existing
/// ancestor, so an output inside a folder still to be created resolves too.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut missing = Vec::new();
    let mut existing = absolute.as_path();
    loop {
        match existing.canonicalize() {
            Ok(canonical) => {
                return Ok(missing.iter().rev().fold(canonical, |acc, name| acc.join(name)));
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let (Some(parent), Some(file_name)) = (existing.parent(), existing.file_name()) else {
                    return Err(e);
                };
                missing.push(file_name);
                existing = parent;
            },
            Err(e) => return Err(e),
        }
    }
}

/// Fail with [`Error::Security`] unless `path` lies inside `root`.
///
/// Both paths are canonicalized first, so `..` segments and symlinks cannot
/// escape the root.
pub fn assert_within_root(path: &Path, root: &Path) -> Result<()> {
    let security = || Error::Security {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    };
    let resolved = resolve(path).map_err(|_| security())?;
    let root = resolve(root).map_err(|_| security())?;
    if resolved.starts_with(&root) {
        Ok(())
    } else {
        Err(security())
    }
}

/// Root directory that converted files must stay inside
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Guard rooted at the current working directory.
    pub fn current_dir() -> Result<Self> {
        let root = std::env::current_dir().map_err(|e| Error::Open(e.to_string()))?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn check(&self, path: &Path) -> Result<()> {
        assert_within_root(path, &self.root)
    }
}
