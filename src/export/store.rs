//! Output stores for run profile files.
//!
//! The router only needs two operations: ask whether a name is taken, and
//! create a file that must not exist yet. [`FsStore`] does this against a
//! directory, [`MemoryStore`] keeps everything in a map for tests.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{ProfileError, Result};

/// Destination for run profile files.
pub trait OutputStore {
    /// Whether `name` is already taken.
    fn exists(&self, name: &str) -> bool;

    /// Create `name` with `contents`, failing if it already exists.
    ///
    /// Returns the path the file was written to.
    fn write_new(&mut self, name: &str, contents: &[u8]) -> Result<PathBuf>;
}

/// Store backed by a directory, created on first write.
#[derive(Debug, Clone)]
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputStore for FsStore {
    fn exists(&self, name: &str) -> bool {
        self.dir.join(name).exists()
    }

    fn write_new(&mut self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|source| ProfileError::FileNotAccessible {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(name);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| {
                if source.kind() == IoErrorKind::AlreadyExists {
                    ProfileError::FileAlreadyExists(path.clone())
                } else {
                    ProfileError::FileNotAccessible {
                        path: path.clone(),
                        source,
                    }
                }
            })?;

        file.write_all(contents)
            .and_then(|_| file.flush())
            .map_err(|source| ProfileError::FileNotAccessible {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

/// In-memory store keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a name, e.g. to simulate an earlier export.
    pub fn insert(&mut self, name: &str, contents: &[u8]) {
        self.files.insert(name.to_string(), contents.to_vec());
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl OutputStore for MemoryStore {
    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    fn write_new(&mut self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        if self.files.contains_key(name) {
            return Err(ProfileError::FileAlreadyExists(PathBuf::from(name)));
        }
        self.files.insert(name.to_string(), contents.to_vec());
        Ok(PathBuf::from(name))
    }
}
