// Local document store.
// Reads and writes whole JSON documents, bootstrapping absent ones.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{KcError, Result};

use super::paths::{DEFAULT_ROOT, data_dir, sanitize_name};

/// Document written for a name that has never been stored: `[{}]`.
pub fn default_document() -> Value {
    json!([{}])
}

/// Named JSON documents under a single root directory.
///
/// Every write replaces the whole document through a temporary file that
/// is renamed into place, so readers see either the old or the new
/// document and never a partial one.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted in the platform data directory, if one can be determined.
    pub fn in_data_dir() -> Option<Self> {
        data_dir().map(Self::new)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing the document `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(sanitize_name(name))
    }

    /// Check if a document has been stored.
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Read the document `name`.
    ///
    /// An absent document is created with [`default_document`] and that
    /// default is returned. A document that is present but not valid JSON
    /// is reported as [`KcError::CorruptStore`] and left untouched.
    ///
    /// The default is only created if no document appeared in the meantime;
    /// a concurrent [`write`](Self::write) always wins over the bootstrap.
    pub fn read(&self, name: &str) -> Result<Value> {
        loop {
            if let Some(value) = self.load(name)? {
                return Ok(value);
            }
            if self.create_default(name)? {
                return Ok(default_document());
            }
        }
    }

    /// Read the document `name` as `T`, bootstrapping it like [`read`](Self::read).
    /// A document that does not match `T` is reported as corrupt.
    pub fn read_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.read(name)?;
        serde_json::from_value(value).map_err(|source| corrupt(name, source))
    }

    /// Read the document `name` if it exists, without creating it.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.path_for(name);
        let contents = match fs::read(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&contents)
            .map(Some)
            .map_err(|source| corrupt(name, source))
    }

    /// Replace the document `name` with `document`.
    pub fn write<T: Serialize + ?Sized>(&self, name: &str, document: &T) -> Result<()> {
        let json = serde_json::to_vec(document)?;

        fs::create_dir_all(&self.root)?;

        // Write atomically via temp file in the same directory
        let path = self.path_for(name);
        let mut file = NamedTempFile::new_in(&self.root)?;
        file.write_all(&json)?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| e.error)?;

        debug!(name, bytes = json.len(), "wrote document");
        Ok(())
    }

    /// Put the default document in place unless `name` already exists.
    /// Returns `false` if another writer got there first.
    fn create_default(&self, name: &str) -> Result<bool> {
        let json = serde_json::to_vec(&default_document())?;

        fs::create_dir_all(&self.root)?;

        let path = self.path_for(name);
        let mut file = NamedTempFile::new_in(&self.root)?;
        file.write_all(&json)?;
        file.as_file().sync_all()?;
        match file.persist_noclobber(&path) {
            Ok(_) => {
                info!(name, root = %self.root.display(), "created default document");
                Ok(true)
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(e.error.into()),
        }
    }

    /// Delete the document `name`. Missing documents are ignored.
    pub fn remove(&self, name: &str) -> Result<()> {
        match fs::remove_file(self.path_for(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

fn corrupt(name: &str, source: serde_json::Error) -> KcError {
    KcError::CorruptStore {
        name: name.to_string(),
        source,
    }
}
