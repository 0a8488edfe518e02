//! Persistent key/value area backed by a capability directory.
//!
//! Each key maps to one `<key>.json` file. Writes replace the file
//! atomically; a key that was never written reads as `None`.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use thiserror::Error;

use super::atomic_io::write_atomic;

/// Errors raised by [`LocalStorageArea`].
#[derive(Debug, Error)]
pub enum StorageAreaError {
    /// The key contains characters that cannot form a file name.
    #[error("invalid storage key {key:?}")]
    InvalidKey {
        /// Offending key.
        key: String,
    },
    /// The storage directory could not be opened.
    #[error("failed to open storage directory {path}: {source}")]
    Open {
        /// Directory path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Reading a key failed.
    #[error("failed to read {key}: {source}")]
    Read {
        /// Key being read.
        key: String,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Writing or removing a key failed.
    #[error("failed to write {key}: {source}")]
    Write {
        /// Key being written.
        key: String,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
}

/// Directory-scoped string store.
#[derive(Debug)]
pub struct LocalStorageArea {
    dir: Dir,
}

impl LocalStorageArea {
    /// Open `path`, creating it when missing.
    pub fn open(path: &Utf8Path) -> Result<Self, StorageAreaError> {
        let open_error = |source| StorageAreaError::Open {
            path: path.to_path_buf(),
            source,
        };
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(open_error)?;
        Ok(Self { dir })
    }

    /// Read the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageAreaError> {
        let file = file_name(key)?;
        match self.dir.read_to_string(file.as_std_path()) {
            Ok(contents) => Ok(Some(contents)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageAreaError::Read {
                key: key.to_owned(),
                source,
            }),
        }
    }

    /// Replace the value stored under `key`.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageAreaError> {
        let file = file_name(key)?;
        write_atomic(&self.dir, &file, value).map_err(|source| StorageAreaError::Write {
            key: key.to_owned(),
            source,
        })
    }

    /// Remove `key`; removing an absent key succeeds.
    pub fn remove(&self, key: &str) -> Result<(), StorageAreaError> {
        let file = file_name(key)?;
        match self.dir.remove_file(file.as_std_path()) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageAreaError::Write {
                key: key.to_owned(),
                source,
            }),
        }
    }
}

fn file_name(key: &str) -> Result<Utf8PathBuf, StorageAreaError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if !valid {
        return Err(StorageAreaError::InvalidKey {
            key: key.to_owned(),
        });
    }
    Ok(Utf8PathBuf::from(format!("{key}.json")))
}
