//! JSON-file backed key-value state with explicit load and save boundaries

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::models::CartError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o failed for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("store file {path:?} is not valid json: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// State loaded once from a JSON file and written back after every update
pub struct PersistedStore<T> {
    path: PathBuf,
    state: RwLock<T>,
}

impl<T> PersistedStore<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Load the state, starting from the default when the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let state = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?
        } else {
            T::default()
        };

        debug!("Opened store {:?}", path);
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current state
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.read())
    }

    /// Mutate the state and flush it to disk before returning
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, StoreError> {
        self.try_update(|state| Ok(f(state)))
    }

    /// Mutate a copy of the state and swap it in only once it is on disk.
    /// A rejected mutation or a failed write leaves memory and file untouched.
    pub fn try_update<R>(
        &self,
        f: impl FnOnce(&mut T) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let mut state = self.state.write();
        let mut next = state.clone();
        let result = f(&mut next)?;
        self.write_file(&next)?;
        *state = next;
        Ok(result)
    }

    /// Write the current state to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        let state = self.state.read();
        self.write_file(&state)
    }

    fn write_file(&self, state: &T) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(state).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        // write then rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;

        Ok(())
    }
}
