//! Record store for survey-recorder.
//!
//! Survey responses are kept in a single append-only comma-separated file
//! with a fixed header row. The file is never truncated or rewritten.

pub mod schema;

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::survey::SurveyResponse;

/// Append-only store of survey responses.
///
/// Appends from this process are serialized by an internal lock and each
/// row goes out in a single write. Nothing coordinates with other processes
/// writing the same file.
#[derive(Debug)]
pub struct RecordStore {
    /// Path to the backing file.
    path: PathBuf,
    /// Held for the duration of every append.
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Create a store handle for the given path. Touches nothing on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file with its header row if it does not exist.
    ///
    /// Returns `true` if the file was created. An existing file is left
    /// untouched, so calling this repeatedly is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the file can't be created.
    pub fn ensure_initialized(&self) -> Result<bool> {
        let _guard = self.lock()?;
        self.create_if_missing()
    }

    /// Append one response as a single row.
    ///
    /// The row is fully encoded before the file is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be opened or written.
    pub fn append(&self, record: &SurveyResponse) -> Result<()> {
        let line = schema::encode_record(record);
        let _guard = self.lock()?;

        if self.create_if_missing()? {
            info!(
                "Record store was missing, recreated at {}",
                self.path.display()
            );
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| self.append_error(source))?;
        file.write_all(line.as_bytes())
            .map_err(|source| self.append_error(source))?;

        debug!(bytes = line.len(), "Appended survey response");
        Ok(())
    }

    /// Get statistics about the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read.
    pub fn stats(&self) -> Result<StoreStats> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(StoreStats {
                    path: self.path.clone(),
                    exists: false,
                    size_bytes: 0,
                    responses: 0,
                });
            }
            Err(err) => return Err(err.into()),
        };

        Ok(StoreStats {
            path: self.path.clone(),
            exists: true,
            size_bytes: content.len() as u64,
            responses: schema::count_rows(&content).saturating_sub(1),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| Error::internal("record store lock poisoned"))
    }

    /// Caller must hold the write lock.
    fn create_if_missing(&self) -> Result<bool> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                debug!("Record store already present at {}", self.path.display());
                return Ok(false);
            }
            Err(source) => {
                return Err(Error::StoreInit {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        file.write_all(schema::header_line().as_bytes())
            .map_err(|source| Error::StoreInit {
                path: self.path.clone(),
                source,
            })?;

        info!("Created record store at {}", self.path.display());
        Ok(true)
    }

    fn append_error(&self, source: std::io::Error) -> Error {
        Error::StoreAppend {
            path: self.path.clone(),
            source,
        }
    }
}

/// Statistics about the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Path to the backing file.
    pub path: PathBuf,
    /// Whether the backing file exists.
    pub exists: bool,
    /// Size of the backing file in bytes.
    pub size_bytes: u64,
    /// Number of recorded responses, header excluded.
    pub responses: usize,
}
