use std::{
    env,
    fs::{File, OpenOptions},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use super::{MASTER_SECRET_SIZE, MasterSecretStore};
use crate::error::StorageError;

/// Fixed name of the secret file inside the configured directory.
pub const SECRET_FILE_NAME: &str = "master.secret";

/// Environment variable naming the directory that holds the secret file.
pub const HOME_ENV: &str = "KEYFORT_HOME";

/// Durable master secret store backed by a single plain-text file.
///
/// The file holds the raw fixed-length secret with no header or version
/// tag. Every call is self-contained: open, operate, and close again, with
/// the handle dropped on every exit path. No handle is kept between calls,
/// so nothing needs locking across them; concurrent `set_secret` calls are
/// not expected (single initialization-time write).
#[derive(Debug, Clone)]
pub struct FileMasterSecretStore {
    path: PathBuf,
}

impl FileMasterSecretStore {
    /// Create a store in the directory named by `KEYFORT_HOME`.
    ///
    /// Falls back to the current directory when the variable is unset.
    pub fn new() -> Self {
        match env::var(HOME_ENV) {
            Ok(home) => Self::with_directory(home),
            Err(_) => {
                tracing::warn!("{HOME_ENV} is not set, using the current directory");
                Self::with_directory(".")
            },
        }
    }

    /// Create a store in an explicit directory.
    pub fn with_directory(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(SECRET_FILE_NAME) }
    }

    /// The resolved path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, operation: &'static str, source: io::Error) -> StorageError {
        StorageError::Io { operation, path: self.path.clone(), source }
    }
}

impl Default for FileMasterSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MasterSecretStore for FileMasterSecretStore {
    fn get_secret(&self) -> Result<Option<[u8; MASTER_SECRET_SIZE]>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error("open", err)),
        };

        let mut bytes = Vec::with_capacity(MASTER_SECRET_SIZE);
        file.take(MASTER_SECRET_SIZE as u64)
            .read_to_end(&mut bytes)
            .map_err(|err| self.io_error("read", err))?;

        if bytes.is_empty() {
            return Ok(None);
        }

        // A non-empty file shorter than the secret is corruption, not
        // absence: surface it rather than minting a replacement secret.
        let secret: [u8; MASTER_SECRET_SIZE] = bytes.as_slice().try_into().map_err(|_| {
            self.io_error(
                "read",
                io::Error::new(io::ErrorKind::InvalidData, "secret file is truncated"),
            )
        })?;

        Ok(Some(secret))
    }

    fn set_secret(&self, secret: &[u8; MASTER_SECRET_SIZE]) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| self.io_error("open", err))?;

        file.write_all(secret).map_err(|err| self.io_error("write", err))?;
        file.sync_all().map_err(|err| self.io_error("sync", err))
    }
}
