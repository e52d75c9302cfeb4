//! File-based session token storage.

use std::path::{Path, PathBuf};

use tracing::instrument;

use super::SessionStore;
use crate::error::Error;

/// File permissions for the token file (Unix only): owner read/write.
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Directory permissions (Unix only): owner read/write/execute.
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

/// File-based session token storage.
///
/// Stores the token as a single plain-text file. Writes go to a temp file
/// first and are renamed into place so a crash never leaves a truncated
/// token behind.
///
/// # Security
/// - The file is created with 0600 permissions (owner read/write) on Unix
/// - The parent directory is created with 0700 permissions
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a new FileSessionStore backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists with correct permissions.
    fn ensure_dir(&self) -> Result<(), Error> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        if dir.as_os_str().is_empty() || dir.exists() {
            return Ok(());
        }
        std::fs::create_dir_all(dir).map_err(|e| {
            Error::Storage(format!(
                "Failed to create session directory '{}': {}",
                dir.display(),
                e
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(DIR_MODE);
            std::fs::set_permissions(dir, perms).map_err(|e| {
                Error::Storage(format!(
                    "Failed to set directory permissions on '{}': {}",
                    dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    #[instrument(skip(self))]
    fn load(&self) -> Result<Option<String>, Error> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::Storage(format!(
                    "Failed to read session file '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let token = content.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token.to_string()))
    }

    #[instrument(skip(self, token))]
    fn save(&self, token: &str) -> Result<(), Error> {
        self.ensure_dir()?;

        // Write to temp file first, then rename for atomicity. On Unix the
        // file is created 0600 so the token is never world-readable.
        let temp_path = self.path.with_extension("tmp");

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(FILE_MODE)
                .open(&temp_path)
                .map_err(|e| {
                    Error::Storage(format!(
                        "Failed to create temp file '{}': {}",
                        temp_path.display(),
                        e
                    ))
                })?;
            file.write_all(token.as_bytes()).map_err(|e| {
                Error::Storage(format!(
                    "Failed to write temp file '{}': {}",
                    temp_path.display(),
                    e
                ))
            })?;
            file.sync_all().map_err(|e| {
                Error::Storage(format!(
                    "Failed to sync temp file '{}': {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        #[cfg(not(unix))]
        {
            std::fs::write(&temp_path, token).map_err(|e| {
                Error::Storage(format!(
                    "Failed to write temp file '{}': {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(Error::Storage(format!(
                "Failed to rename '{}' to '{}': {}",
                temp_path.display(),
                self.path.display(),
                e
            )));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&self) -> Result<(), Error> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(format!(
                "Failed to remove session file '{}': {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn exists(&self) -> Result<bool, Error> {
        Ok(self.path.exists())
    }

    fn name(&self) -> &str {
        "file"
    }
}
