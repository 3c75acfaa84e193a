//! Managed file service
//!
//! Provides the filesystem operations behind the `/files` API: every name is
//! checked against the filename policy before any path is built from it.

use crate::error::AppError;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// The only extension accepted for managed files
pub const MANAGED_EXTENSION: &str = ".txt";

/// Service over a single flat directory of text files
#[derive(Debug, Clone)]
pub struct FileService {
    root: PathBuf,
}

impl FileService {
    /// Create a service rooted at `root`
    ///
    /// The directory is not touched here; call [`FileService::ensure_root`]
    /// once at startup.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage directory this service operates on
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage directory if it does not exist yet
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Check that a filename is acceptable as a managed file
    ///
    /// # Returns
    /// * `Ok(())` - Name ends with `.txt` and is a single plain path component
    /// * `Err(AppError::InvalidFilename)` - Otherwise
    pub fn validate_filename(filename: &str) -> Result<(), AppError> {
        if !filename.ends_with(MANAGED_EXTENSION) {
            return Err(AppError::InvalidFilename(format!(
                "Only {} files are allowed",
                MANAGED_EXTENSION
            )));
        }

        // "a/b.txt", "..\\x.txt" and friends must not escape the root
        let mut components = Path::new(filename).components();
        let is_plain = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(name)), None) if name == filename
        );
        if !is_plain || filename.contains(|c: char| c == '\\' || c == '\0') {
            return Err(AppError::InvalidFilename(format!(
                "Invalid filename: {}",
                filename
            )));
        }

        Ok(())
    }

    /// Resolve a validated filename to its path inside the root
    fn path_for(&self, filename: &str) -> Result<PathBuf, AppError> {
        Self::validate_filename(filename)?;
        Ok(self.root.join(filename))
    }

    /// Fail with `FileNotFound` unless `path` is an existing regular file
    async fn require_regular_file(path: &Path, filename: &str) -> Result<(), AppError> {
        match fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => Ok(()),
            Ok(_) => Err(AppError::FileNotFound(filename.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::FileNotFound(filename.to_string()))
            }
            Err(e) => Err(AppError::io(
                format!("Failed to access file {}", filename),
                e,
            )),
        }
    }

    /// List the names of all managed files
    ///
    /// Order follows directory enumeration and is not sorted.
    pub async fn list_files(&self) -> Result<Vec<String>, AppError> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| AppError::io("Failed to list files", e))?;

        let mut files = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::io("Failed to list files", e))?
        {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !name.ends_with(MANAGED_EXTENSION) {
                continue;
            }

            // Follows symlinks, so a link to a regular file is listed
            match fs::metadata(entry.path()).await {
                Ok(metadata) if metadata.is_file() => files.push(name),
                Ok(_) => {}
                Err(e) => warn!(file = %name, error = %e, "Skipping unreadable entry"),
            }
        }

        debug!(count = files.len(), "Listed managed files");
        Ok(files)
    }

    /// Read the full content of a managed file
    pub async fn read_file(&self, filename: &str) -> Result<String, AppError> {
        let path = self.path_for(filename)?;
        Self::require_regular_file(&path, filename).await?;

        let bytes = fs::read(&path)
            .await
            .map_err(|e| AppError::io(format!("Failed to read file {}", filename), e))?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Create a new managed file, refusing to overwrite anything
    pub async fn create_file(&self, filename: &str, content: &str) -> Result<(), AppError> {
        let path = self.path_for(filename)?;

        let exists = fs::try_exists(&path)
            .await
            .map_err(|e| AppError::io(format!("Failed to create file {}", filename), e))?;
        if exists {
            return Err(AppError::FileExists(filename.to_string()));
        }

        // create_new closes the window between the check above and the write
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => AppError::FileExists(filename.to_string()),
                _ => AppError::io(format!("Failed to create file {}", filename), e),
            })?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| AppError::io(format!("Failed to create file {}", filename), e))?;
        file.flush()
            .await
            .map_err(|e| AppError::io(format!("Failed to create file {}", filename), e))?;

        info!(file = %filename, bytes = content.len(), "Created file");
        Ok(())
    }

    /// Replace the whole content of an existing managed file
    pub async fn update_file(&self, filename: &str, content: &str) -> Result<(), AppError> {
        let path = self.path_for(filename)?;
        Self::require_regular_file(&path, filename).await?;

        fs::write(&path, content)
            .await
            .map_err(|e| AppError::io(format!("Failed to update file {}", filename), e))?;

        info!(file = %filename, bytes = content.len(), "Updated file");
        Ok(())
    }

    /// Remove an existing managed file
    pub async fn delete_file(&self, filename: &str) -> Result<(), AppError> {
        let path = self.path_for(filename)?;
        Self::require_regular_file(&path, filename).await?;

        fs::remove_file(&path)
            .await
            .map_err(|e| AppError::io(format!("Failed to delete file {}", filename), e))?;

        info!(file = %filename, "Deleted file");
        Ok(())
    }
}
