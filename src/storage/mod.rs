// Local upload storage
//
// Uploaded files live flat in one directory under their sanitized names.
// A new upload with the same name overwrites the old file; there is no
// locking, so concurrent writers of one name race and the last write wins.

pub mod filename;

pub use filename::{allowed_file, secure_filename};

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File type not allowed.")]
    DisallowedExtension { filename: String },

    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UploadError> for crate::types::AppError {
    fn from(err: UploadError) -> Self {
        match err {
            e @ UploadError::DisallowedExtension { .. } => {
                crate::types::AppError::InvalidRequest(e.to_string())
            }
            UploadError::Io(e) => crate::types::AppError::Io(e),
        }
    }
}

/// A file saved into the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub stored_name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    upload_dir: PathBuf,
}

impl UploadStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.upload_dir).await
    }

    /// Sanitize `name` and resolve it inside the upload directory.
    /// Returns `None` when nothing usable is left of the name.
    pub fn resolve(&self, name: &str) -> Option<(String, PathBuf)> {
        let stored_name = secure_filename(name);
        if stored_name.is_empty() {
            return None;
        }
        let path = self.upload_dir.join(&stored_name);
        Some((stored_name, path))
    }

    /// Validate and write an upload. `Ok(None)` means the filename
    /// sanitized to nothing and no file was written.
    pub async fn save(
        &self,
        original_name: &str,
        data: &[u8],
    ) -> Result<Option<UploadedFile>, UploadError> {
        if !allowed_file(original_name) {
            debug!(filename = %original_name, "Rejected upload with disallowed extension");
            return Err(UploadError::DisallowedExtension {
                filename: original_name.to_string(),
            });
        }

        let Some((stored_name, path)) = self.resolve(original_name) else {
            debug!(filename = %original_name, "Upload filename sanitized to nothing");
            return Ok(None);
        };

        self.ensure_dir().await?;
        fs::write(&path, data).await?;

        info!(
            original = %original_name,
            stored = %stored_name,
            bytes = data.len(),
            "Stored upload"
        );

        Ok(Some(UploadedFile {
            stored_name,
            path,
        }))
    }
}
