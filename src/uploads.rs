use crate::error::AppError;
use chrono::{DateTime, Local};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Manages the upload directory: bootstrap, stored-name generation and the
/// file operations behind the upload routes. Stored names are
/// `YYYY-MM-DD HH:mm-<original>` at minute resolution, so two uploads of
/// the same original name within one minute overwrite each other
/// (last writer wins) — a known weakness kept because the name format is
/// part of the external interface.
#[derive(Clone)]
pub struct UploadManager {
    dir: PathBuf,
}

impl UploadManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory (and parents) if absent. Idempotent.
    pub async fn ensure_directory(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("creating upload directory: {e}")))
    }

    /// Write an upload under its generated name. The size cap is checked
    /// before anything touches the disk.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<String, AppError> {
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::PayloadTooLarge);
        }

        let original = sanitize(original_name)?;
        let name = stored_name(Local::now(), original);
        tokio::fs::write(self.dir.join(&name), data)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("writing upload: {e}")))?;

        Ok(name)
    }

    /// Remove a stored file. Never touches post rows; any consistency with
    /// `image_location` is the caller's business.
    pub async fn delete(&self, stored_name: &str) -> Result<(), AppError> {
        let name = sanitize(stored_name)?;
        match tokio::fs::remove_file(self.dir.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound),
            Err(e) => Err(AppError::StorageUnavailable(format!("deleting upload: {e}"))),
        }
    }

    /// Filenames currently in the directory, in no particular order.
    pub async fn list(&self) -> Result<Vec<String>, AppError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("reading upload directory: {e}")))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("reading upload directory: {e}")))?
        {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(names)
    }

    pub async fn read(&self, stored_name: &str) -> Result<Vec<u8>, AppError> {
        let name = sanitize(stored_name)?;
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound),
            Err(e) => Err(AppError::StorageUnavailable(format!("reading upload: {e}"))),
        }
    }
}

/// Filenames come from request paths and multipart metadata; anything that
/// could escape the managed directory is rejected outright.
fn sanitize(name: &str) -> Result<&str, AppError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(AppError::invalid_input("invalid filename"));
    }
    Ok(name)
}

/// Minute-resolution stamp, no seconds.
fn stored_name(now: DateTime<Local>, original_name: &str) -> String {
    format!("{}-{}", now.format("%Y-%m-%d %H:%M"), original_name)
}
