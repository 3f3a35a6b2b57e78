// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local-disk layout for capture uploads and generated models
//!
//! ```text
//! <upload_root>/
//!   models/            generated model artifacts (filled by external tooling)
//!   <capture_slug>/    one directory per uploaded capture
//!     <token>.<ext>
//! ```

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

use super::filenames::{stored_filename, ImageExtension};

/// Name of the reserved subdirectory for generated model artifacts
pub const MODELS_DIR: &str = "models";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        StorageError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            StorageError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Upload directory tree rooted at a configured path
#[derive(Debug, Clone)]
pub struct CaptureStorage {
    upload_root: PathBuf,
}

impl CaptureStorage {
    pub fn new(upload_root: impl Into<PathBuf>) -> Self {
        Self {
            upload_root: upload_root.into(),
        }
    }

    pub fn upload_root(&self) -> &Path {
        &self.upload_root
    }

    pub fn models_dir(&self) -> PathBuf {
        self.upload_root.join(MODELS_DIR)
    }

    pub fn capture_dir(&self, capture_slug: &str) -> PathBuf {
        self.upload_root.join(capture_slug)
    }

    /// Create the upload root and the reserved models directory
    pub async fn ensure_layout(&self) -> StorageResult<()> {
        let models = self.models_dir();
        fs::create_dir_all(&models)
            .await
            .map_err(|e| StorageError::io("create directory", &models, e))?;
        info!("Upload root ready at {}", self.upload_root.display());
        Ok(())
    }

    /// Create the directory that will hold one capture's photos
    pub async fn create_capture_dir(&self, capture_slug: &str) -> StorageResult<PathBuf> {
        let dir = self.capture_dir(capture_slug);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::io("create directory", &dir, e))?;
        Ok(dir)
    }

    /// Write one photo into `dir` under a fresh random name; returns its path
    pub async fn write_image(
        &self,
        dir: &Path,
        ext: ImageExtension,
        bytes: &[u8],
    ) -> StorageResult<PathBuf> {
        let path = dir.join(stored_filename(ext));
        fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::io("write", &path, e))?;
        debug!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    /// Remove a capture directory after a failed ingest. Failures are logged only.
    pub async fn discard_capture_dir(&self, capture_slug: &str) {
        let dir = self.capture_dir(capture_slug);
        if let Err(e) = fs::remove_dir_all(&dir).await {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to clean up {}: {}", dir.display(), e);
            }
        }
    }

    /// Open a model artifact for streaming
    pub async fn open_model(&self, model_path: &str) -> StorageResult<(fs::File, u64)> {
        let path = Path::new(model_path);
        let file = fs::File::open(path)
            .await
            .map_err(|e| StorageError::io("open", path, e))?;
        let len = file
            .metadata()
            .await
            .map_err(|e| StorageError::io("stat", path, e))?
            .len();
        Ok((file, len))
    }
}

/// Content type for a model artifact, chosen by extension
pub fn model_content_type(model_path: &str) -> &'static str {
    let ext = Path::new(model_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("glb") => "model/gltf-binary",
        Some("gltf") => "model/gltf+json",
        _ => "application/octet-stream",
    }
}
