// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Capture ingestion: photo batches, model references and lookups

use bytes::Bytes;
use std::sync::Arc;
use tokio::fs::File;
use tokio::task;
use tracing::{error, info, warn};

use super::errors::IngestError;
use crate::capture::{
    generate_slug, CaptureRecord, CaptureStatus, NewCapture, SlugKind,
};
use crate::storage::{model_content_type, sanitize_filename, CaptureStorage, ImageExtension};
use crate::store::{CaptureStore, StoreResult};

/// Smallest photo batch accepted for one capture
pub const MIN_IMAGES_PER_CAPTURE: usize = 3;

/// One file taken from an upload request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// An opened model artifact ready to stream
#[derive(Debug)]
pub struct ModelArtifact {
    pub path: String,
    pub file: File,
    pub len: u64,
    pub content_type: &'static str,
}

/// Application-facing capture operations over the store and the upload tree
#[derive(Clone)]
pub struct IngestService {
    store: Arc<CaptureStore>,
    storage: CaptureStorage,
}

impl IngestService {
    pub fn new(store: Arc<CaptureStore>, storage: CaptureStorage) -> Self {
        Self { store, storage }
    }

    pub fn store(&self) -> &CaptureStore {
        &self.store
    }

    pub fn storage(&self) -> &CaptureStorage {
        &self.storage
    }

    /// Check a whole batch before anything is written.
    ///
    /// Extensions are read from the sanitized client name. Returns the allowed
    /// extension of each file, in arrival order.
    pub fn validate_batch(files: &[UploadedFile]) -> Result<Vec<ImageExtension>, IngestError> {
        if files.is_empty() {
            return Err(IngestError::NoFiles);
        }
        if files.len() < MIN_IMAGES_PER_CAPTURE {
            return Err(IngestError::TooFewImages {
                received: files.len(),
            });
        }

        files
            .iter()
            .map(|file| {
                ImageExtension::from_filename(&sanitize_filename(&file.filename))
                    .ok_or_else(|| IngestError::InvalidFileType(file.filename.clone()))
            })
            .collect()
    }

    /// Store a batch of room photos as a new capture
    pub async fn submit_images(
        &self,
        files: Vec<UploadedFile>,
    ) -> Result<CaptureRecord, IngestError> {
        info!("Number of files received: {}", files.len());
        let extensions = Self::validate_batch(&files).map_err(|e| {
            warn!("Rejected upload: {}", e);
            e
        })?;

        let capture_slug = generate_slug(SlugKind::Room);
        match self.persist_batch(&capture_slug, &files, &extensions).await {
            Ok(record) => {
                info!(
                    "Successfully created room layout with slug: {}",
                    record.capture_slug
                );
                Ok(record)
            }
            Err(e) => {
                error!("Error ingesting capture {}: {}", capture_slug, e);
                self.storage.discard_capture_dir(&capture_slug).await;
                Err(e)
            }
        }
    }

    async fn persist_batch(
        &self,
        capture_slug: &str,
        files: &[UploadedFile],
        extensions: &[ImageExtension],
    ) -> Result<CaptureRecord, IngestError> {
        let dir = self.storage.create_capture_dir(capture_slug).await?;

        let mut image_paths = Vec::with_capacity(files.len());
        for (file, ext) in files.iter().zip(extensions) {
            let path = self.storage.write_image(&dir, *ext, &file.bytes).await?;
            info!("Saved {} as {}", file.filename, path.display());
            image_paths.push(path.to_string_lossy().into_owned());
        }

        let capture = NewCapture::images(capture_slug, image_paths);
        self.with_store(move |store| store.insert(&capture)).await
    }

    /// Record a model description that was produced outside this service
    pub async fn register_reference(
        &self,
        jltf_path: Option<&str>,
    ) -> Result<CaptureRecord, IngestError> {
        let jltf_path = match jltf_path {
            Some(path) if !path.is_empty() => path.to_string(),
            _ => return Err(IngestError::MissingReference),
        };

        let capture = NewCapture::reference(generate_slug(SlugKind::Reference), jltf_path);
        let record = self.with_store(move |store| store.insert(&capture)).await?;
        info!(
            "Registered model reference {} as {}",
            record.source.jltf_path().unwrap_or_default(),
            record.capture_slug
        );
        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<CaptureRecord>, IngestError> {
        self.with_store(|store| store.list()).await
    }

    pub async fn count(&self) -> Result<u64, IngestError> {
        self.with_store(|store| store.count()).await
    }

    pub async fn get(&self, id: i64) -> Result<CaptureRecord, IngestError> {
        self.with_store(move |store| store.get(id))
            .await?
            .ok_or(IngestError::IdNotFound(id))
    }

    pub async fn find(&self, capture_slug: &str) -> Result<CaptureRecord, IngestError> {
        let slug = capture_slug.to_string();
        self.with_store(move |store| store.find_by_slug(&slug))
            .await?
            .ok_or_else(|| IngestError::SlugNotFound(capture_slug.to_string()))
    }

    pub async fn status(&self, capture_slug: &str) -> Result<CaptureStatus, IngestError> {
        Ok(self.find(capture_slug).await?.status_view())
    }

    /// Open the generated model of a capture.
    ///
    /// An unknown slug and a capture without a model are reported separately.
    pub async fn open_model(&self, capture_slug: &str) -> Result<ModelArtifact, IngestError> {
        let record = self.find(capture_slug).await?;
        let path = record
            .model_path
            .ok_or_else(|| IngestError::NoModelAvailable(capture_slug.to_string()))?;

        let (file, len) = self.storage.open_model(&path).await?;
        Ok(ModelArtifact {
            content_type: model_content_type(&path),
            path,
            file,
            len,
        })
    }

    /// Point a capture at a generated model artifact
    pub async fn attach_model(
        &self,
        capture_slug: &str,
        model_path: &str,
    ) -> Result<(), IngestError> {
        let (slug, path) = (capture_slug.to_string(), model_path.to_string());
        if self
            .with_store(move |store| store.set_model_path(&slug, &path))
            .await?
        {
            info!("Attached model {} to {}", model_path, capture_slug);
            Ok(())
        } else {
            Err(IngestError::SlugNotFound(capture_slug.to_string()))
        }
    }

    // SQLite calls block; keep them off the async worker threads
    async fn with_store<T, F>(&self, op: F) -> Result<T, IngestError>
    where
        F: FnOnce(&CaptureStore) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        Ok(task::spawn_blocking(move || op(&store)).await??)
    }
}
