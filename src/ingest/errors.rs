// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error taxonomy of the ingestion service

use thiserror::Error;

use super::service::MIN_IMAGES_PER_CAPTURE;
use crate::storage::StorageError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum IngestError {
    /// The request carried no files at all
    #[error("No files uploaded")]
    NoFiles,

    #[error("At least {} images required", MIN_IMAGES_PER_CAPTURE)]
    TooFewImages { received: usize },

    /// A file whose extension is not on the allow-list
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("jltf_path is required")]
    MissingReference,

    #[error("Capture {0} not found")]
    IdNotFound(i64),

    #[error("Capture '{0}' not found")]
    SlugNotFound(String),

    /// The capture exists but no model has been attached yet
    #[error("No model available")]
    NoModelAvailable(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IngestError {
    /// Caller mistakes, as opposed to lookups that missed or server faults
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            IngestError::NoFiles
                | IngestError::TooFewImages { .. }
                | IngestError::InvalidFileType(_)
                | IngestError::MissingReference
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            IngestError::IdNotFound(_)
                | IngestError::SlugNotFound(_)
                | IngestError::NoModelAvailable(_)
        )
    }
}
