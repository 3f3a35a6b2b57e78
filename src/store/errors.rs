// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the capture metadata store

use thiserror::Error;

/// Errors raised by [`CaptureStore`](super::CaptureStore)
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying SQLite failure
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The `image_paths` column could not be encoded as JSON
    #[error("failed to encode image paths: {0}")]
    Encode(#[from] serde_json::Error),

    /// Another capture already owns this slug
    #[error("capture slug already exists: {0}")]
    DuplicateSlug(String),

    /// Could not create the directory holding the database file
    #[error("failed to create database directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    /// A thread panicked while holding the connection
    #[error("database connection lock poisoned")]
    LockPoisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;
