// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod capture;
pub mod cli;
pub mod config;
pub mod ingest;
pub mod storage;
pub mod store;
pub mod version;

// Re-export main types
pub use api::{create_app, start_server, AppState};
pub use capture::{CaptureRecord, CaptureSource, CaptureStatus, NewCapture};
pub use config::ServerConfig;
pub use ingest::{IngestError, IngestService, UploadedFile};
pub use storage::CaptureStorage;
pub use store::{CaptureStore, StoreError};
