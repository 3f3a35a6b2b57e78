// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ingestion service for room captures

pub mod errors;
pub mod service;

pub use errors::IngestError;
pub use service::{IngestService, ModelArtifact, UploadedFile, MIN_IMAGES_PER_CAPTURE};
