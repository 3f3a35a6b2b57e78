// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local file storage for capture photos and model artifacts

pub mod filenames;
pub mod local;

pub use filenames::{allowed_file, sanitize_filename, stored_filename, ImageExtension};
pub use local::{model_content_type, CaptureStorage, StorageError, StorageResult, MODELS_DIR};
