// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Capture domain types: records, status views and slugs

pub mod record;
pub mod slug;

pub use record::{CaptureRecord, CaptureSource, CaptureStatus, NewCapture, DEFAULT_STATUS};
pub use slug::{generate_slug, generate_slug_at, SlugKind};
