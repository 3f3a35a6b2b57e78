// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Capture record types

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Status every capture starts in
pub const DEFAULT_STATUS: &str = "active";

/// How a capture came into existence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSource {
    /// A batch of uploaded room photos, stored paths in arrival order
    Images { image_paths: Vec<String> },
    /// A model description produced outside this service
    Reference { jltf_path: String },
}

impl CaptureSource {
    pub fn image_paths(&self) -> Option<&[String]> {
        match self {
            CaptureSource::Images { image_paths } => Some(image_paths),
            CaptureSource::Reference { .. } => None,
        }
    }

    pub fn jltf_path(&self) -> Option<&str> {
        match self {
            CaptureSource::Images { .. } => None,
            CaptureSource::Reference { jltf_path } => Some(jltf_path),
        }
    }
}

/// A capture that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCapture {
    pub capture_slug: String,
    pub source: CaptureSource,
}

impl NewCapture {
    pub fn images(capture_slug: impl Into<String>, image_paths: Vec<String>) -> Self {
        Self {
            capture_slug: capture_slug.into(),
            source: CaptureSource::Images { image_paths },
        }
    }

    pub fn reference(capture_slug: impl Into<String>, jltf_path: impl Into<String>) -> Self {
        Self {
            capture_slug: capture_slug.into(),
            source: CaptureSource::Reference {
                jltf_path: jltf_path.into(),
            },
        }
    }
}

/// A persisted capture
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRecord {
    pub id: i64,
    pub capture_slug: String,
    pub status: String,
    pub model_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source: CaptureSource,
}

impl CaptureRecord {
    pub fn status_view(&self) -> CaptureStatus {
        CaptureStatus {
            status: self.status.clone(),
            model_path: self.model_path.clone(),
            jltf_path: self.source.jltf_path().map(str::to_string),
        }
    }
}

/// Flat wire shape; the field that does not apply to the source is `null`
#[derive(Serialize)]
struct CaptureRecordJson<'a> {
    id: i64,
    capture_slug: &'a str,
    status: &'a str,
    model_path: Option<&'a str>,
    created_at: String,
    image_paths: Option<&'a [String]>,
    jltf_path: Option<&'a str>,
}

impl Serialize for CaptureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CaptureRecordJson {
            id: self.id,
            capture_slug: &self.capture_slug,
            status: &self.status,
            model_path: self.model_path.as_deref(),
            created_at: self.created_at.to_rfc3339(),
            image_paths: self.source.image_paths(),
            jltf_path: self.source.jltf_path(),
        }
        .serialize(serializer)
    }
}

/// Narrow view returned by the room status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureStatus {
    pub status: String,
    pub model_path: Option<String>,
    pub jltf_path: Option<String>,
}
