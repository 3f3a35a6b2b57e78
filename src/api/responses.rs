// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request and response bodies of the capture API

use serde::{Deserialize, Serialize};

const SUCCESS: &str = "success";

/// Body of `POST /api/items`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterModelRequest {
    #[serde(default)]
    pub jltf_path: Option<String>,
}

/// `{status, message?, data}` envelope used by the JSON endpoints
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: SUCCESS.to_string(),
            message: None,
            data,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Body of a successful `POST /api/upload-room`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    pub message: String,
    pub capture_slug: String,
}

impl UploadResponse {
    pub fn new(capture_slug: String) -> Self {
        Self {
            status: SUCCESS.to_string(),
            message: "Upload successful".to_string(),
            capture_slug,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub captures: u64,
}

impl HealthResponse {
    pub fn new(captures: u64) -> Self {
        Self {
            status: SUCCESS.to_string(),
            version: crate::version::VERSION_NUMBER.to_string(),
            captures,
        }
    }
}
