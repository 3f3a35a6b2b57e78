// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Capture API handlers

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::{
    multipart::{MultipartError, MultipartRejection},
    Multipart,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use super::errors::ApiError;
use super::http_server::AppState;
use super::responses::{DataResponse, HealthResponse, RegisterModelRequest, UploadResponse};
use crate::capture::{CaptureRecord, CaptureStatus};
use crate::ingest::{IngestError, UploadedFile};

/// Multipart field carrying room photos
pub const UPLOAD_FIELD: &str = "files[]";

/// POST /api/upload-room - Store a batch of room photos
///
/// # Request
/// `multipart/form-data` with at least 3 `files[]` parts (jpg, jpeg, png, heic)
///
/// # Errors
/// - 400: no files, fewer than 3 files, or a disallowed file type
/// - 413: request body above the configured cap
/// - 500: the capture could not be written or recorded
pub async fn upload_room_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    info!("Received upload room request");

    let mut multipart = multipart.map_err(|_| {
        warn!("Upload request is not multipart/form-data");
        ApiError::from(IngestError::NoFiles)
    })?;
    let files = collect_files(&mut multipart).await?;

    let record = state
        .ingest
        .submit_images(files)
        .await
        .map_err(|e| ApiError::from(e).as_server_error())?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse::new(record.capture_slug)),
    ))
}

async fn collect_files(multipart: &mut Multipart) -> Result<Vec<UploadedFile>, ApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }
        // Parts without a filename are form values, not files
        let Some(filename) = field.file_name().map(str::to_string) else {
            debug!("Ignoring non-file part under {}", UPLOAD_FIELD);
            continue;
        };
        let bytes = field.bytes().await.map_err(multipart_error)?;
        debug!("Received {} ({} bytes)", filename, bytes.len());
        files.push(UploadedFile::new(filename, bytes));
    }
    Ok(files)
}

fn multipart_error(err: MultipartError) -> ApiError {
    warn!("Failed to read multipart body: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::ValidationError(err.body_text())
    }
}

/// GET /api/items - All captures, most recent first
pub async fn list_items_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<CaptureRecord>>>, ApiError> {
    let items = state.ingest.list().await?;
    debug!("Listing {} captures", items.len());
    Ok(Json(DataResponse::new(items)))
}

/// POST /api/items - Register an externally built model description
pub async fn create_item_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterModelRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<CaptureRecord>>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected item body: {}", rejection.body_text());
        ApiError::ValidationError(rejection.body_text())
    })?;

    let record = state
        .ingest
        .register_reference(request.jltf_path.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(record).with_message("Item saved successfully")),
    ))
}

/// GET /api/item/:id - One capture by numeric id
pub async fn get_item_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<CaptureRecord>>, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Capture {} not found", id)))?;
    Ok(Json(DataResponse::new(state.ingest.get(id).await?)))
}

/// GET /api/model/:slug - Stream the generated model of a capture
pub async fn get_model_handler(
    State(state): State<Arc<AppState>>,
    Path(capture_slug): Path<String>,
) -> Result<Response, ApiError> {
    let artifact = state.ingest.open_model(&capture_slug).await.map_err(|e| {
        warn!("Error serving model for {}: {}", capture_slug, e);
        ApiError::from(e)
    })?;

    info!("Serving model {} for {}", artifact.path, capture_slug);
    let body = Body::from_stream(ReaderStream::new(artifact.file));
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_LENGTH, artifact.len.to_string()),
        ],
        body,
    )
        .into_response())
}

/// GET /api/room/:slug/status - Status view of a capture
pub async fn room_status_handler(
    State(state): State<Arc<AppState>>,
    Path(capture_slug): Path<String>,
) -> Result<Json<DataResponse<CaptureStatus>>, ApiError> {
    let status = state.ingest.status(&capture_slug).await.map_err(|e| {
        warn!("Error getting room status for {}: {}", capture_slug, e);
        ApiError::from(e)
    })?;
    Ok(Json(DataResponse::new(status)))
}

/// GET /health - Liveness plus a database round trip
pub async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    let captures = state.ingest.count().await?;
    Ok(Json(HealthResponse::new(captures)))
}
