// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Shared setup for the capture API tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use roomify_backend::api::{create_app, AppState};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

pub const BOUNDARY: &str = "roomify-test-boundary";

/// Router plus the state and temp directory backing it
pub struct TestApp {
    pub state: Arc<AppState>,
    pub app: Router,
    pub tmp: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_state(|_| {})
    }

    /// Build the app after letting the caller tweak the state
    pub fn with_state(configure: impl FnOnce(&mut AppState)) -> Self {
        let tmp = TempDir::new().expect("tempdir should be created");
        let mut state = AppState::new_for_test(&tmp.path().join("uploads"));
        configure(&mut state);
        let state = Arc::new(state);
        let app = create_app(state.clone());
        Self { state, app, tmp }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("router should not fail")
    }

    /// Send and decode the JSON body
    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send_json(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn upload(&self, files: &[(&str, &[u8])]) -> (StatusCode, Value) {
        self.send_json(upload_request(files)).await
    }

    pub async fn register(&self, body: &str) -> (StatusCode, Value) {
        self.send_json(
            Request::builder()
                .method(Method::POST)
                .uri("/api/items")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub fn record_count(&self) -> u64 {
        self.state.ingest.store().count().unwrap()
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable")
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

/// multipart/form-data body with one `files[]` part per file
pub fn multipart_body(files: &[(&str, &[u8])]) -> Vec<u8> {
    multipart_body_with_field("files[]", files)
}

pub fn multipart_body_with_field(field: &str, files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, bytes) in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/upload-room")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn upload_request(files: &[(&str, &[u8])]) -> Request<Body> {
    multipart_request(multipart_body(files))
}

/// True for `room_YYYYMMDD_HHMMSS_xxxxxxxx`
pub fn is_room_slug(slug: &str) -> bool {
    let parts: Vec<&str> = slug.split('_').collect();
    parts.len() == 4
        && parts[0] == "room"
        && parts[1].len() == 8
        && parts[1].chars().all(|c| c.is_ascii_digit())
        && parts[2].len() == 6
        && parts[2].chars().all(|c| c.is_ascii_digit())
        && parts[3].len() == 8
        && parts[3]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
