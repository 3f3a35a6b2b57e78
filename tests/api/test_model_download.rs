// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for GET /api/model/:slug
//!
//! These tests verify that:
//! - Unknown slugs and captures without a model are distinct 404s
//! - An attached model streams back byte for byte
//! - The content type follows the model extension
//! - A recorded path with no file behind it is a server error

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};

use super::helpers::*;

async fn download(app: &TestApp, slug: &str) -> axum::response::Response {
    app.send(
        Request::builder()
            .method(Method::GET)
            .uri(format!("/api/model/{}", slug))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

#[cfg(test)]
mod model_download_tests {
    use super::*;

    /// Test 1: Unknown slug
    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/model/room_20250101_000000_deadbeef").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
        assert_eq!(
            body["message"],
            "Capture 'room_20250101_000000_deadbeef' not found"
        );
    }

    /// Test 2: Known capture that has no model yet
    #[tokio::test]
    async fn test_capture_without_model() {
        let app = TestApp::new();
        let (_, registered) = app.register(r#"{"jltf_path": "den.jltf"}"#).await;
        let slug = registered["data"]["capture_slug"].as_str().unwrap();

        let (status, body) = app.get(&format!("/api/model/{}", slug)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No model available");
    }

    /// Test 3: Attached glb streams back with its content type
    #[tokio::test]
    async fn test_download_attached_glb() {
        let app = TestApp::new();
        let (_, registered) = app.register(r#"{"jltf_path": "den.jltf"}"#).await;
        let slug = registered["data"]["capture_slug"].as_str().unwrap().to_string();

        let model_bytes: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
        let model_path = app.tmp.path().join("den.glb");
        std::fs::write(&model_path, &model_bytes).unwrap();
        app.state
            .ingest
            .attach_model(&slug, model_path.to_str().unwrap())
            .await
            .unwrap();

        let response = download(&app, &slug).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "model/gltf-binary"
        );
        assert_eq!(
            response.headers()[header::CONTENT_LENGTH],
            model_bytes.len().to_string().as_str()
        );
        assert_eq!(body_bytes(response).await, model_bytes);
    }

    /// Test 4: Unknown extensions fall back to octet-stream
    #[tokio::test]
    async fn test_download_other_extension() {
        let app = TestApp::new();
        let (_, upload) = app
            .upload(&[("a.jpg", &b"a"[..]), ("b.jpg", &b"b"[..]), ("c.jpg", &b"c"[..])])
            .await;
        let slug = upload["capture_slug"].as_str().unwrap().to_string();

        let model_path = app.tmp.path().join("room.usdz");
        std::fs::write(&model_path, b"usdz-bytes").unwrap();
        app.state
            .ingest
            .attach_model(&slug, model_path.to_str().unwrap())
            .await
            .unwrap();

        let response = download(&app, &slug).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        assert_eq!(body_bytes(response).await, b"usdz-bytes".to_vec());
    }

    /// Test 5: Recorded path without a file is a server error
    #[tokio::test]
    async fn test_missing_model_file_is_server_error() {
        let app = TestApp::new();
        let (_, registered) = app.register(r#"{"jltf_path": "den.jltf"}"#).await;
        let slug = registered["data"]["capture_slug"].as_str().unwrap().to_string();

        let missing = app.tmp.path().join("gone.glb");
        app.state
            .ingest
            .attach_model(&slug, missing.to_str().unwrap())
            .await
            .unwrap();

        let (status, body) = app.get(&format!("/api/model/{}", slug)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
    }
}
