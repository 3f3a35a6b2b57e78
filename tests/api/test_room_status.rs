// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for GET /api/room/:slug/status

use axum::http::StatusCode;

use super::helpers::*;

#[cfg(test)]
mod room_status_tests {
    use super::*;

    /// Test 1: Fresh upload is active with no model
    #[tokio::test]
    async fn test_status_after_upload() {
        let app = TestApp::new();
        let (_, upload) = app
            .upload(&[("a.jpg", &b"a"[..]), ("b.png", &b"b"[..]), ("c.heic", &b"c"[..])])
            .await;
        let slug = upload["capture_slug"].as_str().unwrap();

        let (status, body) = app.get(&format!("/api/room/{}/status", slug)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["status"], "active");
        assert!(body["data"]["model_path"].is_null());
        assert!(body["data"]["jltf_path"].is_null());
    }

    /// Test 2: Reference captures report their jltf_path
    #[tokio::test]
    async fn test_status_of_reference() {
        let app = TestApp::new();
        let (_, registered) = app.register(r#"{"jltf_path": "scans/den.jltf"}"#).await;
        let slug = registered["data"]["capture_slug"].as_str().unwrap();

        let (status, body) = app.get(&format!("/api/room/{}/status", slug)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["jltf_path"], "scans/den.jltf");
    }

    /// Test 3: Attaching a model fills model_path but leaves status alone
    #[tokio::test]
    async fn test_status_after_model_attached() {
        let app = TestApp::new();
        let (_, upload) = app
            .upload(&[("a.jpg", &b"a"[..]), ("b.jpg", &b"b"[..]), ("c.jpg", &b"c"[..])])
            .await;
        let slug = upload["capture_slug"].as_str().unwrap();

        app.state
            .ingest
            .attach_model(slug, "uploads/models/room.glb")
            .await
            .unwrap();

        let (status, body) = app.get(&format!("/api/room/{}/status", slug)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "active");
        assert_eq!(body["data"]["model_path"], "uploads/models/room.glb");
    }

    /// Test 4: Unknown slug
    #[tokio::test]
    async fn test_status_unknown_slug() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/room/room_nope/status").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Capture 'room_nope' not found");
    }
}
