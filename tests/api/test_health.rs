// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Health endpoint tests

use axum::http::StatusCode;

use super::helpers::*;

#[cfg(test)]
mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_capture_count() {
        let app = TestApp::new();

        let (status, body) = app.get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["captures"], 0);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

        app.register(r#"{"jltf_path": "den.jltf"}"#).await;

        let (_, body) = app.get("/health").await;
        assert_eq!(body["captures"], 1);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = TestApp::new();

        let (status, _) = app.get("/api/does-not-exist").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
