// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the capture backend server

use axum::http::HeaderValue;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Maximum accepted request body (16 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5001";
pub const DEFAULT_UPLOAD_ROOT: &str = "uploads";
pub const DEFAULT_DATABASE_PATH: &str = "room_layouts.db";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Roomify capture backend
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "roomify-backend")]
#[command(about = "Collects room-capture photo sets and serves generated models", long_about = None)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "ROOMIFY_LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Directory receiving one subdirectory per capture
    #[arg(long, env = "ROOMIFY_UPLOAD_ROOT", default_value = DEFAULT_UPLOAD_ROOT)]
    pub upload_root: PathBuf,

    /// SQLite database file holding capture metadata
    #[arg(long, env = "ROOMIFY_DATABASE_PATH", default_value = DEFAULT_DATABASE_PATH)]
    pub database_path: PathBuf,

    /// The single origin allowed to make cross-origin requests
    #[arg(long, env = "ROOMIFY_CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,

    /// Request body cap in bytes
    #[arg(long, env = "ROOMIFY_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Drop and recreate the capture table on startup
    #[arg(long, env = "ROOMIFY_RESET_DB")]
    pub reset_db: bool,
}

impl ServerConfig {
    /// Parsed listen address
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.listen_addr
            .parse()
            .map_err(|e| format!("Invalid listen address '{}': {}", self.listen_addr, e))
    }

    /// CORS origin as a header value
    pub fn cors_origin_header(&self) -> Result<HeaderValue, String> {
        HeaderValue::from_str(&self.cors_origin)
            .map_err(|e| format!("Invalid CORS origin '{}': {}", self.cors_origin, e))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;
        self.cors_origin_header()?;
        if !(self.cors_origin.starts_with("http://") || self.cors_origin.starts_with("https://")) {
            return Err(format!(
                "CORS origin must start with http:// or https://, got '{}'",
                self.cors_origin
            ));
        }
        if self.max_body_bytes == 0 {
            return Err("Max body size must be greater than 0".to_string());
        }
        if self.upload_root.as_os_str().is_empty() {
            return Err("Upload root must not be empty".to_string());
        }
        if self.database_path.as_os_str().is_empty() {
            return Err("Database path must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            upload_root: PathBuf::from(DEFAULT_UPLOAD_ROOT),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            reset_db: false,
        }
    }
}
