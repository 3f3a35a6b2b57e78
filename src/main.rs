// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use roomify_backend::{
    api::{start_server, AppState},
    config::ServerConfig,
};
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Roomify capture backend...\n");
    println!("📦 BUILD VERSION: {}", roomify_backend::version::VERSION);
    println!("📅 Build Date: {}", roomify_backend::version::BUILD_DATE);
    println!("✨ Features: {}", roomify_backend::version::FEATURES.join(", "));
    println!();

    let config = ServerConfig::parse();
    println!("📁 Upload root: {}", config.upload_root.display());
    println!("🗄️  Database: {}", config.database_path.display());
    println!("🌐 CORS origin: {}", config.cors_origin);

    info!("{}", roomify_backend::version::get_version_string());
    let state = AppState::from_config(config).await?;
    println!("✅ Capture store ready");
    println!("🔧 Press Ctrl+C to stop the server");

    start_server(state).await?;

    println!("👋 Roomify backend stopped");
    Ok(())
}
