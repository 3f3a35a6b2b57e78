// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod captures;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::server::{DEFAULT_DATABASE_PATH, DEFAULT_UPLOAD_ROOT};
use crate::ingest::IngestService;
use crate::storage::CaptureStorage;
use crate::store::CaptureStore;

/// Roomify capture maintenance CLI
#[derive(Parser, Debug)]
#[command(name = "roomify-cli")]
#[command(version)]
#[command(about = "Inspect and maintain Roomify capture records", long_about = None)]
pub struct Cli {
    /// SQLite database file holding capture metadata
    #[arg(long, global = true, env = "ROOMIFY_DATABASE_PATH", default_value = DEFAULT_DATABASE_PATH)]
    pub database: PathBuf,

    /// Upload root the captures were stored under
    #[arg(long, global = true, env = "ROOMIFY_UPLOAD_ROOT", default_value = DEFAULT_UPLOAD_ROOT)]
    pub upload_root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all captures, most recent first
    List(captures::ListArgs),

    /// Show one capture by slug
    Show(captures::ShowArgs),

    /// Record the generated model file of a capture
    AttachModel(captures::AttachModelArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    dotenv::dotenv().ok();

    let store = CaptureStore::open(&cli.database)
        .with_context(|| format!("opening database {}", cli.database.display()))?;
    let service = IngestService::new(Arc::new(store), CaptureStorage::new(cli.upload_root));

    match cli.command {
        Commands::List(args) => captures::list_captures(&service, args).await,
        Commands::Show(args) => captures::show_capture(&service, args).await,
        Commands::AttachModel(args) => captures::attach_model(&service, args).await,
    }
}
