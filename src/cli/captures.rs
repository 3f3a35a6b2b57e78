// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use std::path::Path;
use tracing::info;

use crate::capture::{CaptureRecord, CaptureSource};
use crate::ingest::IngestService;

/// Arguments for list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print records as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Capture slug (e.g. room_20250101_120000_a1b2c3d4)
    pub slug: String,
}

/// Arguments for attach-model command
#[derive(Args, Debug)]
pub struct AttachModelArgs {
    /// Capture slug the model belongs to
    pub slug: String,

    /// Path of the generated model artifact
    pub model_path: String,

    /// Record the path even if no file exists there yet
    #[arg(long)]
    pub allow_missing: bool,
}

/// List all captures, most recent first
pub async fn list_captures(service: &IngestService, args: ListArgs) -> Result<()> {
    let records = service.list().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No captures recorded yet");
        return Ok(());
    }

    println!("\n📋 {} capture(s):", records.len());
    for record in &records {
        println!("  {}", summary_line(record));
    }
    Ok(())
}

/// Print one capture as JSON
pub async fn show_capture(service: &IngestService, args: ShowArgs) -> Result<()> {
    let record = service.find(&args.slug).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Record the generated model of a capture
pub async fn attach_model(service: &IngestService, args: AttachModelArgs) -> Result<()> {
    if !args.allow_missing && !Path::new(&args.model_path).is_file() {
        return Err(anyhow!(
            "Model file {} does not exist (use --allow-missing to record it anyway)",
            args.model_path
        ));
    }

    service.attach_model(&args.slug, &args.model_path).await?;
    info!("Model path updated for {}", args.slug);
    println!("✅ Attached {} to {}", args.model_path, args.slug);
    Ok(())
}

fn summary_line(record: &CaptureRecord) -> String {
    let source = match &record.source {
        CaptureSource::Images { image_paths } => format!("{} image(s)", image_paths.len()),
        CaptureSource::Reference { jltf_path } => format!("ref {}", jltf_path),
    };
    format!(
        "#{:<4} {}  {}  {}  {}  model={}",
        record.id,
        record.capture_slug,
        record.status,
        record.created_at.format("%Y-%m-%d %H:%M:%S"),
        source,
        record.model_path.as_deref().unwrap_or("-")
    )
}
