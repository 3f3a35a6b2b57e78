// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! SQLite-backed capture metadata store
//!
//! A single `room_layout` table holds one row per capture. The connection is
//! owned by the store and serialized behind a mutex, so every public method
//! runs as one statement (or one transaction) against the database.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, types::Type, Connection, ErrorCode, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::errors::{StoreError, StoreResult};
use crate::capture::{CaptureRecord, CaptureSource, NewCapture, DEFAULT_STATUS};

const CREATE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS room_layout (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        capture_slug    TEXT NOT NULL UNIQUE,
        status          TEXT NOT NULL DEFAULT 'active',
        model_path      TEXT,
        created_at      TEXT NOT NULL,
        image_paths     TEXT,
        jltf_path       TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_room_layout_created_at
        ON room_layout(created_at DESC);
";

const DROP_SCHEMA: &str = "
    DROP INDEX IF EXISTS idx_room_layout_created_at;
    DROP TABLE IF EXISTS room_layout;
";

const SELECT_COLUMNS: &str =
    "SELECT id, capture_slug, status, model_path, created_at, image_paths, jltf_path FROM room_layout";

/// Persistent store of capture records
pub struct CaptureStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl CaptureStore {
    /// Open (or create) the database file at `path` and ensure the schema exists
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(CREATE_SCHEMA)?;
        info!("Capture database ready at {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// In-memory store, used by tests
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Drop every record and recreate the schema
    pub fn reset(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(DROP_SCHEMA)?;
        conn.execute_batch(CREATE_SCHEMA)?;
        info!("Capture database reinitialized");
        Ok(())
    }

    /// Persist a new capture stamped with the current time
    pub fn insert(&self, capture: &NewCapture) -> StoreResult<CaptureRecord> {
        self.insert_at(capture, Utc::now())
    }

    /// Persist a new capture with an explicit creation time
    pub fn insert_at(
        &self,
        capture: &NewCapture,
        created_at: DateTime<Utc>,
    ) -> StoreResult<CaptureRecord> {
        let created_at = created_at.trunc_subsecs(6);
        let image_paths = capture
            .source
            .image_paths()
            .map(|paths| serde_json::to_string(paths))
            .transpose()?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO room_layout (capture_slug, status, model_path, created_at, image_paths, jltf_path)
             VALUES (?1, ?2, NULL, ?3, ?4, ?5)",
            params![
                capture.capture_slug,
                DEFAULT_STATUS,
                format_timestamp(&created_at),
                image_paths,
                capture.source.jltf_path(),
            ],
        )
        .map_err(|e| map_constraint(e, &capture.capture_slug))?;

        let id = conn.last_insert_rowid();
        debug!("Inserted capture {} with id {}", capture.capture_slug, id);

        Ok(CaptureRecord {
            id,
            capture_slug: capture.capture_slug.clone(),
            status: DEFAULT_STATUS.to_string(),
            model_path: None,
            created_at,
            source: capture.source.clone(),
        })
    }

    /// All captures, most recent first
    pub fn list(&self) -> StoreResult<Vec<CaptureRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map([], record_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get(&self, id: i64) -> StoreResult<Option<CaptureRecord>> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    pub fn find_by_slug(&self, capture_slug: &str) -> StoreResult<Option<CaptureRecord>> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                &format!("{} WHERE capture_slug = ?1", SELECT_COLUMNS),
                params![capture_slug],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Point a capture at its generated model artifact.
    ///
    /// Returns `false` when no capture has this slug. Status is left untouched.
    pub fn set_model_path(&self, capture_slug: &str, model_path: &str) -> StoreResult<bool> {
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE room_layout SET model_path = ?1 WHERE capture_slug = ?2",
            params![model_path, capture_slug],
        )?;
        Ok(updated == 1)
    }

    pub fn count(&self) -> StoreResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM room_layout", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

fn map_constraint(err: rusqlite::Error, capture_slug: &str) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(ref e, _) if e.code == ErrorCode::ConstraintViolation => {
            StoreError::DuplicateSlug(capture_slug.to_string())
        }
        other => StoreError::Sqlite(other),
    }
}

// Fixed-width UTC so that text ordering matches time ordering
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<CaptureRecord> {
    let created_raw: String = row.get(4)?;
    let created_at = parse_timestamp(&created_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    let image_paths: Option<String> = row.get(5)?;
    let jltf_path: Option<String> = row.get(6)?;

    let source = match jltf_path {
        Some(jltf_path) => CaptureSource::Reference { jltf_path },
        None => {
            let image_paths = match image_paths {
                Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
                })?,
                None => Vec::new(),
            };
            CaptureSource::Images { image_paths }
        }
    };

    Ok(CaptureRecord {
        id: row.get(0)?,
        capture_slug: row.get(1)?,
        status: row.get(2)?,
        model_path: row.get(3)?,
        created_at,
        source,
    })
}
