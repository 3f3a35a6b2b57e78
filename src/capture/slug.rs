// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Capture slug generation
//!
//! Slugs look like `room_20250101_120000_a1b2c3d4`: a flow prefix, the local
//! wall-clock time at creation, and 8 random hex characters.

use chrono::{DateTime, Local, TimeZone};
use rand::Rng;
use std::fmt::Display;

/// Number of hex characters in the random suffix
pub const SUFFIX_LEN: usize = 8;

/// Which creation flow a slug belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugKind {
    /// Image batch uploaded through `/api/upload-room`
    Room,
    /// Externally built model registered through `/api/items`
    Reference,
}

impl SlugKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            SlugKind::Room => "room",
            SlugKind::Reference => "test",
        }
    }
}

/// Generate a fresh slug stamped with the current local time
pub fn generate_slug(kind: SlugKind) -> String {
    generate_slug_at(kind, Local::now())
}

/// Generate a slug stamped with `now`
pub fn generate_slug_at<Tz>(kind: SlugKind, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let suffix: u32 = rand::thread_rng().gen();
    format!(
        "{}_{}_{:0width$x}",
        kind.prefix(),
        now.format("%Y%m%d_%H%M%S"),
        suffix,
        width = SUFFIX_LEN
    )
}
