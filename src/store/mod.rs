// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Capture metadata store

pub mod errors;
pub mod sqlite;

pub use errors::{StoreError, StoreResult};
pub use sqlite::CaptureStore;
