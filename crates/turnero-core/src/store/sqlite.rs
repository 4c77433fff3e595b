//! SQLite-backed store.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::Connection;
use uuid::Uuid;

use super::{StoreResult, SCHEMA};
use crate::models::{Slot, TurnStatus};

/// Store backed by a local SQLite database.
///
/// Stands in for the hosted backend: it assigns record ids and timestamps on
/// insert, the way the remote store would.
pub struct SqliteStore {
    pub(super) conn: Connection,
}

impl SqliteStore {
    /// Open the store at `path`, creating the schema if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.initialize()?;
        Ok(store)
    }

    /// In-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Raw connection, for advanced queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

// Column decoding helpers. Columns are TEXT; a value that fails to parse is
// reported as a conversion failure at its column index.

fn conversion_err(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub(super) fn decode_uuid(idx: usize, raw: String) -> rusqlite::Result<Uuid> {
    raw.parse().map_err(|e| conversion_err(idx, e))
}

pub(super) fn decode_date(idx: usize, raw: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| conversion_err(idx, e))
}

pub(super) fn decode_opt_date(idx: usize, raw: Option<String>) -> rusqlite::Result<Option<NaiveDate>> {
    raw.map(|s| decode_date(idx, s)).transpose()
}

pub(super) fn decode_slot(idx: usize, raw: String) -> rusqlite::Result<Slot> {
    raw.parse().map_err(|e| conversion_err(idx, e))
}

pub(super) fn decode_status(idx: usize, raw: String) -> rusqlite::Result<TurnStatus> {
    raw.parse().map_err(|e| conversion_err(idx, e))
}

pub(super) fn decode_timestamp(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_err(idx, e))
}

/// Storage form of a date column.
pub(super) fn encode_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Storage form of a timestamp column.
pub(super) fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}
