//! Backend store for the patient and turn collections.
//!
//! The repositories in [`crate::repo`] talk to the backend only through the
//! [`PatientStore`] and [`TurnStore`] traits, so tests can swap in failing
//! doubles and an embedding app can swap in a remote client. [`SqliteStore`]
//! is the bundled implementation.

mod patients;
mod schema;
mod sqlite;
mod turns;

pub use schema::SCHEMA;
pub use sqlite::SqliteStore;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Patient, PatientDraft, TurnDraft, TurnWithPatient};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Remote operations on the patient collection.
pub trait PatientStore {
    /// Full collection, ordered by last name then first name.
    fn list_patients(&self) -> StoreResult<Vec<Patient>>;

    /// Insert a draft; the store assigns id and timestamps and returns the
    /// committed record.
    fn insert_patient(&self, draft: &PatientDraft) -> StoreResult<Patient>;

    /// Full-record update plus refreshed `updated_at`. `None` when the id is
    /// unknown.
    fn update_patient(&self, id: Uuid, draft: &PatientDraft) -> StoreResult<Option<Patient>>;

    /// Returns whether a record was removed.
    fn delete_patient(&self, id: Uuid) -> StoreResult<bool>;

    /// Case-insensitive substring search over names and DNI, ordered by last
    /// name. An empty query returns the full collection.
    fn search_patients(&self, query: &str) -> StoreResult<Vec<Patient>>;

    fn get_patient(&self, id: Uuid) -> StoreResult<Option<Patient>>;
}

/// Remote operations on the turn collection.
///
/// Every read embeds the joined patient record. Double-booking is not
/// rejected here: two turns may share a slot.
pub trait TurnStore {
    /// Full collection, ordered by date then time ascending.
    fn list_turns(&self) -> StoreResult<Vec<TurnWithPatient>>;

    /// Insert a draft. Referencing an unknown patient is a
    /// [`StoreError::Constraint`].
    fn insert_turn(&self, draft: &TurnDraft) -> StoreResult<TurnWithPatient>;

    /// Full-record update plus refreshed `updated_at`. `None` when the id is
    /// unknown.
    fn update_turn(&self, id: Uuid, draft: &TurnDraft) -> StoreResult<Option<TurnWithPatient>>;

    /// Returns whether a record was removed.
    fn delete_turn(&self, id: Uuid) -> StoreResult<bool>;

    /// A patient's history, most recent date first.
    fn turns_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<TurnWithPatient>>;
}
