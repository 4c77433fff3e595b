//! Turn (appointment) records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{Patient, Slot};

/// Services offered on the booking form.
pub const DEFAULT_SERVICES: [&str; 5] = [
    "Consulta General",
    "Consulta Especializada",
    "Control de Rutina",
    "Urgencia",
    "Procedimiento",
];

/// Appointment lifecycle tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnStatus {
    Confirmed,
    Pending,
    Cancelled,
}

/// Parse error for status strings coming off the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown turn status: {0}")]
pub struct UnknownStatus(pub String);

impl TurnStatus {
    pub const ALL: [TurnStatus; 3] = [
        TurnStatus::Confirmed,
        TurnStatus::Pending,
        TurnStatus::Cancelled,
    ];

    /// Storage/wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnStatus::Confirmed => "confirmed",
            TurnStatus::Pending => "pending",
            TurnStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(TurnStatus::Confirmed),
            "pending" => Ok(TurnStatus::Pending),
            "cancelled" => Ok(TurnStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// An appointment linking a patient, a service, and a date+time slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// Free-text service category, normally from [`DEFAULT_SERVICES`].
    pub service: String,
    pub date: NaiveDate,
    pub time: Slot,
    pub status: TurnStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Turn {
    pub fn is_cancelled(&self) -> bool {
        self.status == TurnStatus::Cancelled
    }

    /// Sort key for chronological ordering.
    pub fn chronological_key(&self) -> (NaiveDate, Slot) {
        (self.date, self.time)
    }
}

/// The caller-provided shape for turn inserts and updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurnDraft {
    pub patient_id: Uuid,
    pub service: String,
    pub date: NaiveDate,
    pub time: Slot,
    pub status: TurnStatus,
    pub notes: Option<String>,
}

impl TurnDraft {
    /// New booking in the form's default state (pending).
    pub fn new(patient_id: Uuid, service: impl Into<String>, date: NaiveDate, time: Slot) -> Self {
        Self {
            patient_id,
            service: service.into(),
            date,
            time,
            status: TurnStatus::Pending,
            notes: None,
        }
    }
}

impl From<&Turn> for TurnDraft {
    fn from(turn: &Turn) -> Self {
        Self {
            patient_id: turn.patient_id,
            service: turn.service.clone(),
            date: turn.date,
            time: turn.time,
            status: turn.status,
            notes: turn.notes.clone(),
        }
    }
}

/// A turn denormalized with its patient record.
///
/// Turn reads embed the joined patient so views never need a second lookup.
/// Serializes as the turn's fields with the patient nested under `patient`,
/// matching the backend's joined read shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurnWithPatient {
    #[serde(flatten)]
    pub turn: Turn,
    pub patient: Patient,
}

impl TurnWithPatient {
    /// Case-insensitive substring match over patient name, service, and phone.
    ///
    /// An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.patient.full_name().to_lowercase().contains(&query)
            || self.turn.service.to_lowercase().contains(&query)
            || self.patient.phone.contains(&query)
    }
}
