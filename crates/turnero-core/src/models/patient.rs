//! Patient records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A patient record.
///
/// DNI, names, and phone are mandatory at the front desk; everything else is
/// optional context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: Uuid,
    /// National identity document number - the natural key.
    pub dni: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub health_insurance: Option<String>,
    pub allergies: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    /// Display name, "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match over name and DNI.
    ///
    /// An empty query matches every patient, so a cleared search box shows
    /// the full directory.
    pub fn matches_query(&self, query: &str) -> bool {
        let haystack = format!("{} {} {}", self.first_name, self.last_name, self.dni);
        haystack.to_lowercase().contains(&query.to_lowercase())
    }
}

/// The caller-provided shape for patient inserts and updates.
///
/// The store assigns id and timestamps. Updates are full-record: every draft
/// field is written, plus a refreshed `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientDraft {
    pub dni: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub health_insurance: Option<String>,
    pub allergies: Option<String>,
    pub notes: Option<String>,
}

impl PatientDraft {
    /// Create a draft with the mandatory fields only.
    pub fn new(
        dni: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            dni: dni.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            phone: phone.into(),
            birth_date: None,
            health_insurance: None,
            allergies: None,
            notes: None,
        }
    }
}

impl From<&Patient> for PatientDraft {
    /// Re-draft an existing record, e.g. to edit a single field and resubmit.
    fn from(patient: &Patient) -> Self {
        Self {
            dni: patient.dni.clone(),
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            email: patient.email.clone(),
            phone: patient.phone.clone(),
            birth_date: patient.birth_date,
            health_insurance: patient.health_insurance.clone(),
            allergies: patient.allergies.clone(),
            notes: patient.notes.clone(),
        }
    }
}
