//! Patient store operations.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::sqlite::{
    decode_opt_date, decode_timestamp, decode_uuid, encode_date, encode_timestamp,
};
use super::{PatientStore, SqliteStore, StoreResult};
use crate::models::{Patient, PatientDraft};

const PATIENT_COLUMNS: &str = "id, dni, first_name, last_name, email, phone, \
     birth_date, health_insurance, allergies, notes, created_at, updated_at";

/// Decode a patient starting at column `base` of a row.
pub(super) fn patient_at(row: &Row<'_>, base: usize) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: decode_uuid(base, row.get(base)?)?,
        dni: row.get(base + 1)?,
        first_name: row.get(base + 2)?,
        last_name: row.get(base + 3)?,
        email: row.get(base + 4)?,
        phone: row.get(base + 5)?,
        birth_date: decode_opt_date(base + 6, row.get(base + 6)?)?,
        health_insurance: row.get(base + 7)?,
        allergies: row.get(base + 8)?,
        notes: row.get(base + 9)?,
        created_at: decode_timestamp(base + 10, row.get(base + 10)?)?,
        updated_at: decode_timestamp(base + 11, row.get(base + 11)?)?,
    })
}

impl PatientStore for SqliteStore {
    fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY last_name, first_name"
        ))?;

        let rows = stmt.query_map([], |row| patient_at(row, 0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn insert_patient(&self, draft: &PatientDraft) -> StoreResult<Patient> {
        let now = Utc::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            dni: draft.dni.clone(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            birth_date: draft.birth_date,
            health_insurance: draft.health_insurance.clone(),
            allergies: draft.allergies.clone(),
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        self.conn.execute(
            "INSERT INTO patients (
                id, dni, first_name, last_name, email, phone,
                birth_date, health_insurance, allergies, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                patient.id.to_string(),
                patient.dni,
                patient.first_name,
                patient.last_name,
                patient.email,
                patient.phone,
                patient.birth_date.map(encode_date),
                patient.health_insurance,
                patient.allergies,
                patient.notes,
                encode_timestamp(patient.created_at),
                encode_timestamp(patient.updated_at),
            ],
        )?;

        Ok(patient)
    }

    fn update_patient(&self, id: Uuid, draft: &PatientDraft) -> StoreResult<Option<Patient>> {
        let rows_affected = self.conn.execute(
            "UPDATE patients SET
                dni = ?2,
                first_name = ?3,
                last_name = ?4,
                email = ?5,
                phone = ?6,
                birth_date = ?7,
                health_insurance = ?8,
                allergies = ?9,
                notes = ?10,
                updated_at = ?11
            WHERE id = ?1",
            params![
                id.to_string(),
                draft.dni,
                draft.first_name,
                draft.last_name,
                draft.email,
                draft.phone,
                draft.birth_date.map(encode_date),
                draft.health_insurance,
                draft.allergies,
                draft.notes,
                encode_timestamp(Utc::now()),
            ],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }
        self.get_patient(id)
    }

    fn delete_patient(&self, id: Uuid) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?", [id.to_string()])?;
        Ok(rows_affected > 0)
    }

    fn search_patients(&self, query: &str) -> StoreResult<Vec<Patient>> {
        let pattern = format!("%{}%", query);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients
             WHERE first_name LIKE ?1 OR last_name LIKE ?1 OR dni LIKE ?1
             ORDER BY last_name, first_name"
        ))?;

        let rows = stmt.query_map([pattern], |row| patient_at(row, 0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn get_patient(&self, id: Uuid) -> StoreResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?"),
                [id.to_string()],
                |row| patient_at(row, 0),
            )
            .optional()
            .map_err(Into::into)
    }
}
