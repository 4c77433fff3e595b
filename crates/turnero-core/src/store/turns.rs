//! Turn store operations.
//!
//! Every read joins the patient row so callers get the denormalized
//! [`TurnWithPatient`] shape directly.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::patients::patient_at;
use super::sqlite::{
    decode_date, decode_slot, decode_status, decode_timestamp, decode_uuid, encode_date,
    encode_timestamp,
};
use super::{PatientStore, SqliteStore, StoreError, StoreResult, TurnStore};
use crate::models::{Turn, TurnDraft, TurnWithPatient};

/// Joined select list: 9 turn columns, then the 12 patient columns.
const JOINED_COLUMNS: &str = "t.id, t.patient_id, t.service, t.date, t.time, t.status, t.notes, \
     t.created_at, t.updated_at, \
     p.id, p.dni, p.first_name, p.last_name, p.email, p.phone, \
     p.birth_date, p.health_insurance, p.allergies, p.notes, p.created_at, p.updated_at";

fn joined_at(row: &Row<'_>) -> rusqlite::Result<TurnWithPatient> {
    let turn = Turn {
        id: decode_uuid(0, row.get(0)?)?,
        patient_id: decode_uuid(1, row.get(1)?)?,
        service: row.get(2)?,
        date: decode_date(3, row.get(3)?)?,
        time: decode_slot(4, row.get(4)?)?,
        status: decode_status(5, row.get(5)?)?,
        notes: row.get(6)?,
        created_at: decode_timestamp(7, row.get(7)?)?,
        updated_at: decode_timestamp(8, row.get(8)?)?,
    };
    Ok(TurnWithPatient {
        turn,
        patient: patient_at(row, 9)?,
    })
}

impl SqliteStore {
    fn fetch_turn(&self, id: Uuid) -> StoreResult<Option<TurnWithPatient>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {JOINED_COLUMNS} FROM turns t
                     JOIN patients p ON p.id = t.patient_id
                     WHERE t.id = ?"
                ),
                [id.to_string()],
                joined_at,
            )
            .optional()
            .map_err(Into::into)
    }
}

impl TurnStore for SqliteStore {
    fn list_turns(&self) -> StoreResult<Vec<TurnWithPatient>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {JOINED_COLUMNS} FROM turns t
             JOIN patients p ON p.id = t.patient_id
             ORDER BY t.date, t.time"
        ))?;

        let rows = stmt.query_map([], joined_at)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn insert_turn(&self, draft: &TurnDraft) -> StoreResult<TurnWithPatient> {
        // Surface a missing patient as a constraint violation rather than a
        // raw foreign-key failure.
        let patient = self
            .get_patient(draft.patient_id)?
            .ok_or_else(|| {
                StoreError::Constraint(format!("turn references unknown patient {}", draft.patient_id))
            })?;

        let now = Utc::now();
        let turn = Turn {
            id: Uuid::new_v4(),
            patient_id: draft.patient_id,
            service: draft.service.clone(),
            date: draft.date,
            time: draft.time,
            status: draft.status,
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        self.conn.execute(
            "INSERT INTO turns (
                id, patient_id, service, date, time, status, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                turn.id.to_string(),
                turn.patient_id.to_string(),
                turn.service,
                encode_date(turn.date),
                turn.time.to_string(),
                turn.status.as_str(),
                turn.notes,
                encode_timestamp(turn.created_at),
                encode_timestamp(turn.updated_at),
            ],
        )?;

        Ok(TurnWithPatient { turn, patient })
    }

    fn update_turn(&self, id: Uuid, draft: &TurnDraft) -> StoreResult<Option<TurnWithPatient>> {
        if self.get_patient(draft.patient_id)?.is_none() {
            return Err(StoreError::Constraint(format!(
                "turn references unknown patient {}",
                draft.patient_id
            )));
        }

        let rows_affected = self.conn.execute(
            "UPDATE turns SET
                patient_id = ?2,
                service = ?3,
                date = ?4,
                time = ?5,
                status = ?6,
                notes = ?7,
                updated_at = ?8
            WHERE id = ?1",
            params![
                id.to_string(),
                draft.patient_id.to_string(),
                draft.service,
                encode_date(draft.date),
                draft.time.to_string(),
                draft.status.as_str(),
                draft.notes,
                encode_timestamp(Utc::now()),
            ],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }
        self.fetch_turn(id)
    }

    fn delete_turn(&self, id: Uuid) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM turns WHERE id = ?", [id.to_string()])?;
        Ok(rows_affected > 0)
    }

    fn turns_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<TurnWithPatient>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {JOINED_COLUMNS} FROM turns t
             JOIN patients p ON p.id = t.patient_id
             WHERE t.patient_id = ?
             ORDER BY t.date DESC, t.time DESC"
        ))?;

        let rows = stmt.query_map([patient_id.to_string()], joined_at)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
