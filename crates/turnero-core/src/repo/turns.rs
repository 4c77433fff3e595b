//! Turn repository.

use uuid::Uuid;

use super::{Notification, Notifier};
use crate::models::{TurnDraft, TurnStatus, TurnWithPatient};
use crate::store::TurnStore;

/// Owns the cached turn collection (patient-joined) and mediates all remote
/// access to it.
pub struct TurnRepository<S, N> {
    store: S,
    notifier: N,
    turns: Vec<TurnWithPatient>,
    loading: bool,
    error: Option<String>,
    revision: u64,
}

impl<S: TurnStore, N: Notifier> TurnRepository<S, N> {
    /// Empty repository; call [`refresh`](Self::refresh) once at startup to
    /// populate it.
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            turns: Vec::new(),
            loading: false,
            error: None,
            revision: 0,
        }
    }

    /// The cached collection, in (date, time) order as fetched.
    pub fn turns(&self) -> &[TurnWithPatient] {
        &self.turns
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed fetch, cleared by a successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Bumped on every cache change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the cache wholesale from the store.
    pub fn refresh(&mut self) {
        self.loading = true;
        match self.store.list_turns() {
            Ok(turns) => {
                tracing::debug!(count = turns.len(), "turns refreshed");
                self.turns = turns;
                self.error = None;
                self.revision += 1;
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!("turn refresh failed: {message}");
                self.error = Some(message.clone());
                self.notifier.notify(Notification::error(message));
            }
        }
        self.loading = false;
    }

    /// Book a turn; the cache gains the joined record only after the store
    /// confirms.
    pub fn create(&mut self, draft: &TurnDraft) -> Option<TurnWithPatient> {
        match self.store.insert_turn(draft) {
            Ok(created) => {
                self.turns.push(created.clone());
                self.revision += 1;
                self.notifier.notify(Notification::info(
                    "Turno creado",
                    format!("Turno creado para {}", created.patient.full_name()),
                ));
                Some(created)
            }
            Err(err) => {
                tracing::warn!("turn create failed: {err}");
                self.notifier.notify(Notification::error(err.to_string()));
                None
            }
        }
    }

    /// Full-record update. Replaces the matching cached record in place;
    /// any failure leaves the cache untouched and returns `false`.
    pub fn update(&mut self, id: Uuid, draft: &TurnDraft) -> bool {
        match self.store.update_turn(id, draft) {
            Ok(Some(updated)) => {
                if let Some(cached) = self.turns.iter_mut().find(|t| t.turn.id == id) {
                    *cached = updated;
                    self.revision += 1;
                }
                self.notifier.notify(Notification::info(
                    "Turno actualizado",
                    "El turno se actualizó correctamente",
                ));
                true
            }
            Ok(None) => {
                self.notifier
                    .notify(Notification::error(format!("turn {id} not found")));
                false
            }
            Err(err) => {
                tracing::warn!("turn update failed: {err}");
                self.notifier.notify(Notification::error(err.to_string()));
                false
            }
        }
    }

    /// Status transition (confirm/cancel): re-drafts the cached record with
    /// the new status and submits it as a normal update.
    pub fn set_status(&mut self, id: Uuid, status: TurnStatus) -> bool {
        let Some(cached) = self.turns.iter().find(|t| t.turn.id == id) else {
            self.notifier
                .notify(Notification::error(format!("turn {id} not found")));
            return false;
        };

        let mut draft = TurnDraft::from(&cached.turn);
        draft.status = status;
        self.update(id, &draft)
    }

    /// Delete a turn, removing it from the cache on confirmation.
    pub fn delete(&mut self, id: Uuid) -> bool {
        match self.store.delete_turn(id) {
            Ok(true) => {
                self.turns.retain(|t| t.turn.id != id);
                self.revision += 1;
                self.notifier.notify(Notification::info(
                    "Turno eliminado",
                    "El turno fue eliminado correctamente",
                ));
                true
            }
            Ok(false) => {
                self.notifier
                    .notify(Notification::error(format!("turn {id} not found")));
                false
            }
            Err(err) => {
                tracing::warn!("turn delete failed: {err}");
                self.notifier.notify(Notification::error(err.to_string()));
                false
            }
        }
    }

    /// Read-through history lookup, most recent first; failures come back as
    /// an empty list, silently.
    pub fn turns_by_patient(&self, patient_id: Uuid) -> Vec<TurnWithPatient> {
        self.store.turns_by_patient(patient_id).unwrap_or_default()
    }
}
