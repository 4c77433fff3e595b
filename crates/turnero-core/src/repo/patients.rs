//! Patient repository.

use uuid::Uuid;

use super::{Notification, Notifier};
use crate::models::{Patient, PatientDraft};
use crate::store::PatientStore;

/// Owns the cached patient collection and mediates all remote access to it.
pub struct PatientRepository<S, N> {
    store: S,
    notifier: N,
    patients: Vec<Patient>,
    loading: bool,
    error: Option<String>,
    revision: u64,
}

impl<S: PatientStore, N: Notifier> PatientRepository<S, N> {
    /// Empty repository; call [`refresh`](Self::refresh) once at startup to
    /// populate it.
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            patients: Vec::new(),
            loading: false,
            error: None,
            revision: 0,
        }
    }

    /// The cached collection, in the store's last-name order.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed fetch, cleared by a successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Bumped on every cache change; lets views detect staleness cheaply.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the cache wholesale from the store.
    ///
    /// On failure the previous cache is kept and the error message is
    /// surfaced both inline and as a notification.
    pub fn refresh(&mut self) {
        self.loading = true;
        match self.store.list_patients() {
            Ok(patients) => {
                tracing::debug!(count = patients.len(), "patients refreshed");
                self.patients = patients;
                self.error = None;
                self.revision += 1;
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!("patient refresh failed: {message}");
                self.error = Some(message.clone());
                self.notifier.notify(Notification::error(message));
            }
        }
        self.loading = false;
    }

    /// Create a patient; the cache gains the server-assigned record only
    /// after the store confirms.
    pub fn create(&mut self, draft: &PatientDraft) -> Option<Patient> {
        match self.store.insert_patient(draft) {
            Ok(patient) => {
                self.patients.push(patient.clone());
                self.revision += 1;
                self.notifier.notify(Notification::info(
                    "Paciente creado",
                    format!("{} agregado correctamente", patient.full_name()),
                ));
                Some(patient)
            }
            Err(err) => {
                tracing::warn!("patient create failed: {err}");
                self.notifier.notify(Notification::error(err.to_string()));
                None
            }
        }
    }

    /// Full-record update. Replaces the matching cached record in place;
    /// any failure leaves the cache untouched and returns `false`.
    pub fn update(&mut self, id: Uuid, draft: &PatientDraft) -> bool {
        match self.store.update_patient(id, draft) {
            Ok(Some(updated)) => {
                if let Some(cached) = self.patients.iter_mut().find(|p| p.id == id) {
                    *cached = updated;
                    self.revision += 1;
                }
                self.notifier.notify(Notification::info(
                    "Paciente actualizado",
                    "Los datos se actualizaron correctamente",
                ));
                true
            }
            Ok(None) => {
                self.notifier
                    .notify(Notification::error(format!("patient {id} not found")));
                false
            }
            Err(err) => {
                tracing::warn!("patient update failed: {err}");
                self.notifier.notify(Notification::error(err.to_string()));
                false
            }
        }
    }

    /// Delete a patient, removing it from the cache on confirmation.
    pub fn delete(&mut self, id: Uuid) -> bool {
        match self.store.delete_patient(id) {
            Ok(true) => {
                self.patients.retain(|p| p.id != id);
                self.revision += 1;
                self.notifier.notify(Notification::info(
                    "Paciente eliminado",
                    "El paciente fue eliminado correctamente",
                ));
                true
            }
            Ok(false) => {
                self.notifier
                    .notify(Notification::error(format!("patient {id} not found")));
                false
            }
            Err(err) => {
                tracing::warn!("patient delete failed: {err}");
                self.notifier.notify(Notification::error(err.to_string()));
                false
            }
        }
    }

    /// Read-through search used by autocomplete; never touches the cache.
    pub fn search(&self, query: &str) -> Vec<Patient> {
        match self.store.search_patients(query) {
            Ok(patients) => patients,
            Err(err) => {
                self.notifier.notify(Notification::error(err.to_string()));
                Vec::new()
            }
        }
    }

    /// Read-through lookup; failures come back as `None`, silently.
    pub fn get_by_id(&self, id: Uuid) -> Option<Patient> {
        self.store.get_patient(id).ok().flatten()
    }
}
