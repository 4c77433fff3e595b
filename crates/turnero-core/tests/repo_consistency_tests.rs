//! Cache-consistency tests for the repositories.
//!
//! A flaky store double injects backend outages to verify the one rule the
//! repositories guarantee: the cache changes only after the store confirms,
//! and a failed call leaves it exactly as it was.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::NaiveDate;
use uuid::Uuid;

use turnero_core::models::{Patient, PatientDraft, Slot, TurnDraft, TurnStatus, TurnWithPatient};
use turnero_core::repo::{Notification, Notifier, PatientRepository, Severity, TurnRepository};
use turnero_core::store::{PatientStore, SqliteStore, StoreError, StoreResult, TurnStore};

/// SQLite-backed store that fails every call while the shared flag is set.
struct FlakyStore {
    inner: SqliteStore,
    fail: Rc<Cell<bool>>,
}

impl FlakyStore {
    fn open() -> (Self, Rc<Cell<bool>>) {
        let fail = Rc::new(Cell::new(false));
        let store = Self {
            inner: SqliteStore::open_in_memory().unwrap(),
            fail: Rc::clone(&fail),
        };
        (store, fail)
    }

    fn check(&self) -> StoreResult<()> {
        if self.fail.get() {
            Err(StoreError::Unavailable("backend offline".into()))
        } else {
            Ok(())
        }
    }
}

impl PatientStore for FlakyStore {
    fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        self.check()?;
        self.inner.list_patients()
    }

    fn insert_patient(&self, draft: &PatientDraft) -> StoreResult<Patient> {
        self.check()?;
        self.inner.insert_patient(draft)
    }

    fn update_patient(&self, id: Uuid, draft: &PatientDraft) -> StoreResult<Option<Patient>> {
        self.check()?;
        self.inner.update_patient(id, draft)
    }

    fn delete_patient(&self, id: Uuid) -> StoreResult<bool> {
        self.check()?;
        self.inner.delete_patient(id)
    }

    fn search_patients(&self, query: &str) -> StoreResult<Vec<Patient>> {
        self.check()?;
        self.inner.search_patients(query)
    }

    fn get_patient(&self, id: Uuid) -> StoreResult<Option<Patient>> {
        self.check()?;
        self.inner.get_patient(id)
    }
}

impl TurnStore for FlakyStore {
    fn list_turns(&self) -> StoreResult<Vec<TurnWithPatient>> {
        self.check()?;
        self.inner.list_turns()
    }

    fn insert_turn(&self, draft: &TurnDraft) -> StoreResult<TurnWithPatient> {
        self.check()?;
        self.inner.insert_turn(draft)
    }

    fn update_turn(&self, id: Uuid, draft: &TurnDraft) -> StoreResult<Option<TurnWithPatient>> {
        self.check()?;
        self.inner.update_turn(id, draft)
    }

    fn delete_turn(&self, id: Uuid) -> StoreResult<bool> {
        self.check()?;
        self.inner.delete_turn(id)
    }

    fn turns_by_patient(&self, patient_id: Uuid) -> StoreResult<Vec<TurnWithPatient>> {
        self.check()?;
        self.inner.turns_by_patient(patient_id)
    }
}

/// Notifier that records everything for later assertions.
#[derive(Clone, Default)]
struct RecordingNotifier(Rc<RefCell<Vec<Notification>>>);

impl RecordingNotifier {
    fn taken(&self) -> Vec<Notification> {
        self.0.borrow_mut().drain(..).collect()
    }

    fn last_severity(&self) -> Option<Severity> {
        self.0.borrow().last().map(|n| n.severity)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.0.borrow_mut().push(notification);
    }
}

fn patient_draft(dni: &str, first: &str, last: &str) -> PatientDraft {
    PatientDraft::new(dni, first, last, "11-4444-5555")
}

fn turn_draft(patient_id: Uuid, day: u32, time: &str) -> TurnDraft {
    TurnDraft::new(
        patient_id,
        "Consulta General",
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        time.parse::<Slot>().unwrap(),
    )
}

fn patient_repo() -> (
    PatientRepository<FlakyStore, RecordingNotifier>,
    Rc<Cell<bool>>,
    RecordingNotifier,
) {
    let (store, fail) = FlakyStore::open();
    let notifier = RecordingNotifier::default();
    let mut repo = PatientRepository::new(store, notifier.clone());
    repo.refresh();
    (repo, fail, notifier)
}

/// Turn repository over a store seeded with one patient.
fn turn_repo() -> (
    TurnRepository<FlakyStore, RecordingNotifier>,
    Rc<Cell<bool>>,
    RecordingNotifier,
    Uuid,
) {
    let (store, fail) = FlakyStore::open();
    let patient = store
        .insert_patient(&patient_draft("30111222", "Ana", "García"))
        .unwrap();
    let notifier = RecordingNotifier::default();
    let mut repo = TurnRepository::new(store, notifier.clone());
    repo.refresh();
    (repo, fail, notifier, patient.id)
}

#[test]
fn test_patient_create_failure_leaves_cache_identical() {
    let (mut repo, fail, notifier) = patient_repo();
    repo.create(&patient_draft("1", "Ana", "García")).unwrap();
    let before = repo.patients().to_vec();
    let revision = repo.revision();
    notifier.taken();

    fail.set(true);
    assert!(repo.create(&patient_draft("2", "Luis", "Medina")).is_none());

    assert_eq!(repo.patients(), before);
    assert_eq!(repo.revision(), revision);
    assert_eq!(notifier.last_severity(), Some(Severity::Error));
}

#[test]
fn test_patient_refresh_failure_keeps_prior_data() {
    let (mut repo, fail, _notifier) = patient_repo();
    repo.create(&patient_draft("1", "Ana", "García")).unwrap();
    repo.refresh();
    let before = repo.patients().to_vec();
    assert_eq!(before.len(), 1);

    fail.set(true);
    repo.refresh();

    assert_eq!(repo.patients(), before);
    assert!(!repo.is_loading());
    assert_eq!(repo.error(), Some("backend unavailable: backend offline"));

    // Recovery clears the inline error.
    fail.set(false);
    repo.refresh();
    assert!(repo.error().is_none());
}

#[test]
fn test_patient_update_replaces_exactly_one() {
    let (mut repo, _fail, _notifier) = patient_repo();
    repo.create(&patient_draft("1", "Ana", "García")).unwrap();
    let target = repo.create(&patient_draft("2", "Luis", "Medina")).unwrap();
    repo.create(&patient_draft("3", "Eva", "Suárez")).unwrap();
    let before = repo.patients().to_vec();

    let mut edit = PatientDraft::from(&target);
    edit.phone = "11-0000-0000".into();
    assert!(repo.update(target.id, &edit));

    let after = repo.patients();
    assert_eq!(after.len(), 3);
    for (old, new) in before.iter().zip(after) {
        if old.id == target.id {
            assert_eq!(new.phone, "11-0000-0000");
        } else {
            assert_eq!(old, new);
        }
    }
}

#[test]
fn test_patient_update_failure_leaves_cache_identical() {
    let (mut repo, fail, _notifier) = patient_repo();
    let created = repo.create(&patient_draft("1", "Ana", "García")).unwrap();
    let before = repo.patients().to_vec();

    fail.set(true);
    let mut edit = PatientDraft::from(&created);
    edit.phone = "11-0000-0000".into();
    assert!(!repo.update(created.id, &edit));

    assert_eq!(repo.patients(), before);
}

#[test]
fn test_patient_delete_failure_leaves_cache_identical() {
    let (mut repo, fail, _notifier) = patient_repo();
    let created = repo.create(&patient_draft("1", "Ana", "García")).unwrap();
    let before = repo.patients().to_vec();

    fail.set(true);
    assert!(!repo.delete(created.id));
    assert_eq!(repo.patients(), before);
}

#[test]
fn test_patient_search_failure_is_empty_plus_notification() {
    let (mut repo, fail, notifier) = patient_repo();
    repo.create(&patient_draft("1", "Ana", "García")).unwrap();
    notifier.taken();

    fail.set(true);
    assert!(repo.search("gar").is_empty());
    assert_eq!(notifier.last_severity(), Some(Severity::Error));

    // The cache is not involved in the read-through.
    assert_eq!(repo.patients().len(), 1);
}

#[test]
fn test_patient_notifications_carry_spanish_copy() {
    let (mut repo, _fail, notifier) = patient_repo();
    repo.refresh();
    notifier.taken();

    repo.create(&patient_draft("1", "Ana", "García")).unwrap();

    let sent = notifier.taken();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Paciente creado");
    assert_eq!(sent[0].body, "Ana García agregado correctamente");
    assert_eq!(sent[0].severity, Severity::Info);
}

#[test]
fn test_turn_create_failure_leaves_cache_identical() {
    let (mut repo, fail, notifier, patient_id) = turn_repo();
    repo.create(&turn_draft(patient_id, 5, "09:00")).unwrap();
    let before = repo.turns().to_vec();
    notifier.taken();

    fail.set(true);
    assert!(repo.create(&turn_draft(patient_id, 5, "10:00")).is_none());

    assert_eq!(repo.turns(), before);
    assert_eq!(notifier.last_severity(), Some(Severity::Error));
}

#[test]
fn test_turn_refresh_failure_keeps_prior_data() {
    let (mut repo, fail, _notifier, patient_id) = turn_repo();
    repo.create(&turn_draft(patient_id, 5, "09:00")).unwrap();
    repo.refresh();
    let before = repo.turns().to_vec();

    fail.set(true);
    repo.refresh();

    assert_eq!(repo.turns(), before);
    assert!(repo.error().is_some());
}

#[test]
fn test_turn_set_status_failure_leaves_status_unchanged() {
    let (mut repo, fail, _notifier, patient_id) = turn_repo();
    let created = repo.create(&turn_draft(patient_id, 5, "09:00")).unwrap();
    assert_eq!(created.turn.status, TurnStatus::Pending);

    fail.set(true);
    assert!(!repo.set_status(created.turn.id, TurnStatus::Confirmed));
    assert_eq!(repo.turns()[0].turn.status, TurnStatus::Pending);

    fail.set(false);
    assert!(repo.set_status(created.turn.id, TurnStatus::Confirmed));
    assert_eq!(repo.turns()[0].turn.status, TurnStatus::Confirmed);
}

#[test]
fn test_turn_update_success_replaces_exactly_one() {
    let (mut repo, _fail, _notifier, patient_id) = turn_repo();
    repo.create(&turn_draft(patient_id, 5, "09:00")).unwrap();
    let target = repo.create(&turn_draft(patient_id, 5, "10:00")).unwrap();
    repo.create(&turn_draft(patient_id, 6, "09:00")).unwrap();
    let before = repo.turns().to_vec();

    let mut edit = TurnDraft::from(&target.turn);
    edit.service = "Urgencia".into();
    assert!(repo.update(target.turn.id, &edit));

    let after = repo.turns();
    assert_eq!(after.len(), 3);
    for (old, new) in before.iter().zip(after) {
        if old.turn.id == target.turn.id {
            assert_eq!(new.turn.service, "Urgencia");
        } else {
            assert_eq!(old, new);
        }
    }
}

#[test]
fn test_turn_history_failure_is_empty_and_silent_on_cache() {
    let (mut repo, fail, _notifier, patient_id) = turn_repo();
    repo.create(&turn_draft(patient_id, 5, "09:00")).unwrap();
    let revision = repo.revision();

    fail.set(true);
    assert!(repo.turns_by_patient(patient_id).is_empty());
    assert_eq!(repo.revision(), revision);
}

#[test]
fn test_revision_advances_only_on_cache_change() {
    let (mut repo, fail, _notifier) = patient_repo();
    let after_refresh = repo.revision();

    fail.set(true);
    assert!(repo.create(&patient_draft("1", "Ana", "García")).is_none());
    repo.refresh();
    assert_eq!(repo.revision(), after_refresh);

    fail.set(false);
    repo.create(&patient_draft("1", "Ana", "García")).unwrap();
    assert_eq!(repo.revision(), after_refresh + 1);
}
