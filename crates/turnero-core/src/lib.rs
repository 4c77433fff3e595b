//! Turnero Core Library
//!
//! Appointment ("turno") management core for a small clinic: patients, turns,
//! and the derivations the calendar and dashboard views render.
//!
//! # Architecture
//!
//! ```text
//!                    UI (forms, lists, calendar grids)
//!                         │ commands        ▲ derived data
//!                         ▼                 │
//!              ┌──────────────────┐   ┌───────────────┐
//!              │   Repositories   │   │     View      │
//!              │ patients │ turns │   │  derivations  │
//!              └────────┬─────────┘   └───────▲───────┘
//!                       │ confirm-then-reflect│
//!                       ▼                     │
//!              ┌──────────────────┐    cached collections
//!              │   Backend store  │──────────┘
//!              │ (PatientStore /  │
//!              │    TurnStore)    │
//!              └──────────────────┘
//! ```
//!
//! # Core Principle
//!
//! **The cache only holds store-confirmed state.** Every mutation goes to the
//! backend first; the local collection is updated after success and left
//! untouched on failure, so views always render last-known-good data.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, Turn, Slot, TurnStatus)
//! - [`store`]: Backend store traits and the SQLite implementation
//! - [`repo`]: Caching repositories with notification surfacing
//! - [`view`]: Pure derivations for dashboard, list, and calendar views

pub mod models;
pub mod repo;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use models::{
    Patient, PatientDraft, Slot, SlotError, Turn, TurnDraft, TurnStatus, TurnWithPatient,
    DEFAULT_SERVICES,
};
pub use repo::{
    LogNotifier, Notification, Notifier, NullNotifier, PatientRepository, Severity,
    TurnRepository,
};
pub use store::{PatientStore, SqliteStore, StoreError, StoreResult, TurnStore};
pub use view::{status_tally, StatusTally, TurnFilter};
