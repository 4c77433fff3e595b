//! Domain models for patients and turns.

mod patient;
mod slot;
mod turn;

pub use patient::{Patient, PatientDraft};
pub use slot::{Slot, SlotError};
pub use turn::{
    Turn, TurnDraft, TurnStatus, TurnWithPatient, UnknownStatus, DEFAULT_SERVICES,
};
