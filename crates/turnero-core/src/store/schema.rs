//! SQLite schema definition.

/// Complete database schema for the turnero backend.
///
/// Dates are stored as zero-padded `YYYY-MM-DD` text and slots as `HH:MM`
/// text, so SQL `ORDER BY` on those columns is chronological.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,
    dni TEXT NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT,
    phone TEXT NOT NULL,
    birth_date TEXT,                             -- YYYY-MM-DD
    health_insurance TEXT,
    allergies TEXT,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_patients_last_name ON patients(last_name, first_name);
CREATE INDEX IF NOT EXISTS idx_patients_dni ON patients(dni);

-- ============================================================================
-- Turns (appointments)
-- ============================================================================

CREATE TABLE IF NOT EXISTS turns (
    id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(id),
    service TEXT NOT NULL,
    date TEXT NOT NULL,                          -- YYYY-MM-DD
    time TEXT NOT NULL,                          -- HH:MM half-hour slot
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('confirmed', 'pending', 'cancelled')),
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_turns_patient ON turns(patient_id);
CREATE INDEX IF NOT EXISTS idx_turns_date ON turns(date, time);
CREATE INDEX IF NOT EXISTS idx_turns_status ON turns(status);
"#;
