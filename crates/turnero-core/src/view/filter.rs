//! List filtering and sorting.

use chrono::{Days, NaiveDate};

use crate::models::{Patient, TurnStatus, TurnWithPatient};

/// Named date-range presets on the turn list's filter bar.
///
/// Presets resolve against the `today` passed at evaluation time, not a
/// captured date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatePreset {
    #[default]
    All,
    Today,
    Tomorrow,
    /// The coming seven days, both endpoints inclusive: `[today, today+7]`.
    Week,
}

impl DatePreset {
    fn matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DatePreset::All => true,
            DatePreset::Today => date == today,
            DatePreset::Tomorrow => date == today + Days::new(1),
            DatePreset::Week => date >= today && date <= today + Days::new(7),
        }
    }
}

/// Combined filter for the turn list view.
///
/// The default filter passes everything through (still sorted).
#[derive(Debug, Clone, Default)]
pub struct TurnFilter {
    /// Case-insensitive substring over patient name, service, and phone.
    /// Empty means no text filter.
    pub query: String,
    /// Exact status match; `None` means all statuses.
    pub status: Option<TurnStatus>,
    pub date: DatePreset,
}

impl TurnFilter {
    /// Apply the filter and return matches sorted by (date, time) ascending.
    pub fn apply(&self, turns: &[TurnWithPatient], today: NaiveDate) -> Vec<TurnWithPatient> {
        let mut filtered: Vec<TurnWithPatient> = turns
            .iter()
            .filter(|t| self.query.is_empty() || t.matches_query(&self.query))
            .filter(|t| self.status.map_or(true, |s| t.turn.status == s))
            .filter(|t| self.date.matches(t.turn.date, today))
            .cloned()
            .collect();

        sort_chronological(&mut filtered);
        filtered
    }
}

/// Stable sort by date then time. Idempotent: re-sorting a sorted list is a
/// no-op, and equal-slot turns keep their relative order.
pub fn sort_chronological(turns: &mut [TurnWithPatient]) {
    turns.sort_by_key(|t| t.turn.chronological_key());
}

/// The patient directory's inline filter: case-insensitive substring over
/// name and DNI. An empty query returns everything.
pub fn search_patients(patients: &[Patient], query: &str) -> Vec<Patient> {
    patients
        .iter()
        .filter(|p| p.matches_query(query))
        .cloned()
        .collect()
}
