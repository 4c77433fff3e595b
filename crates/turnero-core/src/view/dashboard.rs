//! Dashboard derivations: status counts, today/upcoming split, next turn.

use chrono::{NaiveDate, NaiveTime};

use crate::models::{TurnStatus, TurnWithPatient};

/// Turn counts per status. Cancelled turns count like any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub confirmed: usize,
    pub pending: usize,
    pub cancelled: usize,
}

impl StatusTally {
    /// Always equals the length of the tallied list.
    pub fn total(&self) -> usize {
        self.confirmed + self.pending + self.cancelled
    }
}

/// Count turns per status.
pub fn status_tally(turns: &[TurnWithPatient]) -> StatusTally {
    let mut tally = StatusTally::default();
    for t in turns {
        match t.turn.status {
            TurnStatus::Confirmed => tally.confirmed += 1,
            TurnStatus::Pending => tally.pending += 1,
            TurnStatus::Cancelled => tally.cancelled += 1,
        }
    }
    tally
}

/// Turns on exactly `date`.
pub fn turns_on(turns: &[TurnWithPatient], date: NaiveDate) -> Vec<&TurnWithPatient> {
    turns.iter().filter(|t| t.turn.date == date).collect()
}

/// Turns strictly after `date`, in list order.
pub fn upcoming_after(turns: &[TurnWithPatient], date: NaiveDate) -> Vec<&TurnWithPatient> {
    turns.iter().filter(|t| t.turn.date > date).collect()
}

/// The next appointment of the day: earliest non-cancelled turn on `today`
/// whose slot has not passed (`time >= now`).
pub fn next_turn<'a>(
    turns: &'a [TurnWithPatient],
    today: NaiveDate,
    now: NaiveTime,
) -> Option<&'a TurnWithPatient> {
    turns
        .iter()
        .filter(|t| t.turn.date == today && !t.turn.is_cancelled() && t.turn.time.time() >= now)
        .min_by_key(|t| t.turn.time)
}
