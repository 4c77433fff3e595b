//! Pure view derivations over the cached turn collection.
//!
//! Everything here is synchronous and stateless: functions take the joined
//! turn list plus an explicit "today"/"now" so views stay deterministic and
//! testable. Cancelled turns stay in counts and list views; only the
//! next-turn pick skips them.

mod calendar;
mod dashboard;
mod filter;

pub use calendar::{by_day, grid_hours, month_grid, turns_in_hour, week_of};
pub use dashboard::{next_turn, status_tally, turns_on, upcoming_after, StatusTally};
pub use filter::{search_patients, sort_chronological, DatePreset, TurnFilter};
