//! Calendar grid derivations.
//!
//! Month cells bucket by exact date; week/day cells bucket by date plus
//! truncated hour, so a 14:30 turn stacks in the 14:00 row alongside the
//! 14:00 one.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate};

use crate::models::TurnWithPatient;

/// Hour rows of the week/day grids: 08:00 through 20:00.
pub fn grid_hours() -> RangeInclusive<u32> {
    8..=20
}

/// The Sunday-through-Saturday week containing `date`.
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let offset = date.weekday().num_days_from_sunday() as u64;
    let sunday = date - Days::new(offset);
    std::array::from_fn(|i| sunday + Days::new(i as u64))
}

/// The month's days with leading `None` padding so index % 7 is the weekday
/// column (Sunday first), as the month grid renders it.
pub fn month_grid(year: i32, month: u32) -> Vec<Option<NaiveDate>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut cells: Vec<Option<NaiveDate>> = Vec::new();
    for _ in 0..first.weekday().num_days_from_sunday() {
        cells.push(None);
    }

    let mut day = first;
    while day.month() == month {
        cells.push(Some(day));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    cells
}

/// Week/day cell contents: turns on `date` whose slot falls within `hour`.
///
/// The slot's minutes are dropped, so any minute within the hour lands in
/// that hour's bucket.
pub fn turns_in_hour(
    turns: &[TurnWithPatient],
    date: NaiveDate,
    hour: u32,
) -> Vec<&TurnWithPatient> {
    turns
        .iter()
        .filter(|t| t.turn.date == date && t.turn.time.hour() == hour)
        .collect()
}

/// Group turns by day for the month grid.
pub fn by_day(turns: &[TurnWithPatient]) -> BTreeMap<NaiveDate, Vec<&TurnWithPatient>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&TurnWithPatient>> = BTreeMap::new();
    for t in turns {
        buckets.entry(t.turn.date).or_default().push(t);
    }
    buckets
}
