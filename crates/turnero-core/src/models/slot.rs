//! Bookable time slots.
//!
//! The clinic books in fixed half-hour slots between 08:00 and 19:30.
//! `Slot` is a validated wrapper over `NaiveTime` so that slot ordering is
//! plain time ordering, never string comparison.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Slot validation and parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("invalid time format: {0} (expected HH:MM)")]
    BadFormat(String),

    #[error("time {0} is outside opening hours (08:00-19:30)")]
    OutsideHours(String),

    #[error("time {0} is not aligned to a half-hour slot")]
    Misaligned(String),
}

/// A half-hour appointment slot between 08:00 and 19:30 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(NaiveTime);

impl Slot {
    /// Hour of the first bookable slot.
    pub const OPENING_HOUR: u32 = 8;
    /// Hour of the last bookable slot (19:30).
    pub const CLOSING_HOUR: u32 = 19;
    /// Number of half-hour slots in a working day.
    pub const SLOTS_PER_DAY: usize = 24;

    /// Validate a time as a bookable slot.
    pub fn new(time: NaiveTime) -> Result<Self, SlotError> {
        if time.second() != 0 || time.nanosecond() != 0 || time.minute() % 30 != 0 {
            return Err(SlotError::Misaligned(time.format("%H:%M:%S").to_string()));
        }
        if time.hour() < Self::OPENING_HOUR || time.hour() > Self::CLOSING_HOUR {
            return Err(SlotError::OutsideHours(time.format("%H:%M").to_string()));
        }
        Ok(Self(time))
    }

    /// Build a slot from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, SlotError> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| SlotError::BadFormat(format!("{:02}:{:02}", hour, minute)))?;
        Self::new(time)
    }

    /// Enumerate every bookable slot of a day, earliest first.
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..Self::SLOTS_PER_DAY as u32).map(|i| {
            let hour = Self::OPENING_HOUR + i / 2;
            let minute = (i % 2) * 30;
            // Always in range by construction.
            Slot(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
        })
    }

    /// The underlying time value.
    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// The slot's hour, minutes truncated. Calendar grids bucket by this.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute component (0 or 30).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl FromStr for Slot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = NaiveTime::parse_from_str(s, "%H:%M")
            .map_err(|_| SlotError::BadFormat(s.to_string()))?;
        Self::new(time)
    }
}

// Serialized as the "HH:MM" wire form used by the backend.
impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
