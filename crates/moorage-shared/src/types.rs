//! Common types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub type EntityId = Uuid;

pub fn new_id() -> EntityId {
    Uuid::new_v4()
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Range end {end} is before start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Inclusive calendar date range. Both bounds are part of the range; a
/// single-day range has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if end < start {
            return Err(DateRangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of calendar days covered, at least 1.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterates every day from start to end inclusive, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.num_days()).map(move |offset| start + chrono::Duration::days(offset))
    }
}
