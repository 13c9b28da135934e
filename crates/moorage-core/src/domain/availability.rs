//! Per-day occupancy and contiguous availability segments

use chrono::{Duration, NaiveDate};
use moorage_shared::EntityId;
use serde::{Deserialize, Serialize};

/// One day of the capacity ledger: how many reservations cover `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOccupancy {
    pub day: NaiveDate,
    pub occupied: i64,
}

/// A maximal run of consecutive days with positive free capacity.
///
/// `min_free` is the guaranteed bookable capacity across the whole run: a
/// caller must not assume more than this minimum is free on every day.
/// An open-ended tail (`end == None`) carries no capacity guarantee at all
/// (`min_free == 0`); it only states that no reservation data exists beyond
/// the queried range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub min_free: i32,
}

/// Whether to report the unknown region past the queried range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailPolicy {
    /// Only bounded segments within the queried range.
    #[default]
    Closed,
    /// If the final queried day still has free capacity, append an
    /// unbounded segment starting the day after the range.
    Open,
}

/// Per-place availability for display.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceAvailability {
    pub place_id: EntityId,
    pub place_name: String,
    pub capacity: i32,
    pub segments: Vec<Segment>,
}

/// Converts a per-day occupancy series into contiguous availability
/// segments. Days where `capacity - occupied == 0` terminate the current
/// run and belong to no segment. Output is ascending by start date.
///
/// `days` must be consecutive calendar days in ascending order, as produced
/// by the capacity ledger.
pub fn segments(capacity: i32, days: &[DayOccupancy], tail: TailPolicy) -> Vec<Segment> {
    let mut result = Vec::new();
    let mut run: Option<(NaiveDate, NaiveDate, i32)> = None;

    for entry in days {
        let free = (i64::from(capacity) - entry.occupied).max(0) as i32;
        if free > 0 {
            run = match run {
                None => Some((entry.day, entry.day, free)),
                Some((start, _, min_free)) => Some((start, entry.day, min_free.min(free))),
            };
        } else if let Some((start, end, min_free)) = run.take() {
            result.push(Segment { start, end: Some(end), min_free });
        }
    }

    if let Some((start, end, min_free)) = run {
        result.push(Segment { start, end: Some(end), min_free });
    }

    if tail == TailPolicy::Open {
        if let Some(last) = days.last() {
            if i64::from(capacity) - last.occupied > 0 {
                result.push(Segment {
                    start: last.day + Duration::days(1),
                    end: None,
                    min_free: 0,
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn series(start: &str, occupied: &[i64]) -> Vec<DayOccupancy> {
        let start = date(start);
        occupied
            .iter()
            .enumerate()
            .map(|(i, &occupied)| DayOccupancy {
                day: start + Duration::days(i as i64),
                occupied,
            })
            .collect()
    }

    #[test]
    fn test_full_days_split_segments() {
        // free = [2, 0, 3, 3, 0] with capacity 3
        let days = series("2025-07-01", &[1, 3, 0, 0, 3]);
        let segs = segments(3, &days, TailPolicy::Closed);
        assert_eq!(
            segs,
            vec![
                Segment { start: date("2025-07-01"), end: Some(date("2025-07-01")), min_free: 2 },
                Segment { start: date("2025-07-03"), end: Some(date("2025-07-04")), min_free: 3 },
            ]
        );
    }

    #[test]
    fn test_min_free_is_the_segment_guarantee() {
        let days = series("2025-07-01", &[0, 2, 1, 0]);
        let segs = segments(3, &days, TailPolicy::Closed);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].min_free, 1);
        assert_eq!(segs[0].end, Some(date("2025-07-04")));
    }

    #[test]
    fn test_fully_booked_range_yields_no_segments() {
        let days = series("2025-07-01", &[2, 2, 2]);
        assert!(segments(2, &days, TailPolicy::Closed).is_empty());
    }

    #[test]
    fn test_empty_series() {
        assert!(segments(2, &[], TailPolicy::Closed).is_empty());
        assert!(segments(2, &[], TailPolicy::Open).is_empty());
    }

    #[test]
    fn test_open_tail_after_free_final_day() {
        let days = series("2025-07-01", &[0, 1]);
        let segs = segments(2, &days, TailPolicy::Open);
        assert_eq!(segs.len(), 2);
        assert_eq!(
            segs[1],
            Segment { start: date("2025-07-03"), end: None, min_free: 0 }
        );
    }

    #[test]
    fn test_no_open_tail_after_full_final_day() {
        let days = series("2025-07-01", &[0, 2]);
        let segs = segments(2, &days, TailPolicy::Open);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].end, Some(date("2025-07-01")));
    }

    #[test]
    fn test_overbooked_day_clamps_to_zero_free() {
        // occupancy above capacity must still terminate the run, not wrap
        let days = series("2025-07-01", &[1, 5, 1]);
        let segs = segments(2, &days, TailPolicy::Closed);
        assert_eq!(segs.len(), 2);
    }

    #[test]
    fn test_output_ascending_by_start() {
        let days = series("2025-07-01", &[0, 2, 0, 2, 0]);
        let segs = segments(2, &days, TailPolicy::Closed);
        let starts: Vec<_> = segs.iter().map(|s| s.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }
}
