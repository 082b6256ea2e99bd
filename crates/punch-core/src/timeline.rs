//! Projection of clock-face times onto a multi-day minute timeline.

use std::fmt;

use serde::Serialize;

use crate::clock::{MINUTES_PER_DAY, TimeOfDay};

/// A punch placed on the timeline of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimePoint {
    /// The time as written.
    pub time: TimeOfDay,
    /// Whole days after the first punch of the line.
    pub day_offset: u64,
    /// Minutes since midnight of the first day.
    pub absolute_minutes: u64,
}

impl TimePoint {
    /// Whether the timeline had to roll over to place this point.
    pub const fn crosses_midnight(&self) -> bool {
        self.day_offset > 0
    }
}

/// Formats as `HH:MM`, or `HH:MM+N` for a point N days later.
impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.crosses_midnight() {
            write!(f, "{}+{}", self.time, self.day_offset)
        } else {
            write!(f, "{}", self.time)
        }
    }
}

/// Places times on a timeline in the order given.
///
/// Whenever a time is earlier on the clock face than the one before it, the
/// rest of the line moves one day forward. The comparison is between raw
/// minute-of-day values, so `23:50 00:10 00:05` rolls over twice.
pub fn build_timeline(times: &[TimeOfDay]) -> Vec<TimePoint> {
    let mut day_offset = 0;
    let mut last_minute_of_day: Option<u32> = None;

    times
        .iter()
        .map(|&time| {
            let minute_of_day = time.minute_of_day();
            if last_minute_of_day.is_some_and(|last| minute_of_day < last) {
                day_offset += 1;
            }
            last_minute_of_day = Some(minute_of_day);

            TimePoint {
                time,
                day_offset,
                absolute_minutes: u64::from(minute_of_day)
                    + day_offset * u64::from(MINUTES_PER_DAY),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(raw: &[&str]) -> Vec<TimeOfDay> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_same_day_points_keep_minute_of_day() {
        let points = build_timeline(&times(&["08:00", "12:00", "13:00", "17:30"]));
        let absolute: Vec<u64> = points.iter().map(|p| p.absolute_minutes).collect();
        assert_eq!(absolute, vec![480, 720, 780, 1050]);
        assert!(points.iter().all(|p| !p.crosses_midnight()));
    }

    #[test]
    fn test_backwards_time_rolls_to_next_day() {
        let points = build_timeline(&times(&["23:50", "00:10"]));
        assert_eq!(points[0].absolute_minutes, 1430);
        assert_eq!(points[1].absolute_minutes, 1450);
        assert!(!points[0].crosses_midnight());
        assert!(points[1].crosses_midnight());
    }

    #[test]
    fn test_offset_persists_for_rest_of_line() {
        let points = build_timeline(&times(&["22:00", "02:00", "03:00", "06:00"]));
        let offsets: Vec<u64> = points.iter().map(|p| p.day_offset).collect();
        assert_eq!(offsets, vec![0, 1, 1, 1]);
        assert_eq!(points[3].absolute_minutes, u64::from(360 + MINUTES_PER_DAY));
    }

    #[test]
    fn test_comparison_uses_clock_face_not_offset() {
        let points = build_timeline(&times(&["23:50", "00:10", "00:05", "01:00"]));
        let offsets: Vec<u64> = points.iter().map(|p| p.day_offset).collect();
        assert_eq!(offsets, vec![0, 1, 2, 2]);
    }

    #[test]
    fn test_equal_times_do_not_roll_over() {
        let points = build_timeline(&times(&["08:00", "08:00"]));
        assert_eq!(points[0].absolute_minutes, points[1].absolute_minutes);
    }

    #[test]
    fn test_end_of_day_then_early_morning() {
        let points = build_timeline(&times(&["16:00", "24:00", "00:00", "02:00"]));
        let absolute: Vec<u64> = points.iter().map(|p| p.absolute_minutes).collect();
        assert_eq!(absolute, vec![960, 1440, 1440, 1560]);
    }

    #[test]
    fn test_labels_mark_following_days() {
        let points = build_timeline(&times(&["22:00", "6:30"]));
        assert_eq!(points[0].to_string(), "22:00");
        assert_eq!(points[1].to_string(), "06:30+1");
    }

    #[test]
    fn test_millions_of_rollovers_stay_exact() {
        // Counting down through every minute of the day rolls over on all but
        // one step per cycle, pushing the timeline past u32::MAX minutes.
        let descending: Vec<TimeOfDay> = (0..MINUTES_PER_DAY)
            .rev()
            .map(|m| TimeOfDay::new(m / 60, m % 60).unwrap())
            .collect();
        let line: Vec<TimeOfDay> = descending.iter().copied().cycle().take(3_000_000).collect();

        let points = build_timeline(&line);
        let last = points.last().unwrap();

        assert_eq!(last.time.to_string(), "16:00");
        assert_eq!(last.day_offset, 2_997_916);
        assert_eq!(last.absolute_minutes, 4_317_000_000);
        assert!(last.absolute_minutes > u64::from(u32::MAX));
    }
}
