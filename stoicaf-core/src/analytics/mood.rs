//! Mood series for fixed-width visualizations.
//!
//! Produces a dense, gap-free day-by-day series so heatmaps and
//! sparklines can render a fixed window without date arithmetic of their
//! own. Days with no recorded mood carry `None`; a missing mood is never
//! coerced to zero or a scale midpoint.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Default length of the dashboard mood window, in days.
pub const MOOD_WINDOW_DAYS: usize = 14;

/// One day in a mood series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodPoint {
    /// Calendar day
    pub date: NaiveDate,
    /// Recorded mood for the day, if any
    pub mood: Option<u8>,
}

/// Dense mood series covering every day in `[end - (window_days - 1), end]`.
///
/// Always returns exactly `window_days` points, oldest first, regardless
/// of how many entries exist. `moods_by_date` holds at most one mood per
/// date; the store keeps the first recorded mood when a day has several
/// entries.
pub fn mood_series(
    moods_by_date: &HashMap<NaiveDate, u8>,
    window_days: usize,
    end: NaiveDate,
) -> Vec<MoodPoint> {
    (0..window_days)
        .rev()
        .map(|back| {
            let date = end - Duration::days(back as i64);
            MoodPoint {
                date,
                mood: moods_by_date.get(&date).copied(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_input_yields_all_null_series() {
        let series = mood_series(&HashMap::new(), 5, day("2024-06-15"));
        assert_eq!(series.len(), 5);
        assert!(series.iter().all(|p| p.mood.is_none()));
        assert_eq!(series[0].date, day("2024-06-11"));
        assert_eq!(series[4].date, day("2024-06-15"));
    }

    #[test]
    fn test_sparse_entries_fill_gaps_with_null() {
        let moods = HashMap::from([(day("2024-06-01"), 4), (day("2024-06-03"), 2)]);
        let series = mood_series(&moods, 3, day("2024-06-03"));

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, day("2024-06-01"));
        assert_eq!(series[0].mood, Some(4));
        assert_eq!(series[1].date, day("2024-06-02"));
        assert_eq!(series[1].mood, None);
        assert_eq!(series[2].date, day("2024-06-03"));
        assert_eq!(series[2].mood, Some(2));
    }

    #[test]
    fn test_series_is_oldest_first_and_consecutive() {
        let series = mood_series(&HashMap::new(), 7, day("2024-03-03"));
        for pair in series.windows(2) {
            assert_eq!((pair[1].date - pair[0].date).num_days(), 1);
        }
        // Crosses the month boundary without skipping a day.
        assert_eq!(series[0].date, day("2024-02-26"));
    }

    #[test]
    fn test_entries_outside_window_excluded() {
        let moods = HashMap::from([(day("2024-06-01"), 5), (day("2024-06-10"), 3)]);
        let series = mood_series(&moods, 3, day("2024-06-10"));
        assert_eq!(series.len(), 3);
        assert_eq!(series[2].mood, Some(3));
        assert!(series[..2].iter().all(|p| p.mood.is_none()));
    }

    #[test]
    fn test_zero_window_is_empty() {
        assert!(mood_series(&HashMap::new(), 0, day("2024-06-15")).is_empty());
    }
}
