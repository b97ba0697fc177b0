//! Per-user dashboard snapshot.
//!
//! Bundles every figure the presentation layer renders on its home
//! screen: streaks, pillar distribution, next guided-prompt days, and
//! the mood window. Assembled in one pass by
//! [`Journal::dashboard_stats`](crate::db::Journal::dashboard_stats);
//! nothing here reaches back into the store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{MoodPoint, PillarShare};
use crate::types::Pillar;

/// Dashboard statistics for one user.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    /// Total entries ever written by the user
    pub entry_count: i64,
    /// When the most recent entry was created
    pub last_entry_at: Option<DateTime<Utc>>,
    /// Current consecutive daily streak (grace window included)
    pub current_streak: u32,
    /// Longest streak inside the recent-entry window
    pub longest_streak: u32,
    /// Count/share per pillar over the distribution window
    pub distribution: BTreeMap<Pillar, PillarShare>,
    /// Next guided-prompt day per pillar, clamped to the track length
    pub next_track_days: BTreeMap<Pillar, u32>,
    /// Dense mood series ending today, oldest first
    pub mood_series: Vec<MoodPoint>,
}

impl DashboardStats {
    /// Average recorded mood across the series window, if any day has one.
    pub fn average_mood(&self) -> Option<f64> {
        let recorded: Vec<u8> = self.mood_series.iter().filter_map(|p| p.mood).collect();
        if recorded.is_empty() {
            return None;
        }
        let sum: u32 = recorded.iter().map(|&m| m as u32).sum();
        Some(sum as f64 / recorded.len() as f64)
    }

    /// Render the mood series as a sparkline for terminal display.
    ///
    /// One glyph per day, oldest first; days without a recorded mood
    /// show as a middle dot.
    pub fn mood_sparkline(&self) -> String {
        self.mood_series
            .iter()
            .map(|p| match p.mood {
                Some(1) => '▁',
                Some(2) => '▂',
                Some(3) => '▄',
                Some(4) => '▆',
                Some(5) => '█',
                _ => '·',
            })
            .collect()
    }

    /// The pillar with the most entries in the window; ties resolve
    /// arbitrarily. `None` when the window has no tagged entries.
    pub fn dominant_pillar(&self) -> Option<Pillar> {
        self.distribution
            .iter()
            .filter(|(_, share)| share.count > 0)
            .max_by_key(|(_, share)| share.count)
            .map(|(&pillar, _)| pillar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stats_with_series(series: Vec<MoodPoint>) -> DashboardStats {
        DashboardStats {
            entry_count: 0,
            last_entry_at: None,
            current_streak: 0,
            longest_streak: 0,
            distribution: BTreeMap::new(),
            next_track_days: BTreeMap::new(),
            mood_series: series,
        }
    }

    fn point(s: &str, mood: Option<u8>) -> MoodPoint {
        MoodPoint {
            date: NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap(),
            mood,
        }
    }

    #[test]
    fn test_average_mood_ignores_unrecorded_days() {
        let stats = stats_with_series(vec![
            point("2024-06-01", Some(4)),
            point("2024-06-02", None),
            point("2024-06-03", Some(2)),
        ]);
        assert_eq!(stats.average_mood(), Some(3.0));
    }

    #[test]
    fn test_average_mood_none_when_nothing_recorded() {
        let stats = stats_with_series(vec![point("2024-06-01", None)]);
        assert_eq!(stats.average_mood(), None);
    }

    #[test]
    fn test_sparkline_marks_gaps() {
        let stats = stats_with_series(vec![
            point("2024-06-01", Some(1)),
            point("2024-06-02", None),
            point("2024-06-03", Some(5)),
        ]);
        assert_eq!(stats.mood_sparkline(), "▁·█");
    }

    #[test]
    fn test_dominant_pillar() {
        let mut stats = stats_with_series(vec![]);
        assert_eq!(stats.dominant_pillar(), None);

        stats.distribution = BTreeMap::from([
            (
                Pillar::Money,
                PillarShare {
                    count: 2,
                    percentage: 40,
                },
            ),
            (
                Pillar::Ego,
                PillarShare {
                    count: 3,
                    percentage: 60,
                },
            ),
        ]);
        assert_eq!(stats.dominant_pillar(), Some(Pillar::Ego));
    }
}
