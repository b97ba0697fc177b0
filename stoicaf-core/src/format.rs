//! Formatting helpers shared across display surfaces.

use chrono::{DateTime, NaiveDate, Utc};

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(ts: DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(ts);

    if elapsed.num_seconds() < 60 {
        "just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{}d ago", elapsed.num_days())
    } else {
        ts.format("%b %d").to_string()
    }
}

/// Format an optional timestamp as relative time, or an em dash if missing.
pub fn format_relative_time_opt(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => format_relative_time(ts),
        None => "—".to_string(),
    }
}

/// Short display form of an entry day (e.g., "Jun 03").
pub fn format_entry_date(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Word label for a mood score, for list views.
pub fn mood_label(mood: Option<u8>) -> &'static str {
    match mood {
        Some(1) => "rough",
        Some(2) => "low",
        Some(3) => "steady",
        Some(4) => "good",
        Some(5) => "great",
        _ => "—",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_label_covers_scale() {
        assert_eq!(mood_label(Some(1)), "rough");
        assert_eq!(mood_label(Some(5)), "great");
        assert_eq!(mood_label(None), "—");
    }

    #[test]
    fn test_format_entry_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(format_entry_date(date), "Jun 03");
    }
}
