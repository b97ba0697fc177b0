//! Streak calculation over journal entry dates.
//!
//! A streak is the count of consecutive calendar days, counting backward
//! from today, on which the user wrote at least one entry. A user who
//! journaled yesterday but not yet today still has a live streak (the
//! grace window); a most recent entry older than yesterday means the
//! streak is broken.
//!
//! Both functions are pure and total: they accept dates in any order,
//! with duplicates, and return 0 rather than erroring on empty input.

use chrono::NaiveDate;

/// Default cap on how many recent entries feed the streak calculation.
///
/// Bounds query cost for prolific journalers. A streak longer than the
/// window truncates at the window's oldest entry; callers that need exact
/// very long streaks can raise `AnalyticsConfig::streak_entry_window`.
pub const STREAK_ENTRY_WINDOW: usize = 100;

/// Count of consecutive daily entries ending today or yesterday.
///
/// Multiple entries on the same calendar date count once. Dates after
/// `today` are ignored. Returns 0 for no entries or a broken streak.
pub fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut unique: Vec<NaiveDate> = dates.iter().copied().filter(|d| *d <= today).collect();
    unique.sort_unstable_by(|a, b| b.cmp(a));
    unique.dedup();

    let Some(&latest) = unique.first() else {
        return 0;
    };

    // Grace window: an entry yesterday keeps the streak alive.
    if (today - latest).num_days() > 1 {
        return 0;
    }

    let mut streak = 1u32;
    for pair in unique.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Longest run of consecutive daily entries anywhere in `dates`.
pub fn longest_streak(dates: &[NaiveDate]) -> u32 {
    let mut unique: Vec<NaiveDate> = dates.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for date in unique {
        run = match prev {
            Some(p) if (date - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}
