//! Core domain types for stoicaf
//!
//! These types represent the canonical journal data model shared by the
//! store, the analytics functions, and the CLI.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Entry** | One journal record, owned by exactly one user |
//! | **Pillar** | One of four fixed life-focus tags an entry can carry |
//! | **Track** | A pillar's guided prompt sequence (days 1 through 30) |
//! | **Mood** | Optional 1-5 self-rating attached to an entry |
//! | **Entry date** | The calendar day an entry belongs to, in the user's local time |
//!
//! An entry's `entry_date` is fixed by the caller at write time and is the
//! dedup key for one-entry-per-day semantics. It is distinct from
//! `created_at`, the store-assigned UTC creation instant; all calendar
//! arithmetic (streaks, mood windows) runs on `entry_date`, never on a
//! timezone-shifted `created_at`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lowest recordable mood score.
pub const MOOD_MIN: u8 = 1;
/// Highest recordable mood score.
pub const MOOD_MAX: u8 = 5;

// ============================================
// Pillars
// ============================================

/// The four fixed life-focus tags a journal entry can carry.
///
/// The set is closed: an entry is either tagged with one of these or
/// untagged. Untagged entries are excluded from distribution denominators,
/// never counted as a fifth category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Money,
    Ego,
    Relationships,
    Discipline,
}

impl Pillar {
    /// All pillars, in canonical display order.
    pub const ALL: [Pillar; 4] = [
        Pillar::Money,
        Pillar::Ego,
        Pillar::Relationships,
        Pillar::Discipline,
    ];

    /// Returns the identifier used in database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Money => "money",
            Pillar::Ego => "ego",
            Pillar::Relationships => "relationships",
            Pillar::Discipline => "discipline",
        }
    }

    /// Returns the display name for this pillar
    pub fn display_name(&self) -> &'static str {
        match self {
            Pillar::Money => "Money",
            Pillar::Ego => "Ego",
            Pillar::Relationships => "Relationships",
            Pillar::Discipline => "Discipline",
        }
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Pillar {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "money" | "Money" => Ok(Pillar::Money),
            "ego" | "Ego" => Ok(Pillar::Ego),
            "relationships" | "Relationships" => Ok(Pillar::Relationships),
            "discipline" | "Discipline" => Ok(Pillar::Discipline),
            _ => Err(format!("unknown pillar: {}", s)),
        }
    }
}

// ============================================
// Journal entries
// ============================================

/// A journal entry (the core unit of the data model)
///
/// Created by the owning user on save, mutated only by that user via
/// explicit edit, destroyed only by explicit delete. The analytics
/// functions read entries and summarize them; they never mutate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Opaque unique identifier, assigned by the store on creation
    pub id: String,
    /// Owning user; immutable after creation
    pub user_id: String,
    /// Store-assigned creation timestamp; immutable
    pub created_at: DateTime<Utc>,
    /// Calendar day this entry belongs to (the user's intended local day)
    pub entry_date: NaiveDate,
    /// Life-focus tag, if any
    pub pillar: Option<Pillar>,
    /// Mood self-rating 1-5; `None` means "not recorded"
    pub mood: Option<u8>,
    /// Position in the pillar's guided track, 1-indexed; absent on
    /// freeform entries
    pub day_in_track: Option<u32>,
    /// Free text, opaque to analytics
    pub content: Option<String>,
    /// Structured block content (guided-prompt responses etc.), opaque
    /// to analytics
    pub metadata: serde_json::Value,
}

/// Data for creating an entry; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewEntry {
    /// Owning user
    pub user_id: String,
    /// Calendar day the entry belongs to
    pub entry_date: NaiveDate,
    /// Life-focus tag, if any
    pub pillar: Option<Pillar>,
    /// Mood self-rating 1-5
    pub mood: Option<u8>,
    /// Position in the pillar's guided track
    pub day_in_track: Option<u32>,
    /// Free text
    pub content: Option<String>,
    /// Structured block content
    pub metadata: serde_json::Value,
}

impl NewEntry {
    /// Minimal entry for a user and day; tag, mood, and content default
    /// to absent.
    pub fn for_day(user_id: impl Into<String>, entry_date: NaiveDate) -> Self {
        Self {
            user_id: user_id.into(),
            entry_date,
            pillar: None,
            mood: None,
            day_in_track: None,
            content: None,
            metadata: serde_json::json!({}),
        }
    }
}

/// Parse a stored `YYYY-MM-DD` day.
pub fn parse_entry_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Validate the recordable bounds on mood and track day.
///
/// Out-of-range values are precondition violations caught here at the
/// write boundary; absent values are always valid.
pub fn validate_entry_fields(mood: Option<u8>, day_in_track: Option<u32>) -> Result<()> {
    if let Some(m) = mood {
        if !(MOOD_MIN..=MOOD_MAX).contains(&m) {
            return Err(Error::InvalidMood(m as i64));
        }
    }
    if day_in_track == Some(0) {
        return Err(Error::InvalidTrackDay(0));
    }
    Ok(())
}
