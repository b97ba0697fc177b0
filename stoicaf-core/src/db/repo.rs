//! Journal repository layer
//!
//! The entry store and query gateway: every read and write of journal
//! entries goes through [`Journal`]. Writes are validated here, at the
//! boundary; the analytics functions downstream assume well-formed data
//! and never perform I/O of their own.

use crate::analytics::{
    current_streak, distribution, longest_streak, mood_series, DashboardStats,
};
use crate::config::AnalyticsConfig;
use crate::error::{Error, Result};
use crate::types::{JournalEntry, NewEntry, Pillar, validate_entry_fields};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Mutex;

/// Filter for listing a user's entries.
///
/// All fields are optional; an empty filter lists everything, most
/// recent first.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Only entries carrying this pillar
    pub pillar: Option<Pillar>,
    /// Only entries dated on or after this day
    pub since: Option<NaiveDate>,
    /// Only entries dated on or before this day
    pub until: Option<NaiveDate>,
    /// Cap on the number of entries returned
    pub limit: Option<usize>,
}

impl EntryFilter {
    /// Filter selecting the `n` most recent entries.
    pub fn recent(n: usize) -> Self {
        Self {
            limit: Some(n),
            ..Default::default()
        }
    }
}

/// Journal store handle (single connection guarded by a mutex)
pub struct Journal {
    conn: Mutex<Connection>,
}

impl Journal {
    /// Open or create a journal database at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory journal (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    /// Get the underlying connection (for advanced use)
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    // ============================================
    // Entry operations
    // ============================================

    /// Create an entry; the store assigns its id and creation timestamp.
    pub fn insert_entry(&self, new: NewEntry) -> Result<JournalEntry> {
        validate_entry_fields(new.mood, new.day_in_track)?;

        let entry = JournalEntry {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: new.user_id,
            created_at: Utc::now(),
            entry_date: new.entry_date,
            pillar: new.pillar,
            mood: new.mood,
            day_in_track: new.day_in_track,
            content: new.content,
            metadata: new.metadata,
        };

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO entries (id, user_id, created_at, entry_date, pillar,
                                 mood, day_in_track, content, metadata)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                entry.id,
                entry.user_id,
                entry.created_at.to_rfc3339(),
                entry.entry_date.format("%Y-%m-%d").to_string(),
                entry.pillar.map(|p| p.as_str()),
                entry.mood.map(|m| m as i64),
                entry.day_in_track.map(|d| d as i64),
                entry.content,
                entry.metadata.to_string(),
            ],
        )?;

        tracing::debug!(entry_id = %entry.id, user_id = %entry.user_id, "Entry created");
        Ok(entry)
    }

    /// Overwrite an entry's mutable fields. `id`, `user_id`, and
    /// `created_at` are immutable; the row must belong to the entry's
    /// `user_id` or the update is rejected.
    pub fn update_entry(&self, entry: &JournalEntry) -> Result<()> {
        validate_entry_fields(entry.mood, entry.day_in_track)?;

        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            r#"
            UPDATE entries
            SET entry_date = ?3, pillar = ?4, mood = ?5,
                day_in_track = ?6, content = ?7, metadata = ?8
            WHERE id = ?1 AND user_id = ?2
            "#,
            params![
                entry.id,
                entry.user_id,
                entry.entry_date.format("%Y-%m-%d").to_string(),
                entry.pillar.map(|p| p.as_str()),
                entry.mood.map(|m| m as i64),
                entry.day_in_track.map(|d| d as i64),
                entry.content,
                entry.metadata.to_string(),
            ],
        )?;

        if updated == 0 {
            return Err(Self::missing_entry_error(&conn, &entry.id, &entry.user_id));
        }
        Ok(())
    }

    /// Delete an entry owned by `user_id`.
    pub fn delete_entry(&self, user_id: &str, id: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM entries WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        if deleted == 0 {
            return Err(Self::missing_entry_error(&conn, id, user_id));
        }
        tracing::debug!(entry_id = %id, user_id = %user_id, "Entry deleted");
        Ok(())
    }

    /// Distinguish "no such entry" from "someone else's entry" after a
    /// zero-row write.
    fn missing_entry_error(conn: &Connection, id: &str, user_id: &str) -> Error {
        let exists: i64 = conn
            .query_row("SELECT COUNT(*) FROM entries WHERE id = ?", [id], |r| {
                r.get(0)
            })
            .unwrap_or(0);

        if exists > 0 {
            Error::NotOwner {
                entry_id: id.to_string(),
                user_id: user_id.to_string(),
            }
        } else {
            Error::EntryNotFound(id.to_string())
        }
    }

    /// Get an entry by id, scoped to its owner
    pub fn get_entry(&self, user_id: &str, id: &str) -> Result<Option<JournalEntry>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT * FROM entries WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
            Self::row_to_entry,
        )
        .optional()
        .map_err(Error::from)
    }

    /// Get the entry for a calendar day, if any. When a day has several
    /// entries the earliest-created one wins, matching the one-entry-
    /// per-day reading everywhere else.
    pub fn get_entry_for_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<JournalEntry>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            r#"
            SELECT * FROM entries
            WHERE user_id = ?1 AND entry_date = ?2
            ORDER BY created_at ASC
            LIMIT 1
            "#,
            params![user_id, date.format("%Y-%m-%d").to_string()],
            Self::row_to_entry,
        )
        .optional()
        .map_err(Error::from)
    }

    /// List a user's entries with optional filtering, most recent first
    pub fn list_entries(&self, user_id: &str, filter: &EntryFilter) -> Result<Vec<JournalEntry>> {
        let conn = self.conn.lock().unwrap();

        let mut sql = String::from("SELECT * FROM entries WHERE user_id = ?");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id.to_string())];

        if let Some(pillar) = &filter.pillar {
            sql.push_str(" AND pillar = ?");
            params.push(Box::new(pillar.as_str().to_string()));
        }

        if let Some(since) = &filter.since {
            sql.push_str(" AND entry_date >= ?");
            params.push(Box::new(since.format("%Y-%m-%d").to_string()));
        }

        if let Some(until) = &filter.until {
            sql.push_str(" AND entry_date <= ?");
            params.push(Box::new(until.format("%Y-%m-%d").to_string()));
        }

        sql.push_str(" ORDER BY created_at DESC");

        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map(params_refs.as_slice(), Self::row_to_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Total entries ever written by a user
    pub fn count_entries(&self, user_id: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM entries WHERE user_id = ?",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Creation timestamp of the user's most recent entry
    pub fn last_entry_at(&self, user_id: &str) -> Result<Option<DateTime<Utc>>> {
        let conn = self.conn.lock().unwrap();
        let ts: Option<String> = conn.query_row(
            "SELECT MAX(created_at) FROM entries WHERE user_id = ?",
            [user_id],
            |row| row.get(0),
        )?;

        Ok(ts
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }

    // ============================================
    // Analytics feed queries
    // ============================================

    /// Distinct entry dates among the user's most recent `limit`
    /// entries, newest first.
    ///
    /// The cap bounds query cost; streaks longer than the window
    /// truncate (see [`crate::analytics::STREAK_ENTRY_WINDOW`]).
    pub fn recent_entry_dates(&self, user_id: &str, limit: usize) -> Result<Vec<NaiveDate>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT DISTINCT entry_date FROM (
                SELECT entry_date FROM entries
                WHERE user_id = ?1
                ORDER BY created_at DESC
                LIMIT ?2
            )
            ORDER BY entry_date DESC
            "#,
        )?;

        let dates = stmt
            .query_map(params![user_id, limit as i64], |row| {
                row.get::<_, String>(0)
            })?
            .filter_map(|r| r.ok())
            .filter_map(|s| match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    tracing::warn!(entry_date = %s, "Skipping entry with malformed date");
                    None
                }
            })
            .collect();

        Ok(dates)
    }

    /// Highest day-in-track reached for a pillar, 0 if the user has no
    /// entries for it.
    pub fn max_day_in_track(&self, user_id: &str, pillar: Pillar) -> Result<u32> {
        let conn = self.conn.lock().unwrap();
        let max: i64 = conn.query_row(
            r#"
            SELECT COALESCE(MAX(day_in_track), 0) FROM entries
            WHERE user_id = ?1 AND pillar = ?2
            "#,
            params![user_id, pillar.as_str()],
            |row| row.get(0),
        )?;
        Ok(max.max(0) as u32)
    }

    /// Per-pillar entry counts over the user's most recent `window`
    /// entries. Untagged entries occupy window slots but produce no
    /// count, keeping them out of distribution denominators.
    pub fn pillar_counts(&self, user_id: &str, window: usize) -> Result<BTreeMap<Pillar, u32>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT pillar, COUNT(*) FROM (
                SELECT pillar FROM entries
                WHERE user_id = ?1
                ORDER BY created_at DESC
                LIMIT ?2
            )
            WHERE pillar IS NOT NULL
            GROUP BY pillar
            "#,
        )?;

        let rows = stmt.query_map(params![user_id, window as i64], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = BTreeMap::new();
        for row in rows.flatten() {
            let (tag, count) = row;
            match tag.parse::<Pillar>() {
                Ok(pillar) => {
                    counts.insert(pillar, count.max(0) as u32);
                }
                Err(_) => {
                    tracing::warn!(pillar = %tag, "Skipping unknown pillar tag");
                }
            }
        }

        Ok(counts)
    }

    /// Recorded moods keyed by entry date over `[start, end]`. When a
    /// day has several entries with a mood, the first recorded one wins;
    /// moods are never averaged.
    pub fn moods_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<NaiveDate, u8>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT entry_date, mood FROM entries
            WHERE user_id = ?1 AND entry_date >= ?2 AND entry_date <= ?3
              AND mood IS NOT NULL
            ORDER BY created_at ASC
            "#,
        )?;

        let rows = stmt.query_map(
            params![
                user_id,
                start.format("%Y-%m-%d").to_string(),
                end.format("%Y-%m-%d").to_string()
            ],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
        )?;

        let mut moods = HashMap::new();
        for row in rows.flatten() {
            let (date_str, mood) = row;
            if let Ok(date) = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
                moods.entry(date).or_insert(mood as u8);
            }
        }

        Ok(moods)
    }

    // ============================================
    // Dashboard assembly
    // ============================================

    /// Compute the full dashboard snapshot for a user as of the local
    /// calendar day.
    pub fn dashboard_stats(&self, user_id: &str, cfg: &AnalyticsConfig) -> Result<DashboardStats> {
        self.dashboard_stats_at(user_id, cfg, Local::now().date_naive())
    }

    /// Compute the dashboard snapshot as of an explicit `today`.
    ///
    /// The one-shot pipeline: fetch the bounded windows, then run the
    /// pure aggregators over them. Recomputed from scratch on each call.
    pub fn dashboard_stats_at(
        &self,
        user_id: &str,
        cfg: &AnalyticsConfig,
        today: NaiveDate,
    ) -> Result<DashboardStats> {
        let dates = self.recent_entry_dates(user_id, cfg.streak_entry_window)?;
        let counts = self.pillar_counts(user_id, cfg.distribution_window)?;

        let mood_start = today - Duration::days(cfg.mood_window_days as i64 - 1);
        let moods = self.moods_in_range(user_id, mood_start, today)?;

        let mut next_track_days = BTreeMap::new();
        for pillar in Pillar::ALL {
            let max_seen = self.max_day_in_track(user_id, pillar)?;
            next_track_days.insert(
                pillar,
                crate::analytics::next_track_day(max_seen, cfg.track_length),
            );
        }

        Ok(DashboardStats {
            entry_count: self.count_entries(user_id)?,
            last_entry_at: self.last_entry_at(user_id)?,
            current_streak: current_streak(&dates, today),
            longest_streak: longest_streak(&dates),
            distribution: distribution(&counts),
            next_track_days,
            mood_series: mood_series(&moods, cfg.mood_window_days, today),
        })
    }

    // ============================================
    // Row mapping
    // ============================================

    fn row_to_entry(row: &Row) -> rusqlite::Result<JournalEntry> {
        let created_at_str: String = row.get("created_at")?;
        let entry_date_str: String = row.get("entry_date")?;
        let pillar_str: Option<String> = row.get("pillar")?;
        let mood: Option<i64> = row.get("mood")?;
        let day_in_track: Option<i64> = row.get("day_in_track")?;
        let metadata_str: Option<String> = row.get("metadata")?;

        let entry_date = NaiveDate::parse_from_str(&entry_date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(JournalEntry {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            entry_date,
            pillar: pillar_str.and_then(|s| s.parse().ok()),
            mood: mood.map(|m| m as u8),
            day_in_track: day_in_track.map(|d| d.max(0) as u32),
            content: row.get("content")?,
            metadata: metadata_str
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or(serde_json::json!({})),
        })
    }
}
