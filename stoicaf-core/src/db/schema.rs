//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: Initial schema
    r#"
    -- One row per journal entry. entry_date is the user's intended local
    -- day (YYYY-MM-DD) and the dedup key for one-entry-per-day reads;
    -- created_at is the store-assigned UTC instant.
    CREATE TABLE IF NOT EXISTS entries (
        id            TEXT PRIMARY KEY,
        user_id       TEXT NOT NULL,
        created_at    DATETIME NOT NULL,
        entry_date    TEXT NOT NULL,
        pillar        TEXT,
        mood          INTEGER,
        day_in_track  INTEGER,
        content       TEXT,
        metadata      JSON
    );

    -- Recency scans (streaks, distribution windows)
    CREATE INDEX IF NOT EXISTS idx_entries_user_created ON entries(user_id, created_at DESC);
    -- Date-range scans (mood windows, one-per-day lookup)
    CREATE INDEX IF NOT EXISTS idx_entries_user_date ON entries(user_id, entry_date);
    -- Per-pillar scans (track progress)
    CREATE INDEX IF NOT EXISTS idx_entries_user_pillar ON entries(user_id, pillar);
    "#,
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap_or(0);

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute(&format!("PRAGMA user_version = {}", version), [])?;
        }
    }

    if current_version < SCHEMA_VERSION {
        tracing::info!(
            from = current_version,
            to = SCHEMA_VERSION,
            "Migrations complete"
        );
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_entries_table_created() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let exists: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='entries'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(exists, 1);
    }

    #[test]
    fn test_indexes_created() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        for index in [
            "idx_entries_user_created",
            "idx_entries_user_date",
            "idx_entries_user_pillar",
        ] {
            let exists: i32 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name=?",
                    [index],
                    |r| r.get(0),
                )
                .unwrap();
            assert_eq!(exists, 1, "index {} should exist", index);
        }
    }
}
