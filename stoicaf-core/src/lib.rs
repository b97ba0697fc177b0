//! # stoicaf-core
//!
//! Core library for Stoic AF - a local-first daily journaling tracker.
//!
//! This library provides:
//! - Domain types for journal entries and pillars
//! - SQLite entry store with validated writes (the query gateway)
//! - Pure analytics over fetched entries: streaks, pillar progress and
//!   distribution, mood series, and the assembled dashboard
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows one way through two layers:
//! - **Store:** the [`Journal`] gateway owns all I/O and validation
//! - **Analytics:** pure, total functions over snapshots the gateway
//!   fetched; no I/O, no failures, empty input is a normal case
//!
//! ## Example
//!
//! ```rust,no_run
//! use stoicaf_core::{Config, Journal};
//!
//! let config = Config::load().expect("failed to load config");
//! let journal = Journal::open(&Config::database_path()).expect("failed to open journal");
//! journal.migrate().expect("failed to run migrations");
//!
//! let stats = journal
//!     .dashboard_stats("user-1", &config.analytics)
//!     .expect("failed to compute dashboard");
//! println!("current streak: {} days", stats.current_streak);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::{EntryFilter, Journal};
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod types;
