//! Analytics over a user's journal entries.
//!
//! The functions here are pure and total: they operate on in-memory
//! snapshots the store has already fetched, perform no I/O, and return a
//! defined result for every well-typed input including the empty case
//! (0 streak, zeroed distribution, all-null mood series). All failure
//! handling lives in the [`db`](crate::db) gateway.
//!
//! Data flows one way: the presentation layer asks the gateway for raw
//! entries, the entries flow through these aggregators, and the outputs
//! flow back for rendering. Nothing here calls back into the store.
//!
//! Each aggregation reads a bounded recent window (see
//! [`STREAK_ENTRY_WINDOW`], [`DISTRIBUTION_WINDOW`], [`MOOD_WINDOW_DAYS`])
//! rather than a user's full history; the constants double as the
//! defaults of [`AnalyticsConfig`](crate::config::AnalyticsConfig).

pub mod dashboard;
pub mod mood;
pub mod pillars;
pub mod streak;

pub use dashboard::DashboardStats;
pub use mood::{mood_series, MoodPoint, MOOD_WINDOW_DAYS};
pub use pillars::{distribution, next_track_day, PillarShare, DISTRIBUTION_WINDOW, TRACK_LENGTH};
pub use streak::{current_streak, longest_streak, STREAK_ENTRY_WINDOW};
