//! Database layer for stoicaf
//!
//! This module provides the storage layer using SQLite with:
//! - Schema migrations
//! - Repository pattern for entry queries and mutations
//! - Dashboard assembly over the analytics functions

pub mod repo;
pub mod schema;

pub use repo::{EntryFilter, Journal};
