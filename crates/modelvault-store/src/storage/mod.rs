//! `SQLite` storage for modelvault.
//!
//! Provides persistence for model records, their versioned revisions, and
//! the current-version pointer linking the two.

mod db;
mod models;
mod queries_records;
mod queries_versions;


pub use db::Database;
pub use models::*;
pub use modelvault_core::db::StoreError;
