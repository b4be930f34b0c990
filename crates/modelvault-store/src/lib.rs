//! Modelvault Store
//!
//! Persistence core for 3D model assets:
//! - `SQLite` storage for model records and their versioned revisions
//! - Monotonic per-record version numbering, safe under concurrent uploads
//! - Explicit transactional cascade from a record to its versions
//! - One-way (parent to child) serialization views with no cyclic output

pub mod storage;
pub mod views;

pub use storage::{Database, StoreError};
pub use views::{ModelRecordView, ModelVersionView};
