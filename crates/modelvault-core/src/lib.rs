//! Modelvault Core Library
//!
//! Shared functionality for modelvault components:
//! - Store error taxonomy and `SQLite` pool helpers
//! - Configuration resolution and hierarchy
//! - Text-bound validation for bounded metadata fields
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod tracing_init;
pub mod validate;

pub use config::Config;
pub use db::StoreError;
pub use error::{Error, Result};
