//! Database models for the modelvault store.

use serde::{Deserialize, Serialize};

/// Model record row: one 3D model and its descriptive metadata.
///
/// `owner_id` points into an external user store; `owner_username` is a
/// denormalized cache of that user's name, kept until a real authorization
/// model lands.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ModelRecord {
    pub id: i64,
    pub name: String,
    pub model_type: String,
    pub description: Option<String>,
    pub status: String,
    pub owner_id: i64,
    pub owner_username: String,
    pub current_version_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Version row: one uploaded revision of a model record.
///
/// `version_number` and `record_id` are fixed at insert time and never
/// mutated afterwards; QA fields may be filled in later by the QA workflow.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ModelVersion {
    pub id: i64,
    pub record_id: i64,
    pub version_number: i64,
    pub file_path: String,
    pub description: Option<String>,
    pub dimensions: Option<String>,
    pub qa_file_path: Option<String>,
    pub qa_remarks: Option<String>,
    pub created_at: i64,
}

impl ModelVersion {
    /// Display label derived from the version number, never persisted.
    pub fn version_label(&self) -> String {
        format!("v{}", self.version_number)
    }
}

/// Record lifecycle status.
///
/// DRAFT is the creation state; the remaining members are driven by the QA
/// workflow. Transition rules live with the callers, not in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Draft,
    UnderScrutiny,
    SentBack,
    Approved,
}

impl RecordStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::UnderScrutiny => "UNDER_SCRUTINY",
            Self::SentBack => "SENT_BACK",
            Self::Approved => "APPROVED",
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input fields for a new version upload.
///
/// The version number is assigned by the store, never supplied by callers.
#[derive(Debug, Clone)]
pub struct NewVersion<'a> {
    pub file_path: &'a str,
    pub description: Option<&'a str>,
    pub dimensions: Option<&'a str>,
}

/// Partial update of a version's mutable fields.
///
/// `None` leaves the stored value untouched. Identity fields
/// (`version_number`, `record_id`) are not representable here at all.
#[derive(Debug, Clone, Default)]
pub struct VersionPatch<'a> {
    pub description: Option<&'a str>,
    pub dimensions: Option<&'a str>,
    pub qa_file_path: Option<&'a str>,
    pub qa_remarks: Option<&'a str>,
}
