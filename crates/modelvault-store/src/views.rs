//! One-way serialization views.
//!
//! The wire shape walks strictly parent to child: a record view embeds its
//! versions, a version view carries no reference back to its record, and
//! the owner appears only as scalar fields. Cyclic output is impossible by
//! construction, not by serializer annotation.

use serde::Serialize;

use crate::storage::{Database, ModelRecord, ModelVersion, StoreError};

/// Serializable shape of a version. No parent field.
#[derive(Debug, Clone, Serialize)]
pub struct ModelVersionView {
    pub id: i64,
    pub version_number: i64,
    pub version_label: String,
    pub file_path: String,
    pub description: Option<String>,
    pub dimensions: Option<String>,
    pub qa_file_path: Option<String>,
    pub qa_remarks: Option<String>,
    pub created_at: i64,
}

impl From<ModelVersion> for ModelVersionView {
    fn from(v: ModelVersion) -> Self {
        let version_label = v.version_label();
        Self {
            id: v.id,
            version_number: v.version_number,
            version_label,
            file_path: v.file_path,
            description: v.description,
            dimensions: v.dimensions,
            qa_file_path: v.qa_file_path,
            qa_remarks: v.qa_remarks,
            created_at: v.created_at,
        }
    }
}

/// Serializable shape of a record with its versions embedded.
///
/// The owner is flattened to `owner_id` + `owner_username`; the owner's
/// other records are never re-embedded.
#[derive(Debug, Clone, Serialize)]
pub struct ModelRecordView {
    pub id: i64,
    pub name: String,
    pub model_type: String,
    pub description: Option<String>,
    pub status: String,
    pub owner_id: i64,
    pub owner_username: String,
    pub current_version: Option<ModelVersionView>,
    pub versions: Vec<ModelVersionView>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ModelRecordView {
    fn assemble(record: ModelRecord, versions: Vec<ModelVersion>) -> Self {
        let current_version = record
            .current_version_id
            .and_then(|cid| versions.iter().find(|v| v.id == cid).cloned())
            .map(ModelVersionView::from);

        Self {
            id: record.id,
            name: record.name,
            model_type: record.model_type,
            description: record.description,
            status: record.status,
            owner_id: record.owner_id,
            owner_username: record.owner_username,
            current_version,
            versions: versions.into_iter().map(ModelVersionView::from).collect(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl Database {
    /// Assemble the full serializable view of a record.
    pub async fn record_view(&self, id: i64) -> Result<ModelRecordView, StoreError> {
        let record = self.get_record(id).await?;
        let versions = self.list_versions(id).await?;
        Ok(ModelRecordView::assemble(record, versions))
    }

    /// Serializable view of a single version.
    pub async fn version_view(&self, id: i64) -> Result<ModelVersionView, StoreError> {
        Ok(self.get_version(id).await?.into())
    }
}
