//! Database queries for the `model_records` table.

use modelvault_core::db::{StoreError, unix_timestamp};
use modelvault_core::validate::{RECORD_DESCRIPTION_MAX, check_text_bound};
use tracing::debug;

use super::db::Database;
use super::models::{ModelRecord, RecordStatus};

impl Database {
    // =========================================================================
    // Record queries
    // =========================================================================

    /// Create a new model record.
    ///
    /// The record starts in DRAFT status with no versions and no current
    /// version; revisions are attached afterwards via `add_version`.
    pub async fn create_record(
        &self,
        name: &str,
        model_type: &str,
        description: Option<&str>,
        owner_id: i64,
        owner_username: &str,
    ) -> Result<ModelRecord, StoreError> {
        if let Some(desc) = description {
            check_text_bound("record description", desc, RECORD_DESCRIPTION_MAX)?;
        }

        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO model_records (name, model_type, description, status, owner_id, owner_username, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(model_type)
        .bind(description)
        .bind(RecordStatus::Draft.as_str())
        .bind(owner_id)
        .bind(owner_username)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_record(result.last_insert_rowid()).await
    }

    /// Get a model record by ID.
    pub async fn get_record(&self, id: i64) -> Result<ModelRecord, StoreError> {
        sqlx::query_as::<_, ModelRecord>("SELECT * FROM model_records WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Model record {id}")))
    }

    /// Partial update of a record's descriptive metadata.
    ///
    /// `None` keeps the stored value. The owner, status, and version
    /// relationships are never touched here.
    pub async fn update_record(
        &self,
        id: i64,
        name: Option<&str>,
        model_type: Option<&str>,
        description: Option<&str>,
    ) -> Result<ModelRecord, StoreError> {
        if let Some(desc) = description {
            check_text_bound("record description", desc, RECORD_DESCRIPTION_MAX)?;
        }

        let existing = self.get_record(id).await?;
        let now = unix_timestamp();

        sqlx::query(
            "UPDATE model_records SET name = ?, model_type = ?, description = ?, updated_at = ? WHERE id = ?",
        )
        .bind(name.unwrap_or(&existing.name))
        .bind(model_type.unwrap_or(&existing.model_type))
        .bind(description.or(existing.description.as_deref()))
        .bind(now)
        .bind(id)
        .execute(self.pool())
        .await?;

        self.get_record(id).await
    }

    /// Update a record's lifecycle status (QA workflow transitions).
    pub async fn update_record_status(
        &self,
        id: i64,
        status: RecordStatus,
    ) -> Result<ModelRecord, StoreError> {
        // Existence check first so a missing record surfaces as NotFound
        // rather than a silent zero-row update.
        self.get_record(id).await?;

        let now = unix_timestamp();

        sqlx::query("UPDATE model_records SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(now)
            .bind(id)
            .execute(self.pool())
            .await?;

        self.get_record(id).await
    }

    /// Promote a version to be the record's current version.
    ///
    /// Uploading a version never promotes it implicitly; this is the one
    /// place the current-version pointer moves forward.
    pub async fn set_current_version(
        &self,
        record_id: i64,
        version_id: i64,
    ) -> Result<ModelRecord, StoreError> {
        self.get_record(record_id).await?;
        let version = self.get_version(version_id).await?;

        if version.record_id != record_id {
            return Err(StoreError::InvalidReference(format!(
                "Version {version_id} belongs to record {}, not record {record_id}",
                version.record_id
            )));
        }

        let now = unix_timestamp();

        sqlx::query(
            "UPDATE model_records SET current_version_id = ?, updated_at = ? WHERE id = ?",
        )
        .bind(version_id)
        .bind(now)
        .bind(record_id)
        .execute(self.pool())
        .await?;

        self.get_record(record_id).await
    }

    /// Delete a record and all of its versions.
    ///
    /// Runs as a single transaction: clear the current-version pointer,
    /// delete the children, delete the parent. Either everything goes or
    /// nothing does.
    pub async fn delete_record(&self, id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool().begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM model_records WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(StoreError::NotFound(format!("Model record {id}")));
        }

        // The pointer references a child row; clear it before the children go.
        sqlx::query("UPDATE model_records SET current_version_id = NULL WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let versions = sqlx::query("DELETE FROM model_versions WHERE record_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM model_records WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(
            record_id = id,
            versions = versions.rows_affected(),
            "Model record deleted with version cascade"
        );

        Ok(())
    }

    /// List all records, id-ordered.
    pub async fn list_records(&self) -> Result<Vec<ModelRecord>, StoreError> {
        let records = sqlx::query_as::<_, ModelRecord>("SELECT * FROM model_records ORDER BY id")
            .fetch_all(self.pool())
            .await?;

        Ok(records)
    }

    /// List records owned by a user, id-ordered.
    pub async fn list_records_by_owner(
        &self,
        owner_id: i64,
    ) -> Result<Vec<ModelRecord>, StoreError> {
        let records = sqlx::query_as::<_, ModelRecord>(
            "SELECT * FROM model_records WHERE owner_id = ? ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(self.pool())
        .await?;

        Ok(records)
    }

    /// List records in a given lifecycle status, id-ordered.
    ///
    /// The QA dashboard's pending queue is `list_records_by_status(UnderScrutiny)`.
    pub async fn list_records_by_status(
        &self,
        status: RecordStatus,
    ) -> Result<Vec<ModelRecord>, StoreError> {
        let records = sqlx::query_as::<_, ModelRecord>(
            "SELECT * FROM model_records WHERE status = ? ORDER BY id",
        )
        .bind(status.as_str())
        .fetch_all(self.pool())
        .await?;

        Ok(records)
    }
}
