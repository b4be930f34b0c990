//! Database queries for the `model_versions` table.

use modelvault_core::db::{StoreError, is_unique_violation, unix_timestamp};
use modelvault_core::validate::{QA_REMARKS_MAX, VERSION_DESCRIPTION_MAX, check_text_bound};
use tracing::debug;

use super::db::Database;
use super::models::{ModelVersion, NewVersion, RecordStatus, VersionPatch};

/// Attempts before a contended version-number assignment gives up.
const ADD_VERSION_ATTEMPTS: u32 = 3;

impl Database {
    // =========================================================================
    // Version queries
    // =========================================================================

    /// Attach a new revision to a record.
    ///
    /// The version number is `1 + max(existing)` for this record, assigned
    /// inside the insert itself so concurrent uploads serialize on the
    /// write rather than racing a separate read. A collision on the
    /// `UNIQUE(record_id, version_number)` index is retried; exhausted
    /// retries surface as `Conflict`. The current-version pointer is never
    /// moved here; promotion is an explicit, separate step.
    pub async fn add_version(
        &self,
        record_id: i64,
        version: &NewVersion<'_>,
    ) -> Result<ModelVersion, StoreError> {
        if let Some(desc) = version.description {
            check_text_bound("version description", desc, VERSION_DESCRIPTION_MAX)?;
        }

        self.get_record(record_id).await?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_insert_version(record_id, version).await {
                Ok(id) => {
                    let inserted = self.get_version(id).await?;
                    debug!(
                        record_id,
                        version_number = inserted.version_number,
                        "Version added"
                    );
                    return Ok(inserted);
                }
                Err(e) if is_unique_violation(&e) => {
                    if attempt >= ADD_VERSION_ATTEMPTS {
                        return Err(StoreError::Conflict(format!(
                            "Version number contention on record {record_id} after {attempt} attempts"
                        )));
                    }
                    debug!(record_id, attempt, "Version number collision, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// One number-assignment-plus-insert attempt, atomic with the parent
    /// `updated_at` refresh. The INSERT..SELECT computes the next number
    /// while already holding the write lock.
    async fn try_insert_version(
        &self,
        record_id: i64,
        version: &NewVersion<'_>,
    ) -> Result<i64, sqlx::Error> {
        let now = unix_timestamp();
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "INSERT INTO model_versions (record_id, version_number, file_path, description, dimensions, created_at) \
             SELECT ?, COALESCE(MAX(version_number), 0) + 1, ?, ?, ?, ? \
             FROM model_versions WHERE record_id = ?",
        )
        .bind(record_id)
        .bind(version.file_path)
        .bind(version.description)
        .bind(version.dimensions)
        .bind(now)
        .bind(record_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE model_records SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(record_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a version by ID.
    pub async fn get_version(&self, id: i64) -> Result<ModelVersion, StoreError> {
        sqlx::query_as::<_, ModelVersion>("SELECT * FROM model_versions WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Model version {id}")))
    }

    /// List a record's versions in insertion (version-number) order.
    pub async fn list_versions(&self, record_id: i64) -> Result<Vec<ModelVersion>, StoreError> {
        self.get_record(record_id).await?;

        let versions = sqlx::query_as::<_, ModelVersion>(
            "SELECT * FROM model_versions WHERE record_id = ? ORDER BY version_number",
        )
        .bind(record_id)
        .fetch_all(self.pool())
        .await?;

        Ok(versions)
    }

    /// Partial update of a version's description, dimensions, and QA fields.
    ///
    /// `version_number` and `record_id` are identity fields and cannot be
    /// changed through any store operation.
    pub async fn update_version(
        &self,
        id: i64,
        patch: &VersionPatch<'_>,
    ) -> Result<ModelVersion, StoreError> {
        if let Some(desc) = patch.description {
            check_text_bound("version description", desc, VERSION_DESCRIPTION_MAX)?;
        }
        if let Some(remarks) = patch.qa_remarks {
            check_text_bound("QA remarks", remarks, QA_REMARKS_MAX)?;
        }

        let existing = self.get_version(id).await?;

        sqlx::query(
            "UPDATE model_versions SET description = ?, dimensions = ?, qa_file_path = ?, qa_remarks = ? WHERE id = ?",
        )
        .bind(patch.description.or(existing.description.as_deref()))
        .bind(patch.dimensions.or(existing.dimensions.as_deref()))
        .bind(patch.qa_file_path.or(existing.qa_file_path.as_deref()))
        .bind(patch.qa_remarks.or(existing.qa_remarks.as_deref()))
        .bind(id)
        .execute(self.pool())
        .await?;

        self.get_version(id).await
    }

    /// QA rejection of a version: store the QA artifact path and remarks
    /// and send the parent record back, in one transaction.
    pub async fn reject_version(
        &self,
        id: i64,
        qa_file_path: &str,
        qa_remarks: &str,
    ) -> Result<ModelVersion, StoreError> {
        check_text_bound("QA remarks", qa_remarks, QA_REMARKS_MAX)?;

        let version = self.get_version(id).await?;
        let now = unix_timestamp();

        let mut tx = self.pool().begin().await?;

        sqlx::query("UPDATE model_versions SET qa_file_path = ?, qa_remarks = ? WHERE id = ?")
            .bind(qa_file_path)
            .bind(qa_remarks)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE model_records SET status = ?, updated_at = ? WHERE id = ?")
            .bind(RecordStatus::SentBack.as_str())
            .bind(now)
            .bind(version.record_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_version(id).await
    }

    /// Delete a single version.
    ///
    /// When the deleted version is its parent's current version, the
    /// pointer is cleared in the same transaction; the parent keeps no
    /// dangling reference at any observable point.
    pub async fn delete_version(&self, id: i64) -> Result<(), StoreError> {
        let version = self.get_version(id).await?;
        let now = unix_timestamp();

        let mut tx = self.pool().begin().await?;

        sqlx::query(
            "UPDATE model_records SET current_version_id = NULL WHERE id = ? AND current_version_id = ?",
        )
        .bind(version.record_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM model_versions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE model_records SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(version.record_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(
            version_id = id,
            record_id = version.record_id,
            "Version deleted"
        );

        Ok(())
    }
}
