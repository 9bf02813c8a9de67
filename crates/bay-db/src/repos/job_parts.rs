//! Line-item (job part) repository: resilient reads and the write path.

use bay_core::entities::{JobPart, LineItemInput, LineItemRow, SCHEDULE_TIME_COLUMNS};
use bay_core::enums::{Capability, SchemaErrorKind, TelemetryKey};
use bay_remote::{Filter, RemoteError, SelectQuery};
use bay_session::logger::category;
use serde_json::{Value, json};

use crate::error::DatabaseError;
use crate::helpers::{decode_rows, require_id};
use crate::resilient::OptionalFeature;
use crate::service::BayService;

const SELECT_COLS: &str = "id,job_id,product_id,unit_price,quantity_used,promised_date,\
     requires_scheduling,no_schedule_reason,is_off_site,vendor_id";

impl BayService {
    fn job_part_features(&self) -> [OptionalFeature; 2] {
        [
            OptionalFeature::relationship(
                Capability::JobPartsVendorRel,
                format!("vendor:{}(id,name)", self.tables().vendors_table),
            ),
            OptionalFeature::columns(Capability::JobPartsScheduledTimes, &SCHEDULE_TIME_COLUMNS),
        ]
    }

    /// Line items for a job, with vendor and scheduling times when the remote
    /// schema supports them.
    ///
    /// Missing relationships or columns never fail the call: items come back
    /// without those fields (or, if even the reduced read hits missing schema,
    /// as an empty list).
    ///
    /// # Errors
    ///
    /// `DatabaseError::Validation` for a blank `job_id`; `DatabaseError::Remote`
    /// for failures that are not schema drift.
    pub async fn list_job_parts(&self, job_id: &str) -> Result<Vec<JobPart>, DatabaseError> {
        let job_id = require_id(job_id, "job_id")?;
        let query = SelectQuery::new(self.tables().job_parts_table.as_str()).eq("job_id", job_id);
        let rows = self
            .select_resilient(
                "list_job_parts",
                query,
                SELECT_COLS,
                &self.job_part_features(),
            )
            .await?;
        decode_rows(rows, "job part")
    }

    /// Insert line items for a job. An empty list is a no-op.
    ///
    /// Every row is built (and validated) before any network call.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Validation` for bad input; `DatabaseError::Remote` for
    /// rejected writes, with identity-table policy denials rewritten into
    /// remediation guidance.
    pub async fn insert_job_parts(
        &self,
        job_id: &str,
        items: &[LineItemInput],
    ) -> Result<Vec<JobPart>, DatabaseError> {
        let rows = build_rows(job_id, items)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let inserted = self.write_rows(rows).await?;
        decode_rows(inserted, "job part")
    }

    /// Replace a job's line items. The new rows are inserted first and the
    /// previous rows are deleted only once that insert succeeds. An empty
    /// list only deletes.
    ///
    /// # Errors
    ///
    /// See [`BayService::insert_job_parts`]. A failed insert leaves the
    /// existing rows untouched.
    pub async fn replace_job_parts(
        &self,
        job_id: &str,
        items: &[LineItemInput],
    ) -> Result<Vec<JobPart>, DatabaseError> {
        let rows = build_rows(job_id, items)?;
        let job_id = require_id(job_id, "job_id")?;
        let table = self.tables().job_parts_table.clone();

        if rows.is_empty() {
            self.store()
                .delete(&table, &[Filter::eq("job_id", job_id)])
                .await
                .map_err(|e| self.write_failed("delete", e))?;
            return Ok(Vec::new());
        }

        let existing = self
            .store()
            .select(&SelectQuery::new(table.as_str()).select("id").eq("job_id", job_id))
            .await
            .map_err(|e| self.write_failed("select", e))?;
        let previous_ids: Vec<String> = existing
            .iter()
            .filter_map(|row| row.get("id").and_then(Value::as_str).map(str::to_string))
            .collect();

        let inserted = self.write_rows(rows).await?;
        let parts: Vec<JobPart> = decode_rows(inserted, "job part")?;

        let stale: Vec<&str> = previous_ids
            .iter()
            .map(String::as_str)
            .filter(|id| parts.iter().all(|part| part.id != *id))
            .collect();
        if !stale.is_empty() {
            self.store()
                .delete(
                    &table,
                    &[Filter::eq("job_id", job_id), Filter::is_in("id", stale)],
                )
                .await
                .map_err(|e| self.write_failed("delete", e))?;
        }
        Ok(parts)
    }

    /// Full-shape insert, with one retry without scheduling times when the
    /// remote schema lacks those columns.
    async fn write_rows(&self, mut rows: Vec<LineItemRow>) -> Result<Vec<Value>, DatabaseError> {
        let table = self.tables().job_parts_table.clone();
        let has_times = rows.iter().any(LineItemRow::has_schedule_times);
        let error = match self.store().insert(&table, &encode_rows(&rows)?).await {
            Ok(inserted) => {
                if has_times {
                    self.diagnostics()
                        .capabilities()
                        .set(Capability::JobPartsScheduledTimes, true);
                }
                return Ok(inserted);
            }
            Err(error) => error,
        };

        if !has_times || !self.is_schedule_column_error(&error) {
            return Err(self.write_failed("insert", error));
        }

        for row in &mut rows {
            row.strip_schedule_times();
        }
        self.diagnostics()
            .capabilities()
            .set(Capability::JobPartsScheduledTimes, false);
        let count = self
            .diagnostics()
            .telemetry()
            .increment(TelemetryKey::ScheduleWriteFallback);
        self.diagnostics().logger().warn(
            category::WRITE_PATH,
            "retrying line-item write without scheduling times",
            json!({
                "table": table,
                "rows": rows.len(),
                "count": count,
                "detail": error.message,
            }),
        );

        // The retry's failure is reported as is.
        self.store()
            .insert(&table, &encode_rows(&rows)?)
            .await
            .map_err(DatabaseError::from)
    }

    fn is_schedule_column_error(&self, error: &RemoteError) -> bool {
        if self.classifier().classify(error) != SchemaErrorKind::MissingColumn {
            return false;
        }
        match self.classifier().missing_column(error) {
            Some(name) => SCHEDULE_TIME_COLUMNS.contains(&name.as_str()),
            None => {
                let text = error.full_text().to_lowercase();
                SCHEDULE_TIME_COLUMNS.iter().any(|c| text.contains(c))
            }
        }
    }

    fn write_failed(&self, operation: &str, error: RemoteError) -> DatabaseError {
        let error = self.remap(error);
        self.diagnostics().logger().error(
            category::WRITE_PATH,
            "line-item write failed",
            json!({
                "operation": operation,
                "code": error.code,
                "detail": error.message,
            }),
        );
        error.into()
    }
}

fn build_rows(job_id: &str, items: &[LineItemInput]) -> Result<Vec<LineItemRow>, DatabaseError> {
    require_id(job_id, "job_id")?;
    items
        .iter()
        .map(|item| LineItemRow::from_input(job_id, item).map_err(DatabaseError::from))
        .collect()
}

/// Every row in a batch carries the same keys: the scheduling-time columns
/// appear on all rows (null where unset) when any row has times, and on none
/// otherwise.
fn encode_rows(rows: &[LineItemRow]) -> Result<Vec<Value>, DatabaseError> {
    let with_times = rows.iter().any(LineItemRow::has_schedule_times);
    rows.iter()
        .map(|row| {
            let mut value =
                serde_json::to_value(row).map_err(|e| DatabaseError::Other(e.into()))?;
            if let (false, Some(object)) = (with_times, value.as_object_mut()) {
                for column in SCHEDULE_TIME_COLUMNS {
                    object.remove(column);
                }
            }
            Ok(value)
        })
        .collect()
}
