//! Job repository: org-scoped listing, lookup and the vendor summary.

use bay_core::entities::Job;
use bay_core::enums::Capability;
use bay_remote::SelectQuery;
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::helpers::{decode_rows, require_id};
use crate::resilient::OptionalFeature;
use crate::service::BayService;
use crate::vendor::{VendorSummary, aggregate_vendor, off_site_vendor_names};

const SELECT_COLS: &str =
    "id,job_number,title,status,org_id,vendor_id,promised_date,created_at,updated_at";

const DEFAULT_LIMIT: usize = 50;

/// Listing options for [`BayService::list_jobs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilter {
    pub status: Option<String>,
    /// Defaults to 50.
    pub limit: Option<usize>,
}

impl BayService {
    fn job_features(&self) -> [OptionalFeature; 1] {
        [OptionalFeature::relationship(
            Capability::JobsVendorRel,
            format!("vendor:{}(id,name)", self.tables().vendors_table),
        )]
    }

    /// Jobs visible to the acting principal's org, newest first.
    ///
    /// With an unresolved org no org filter is applied and scoping is left to
    /// the remote store's access policies.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Remote` for failures that are not schema drift.
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, DatabaseError> {
        let org = self.org_context().await;
        let mut query = SelectQuery::new(self.tables().jobs_table.as_str())
            .order("created_at", true)
            .limit(filter.limit.unwrap_or(DEFAULT_LIMIT));
        if let Some(org_id) = &org.org_id {
            query = query.eq("org_id", org_id.as_str());
        } else {
            tracing::debug!("listing jobs without org filter");
        }
        if let Some(status) = filter.status.as_deref().filter(|s| !s.trim().is_empty()) {
            query = query.eq("status", status.trim());
        }

        let rows = self
            .select_resilient("list_jobs", query, SELECT_COLS, &self.job_features())
            .await?;
        decode_rows(rows, "job")
    }

    /// A single job, scoped to the acting principal's org when it resolves.
    ///
    /// # Errors
    ///
    /// `DatabaseError::Validation` for a blank id; `DatabaseError::NoResult`
    /// when no visible job has that id.
    pub async fn get_job(&self, job_id: &str) -> Result<Job, DatabaseError> {
        let job_id = require_id(job_id, "job_id")?;
        let org = self.org_context().await;
        let mut query = SelectQuery::new(self.tables().jobs_table.as_str())
            .eq("id", job_id)
            .limit(1);
        if let Some(org_id) = &org.org_id {
            query = query.eq("org_id", org_id.as_str());
        }
        let rows = self
            .select_resilient("get_job", query, SELECT_COLS, &self.job_features())
            .await?;
        decode_rows::<Job>(rows, "job")?
            .into_iter()
            .next()
            .ok_or(DatabaseError::NoResult)
    }

    /// Vendor display name for a job, derived from its off-site line items.
    ///
    /// # Errors
    ///
    /// See [`BayService::get_job`] and [`BayService::list_job_parts`].
    pub async fn job_vendor_summary(&self, job_id: &str) -> Result<VendorSummary, DatabaseError> {
        let job = self.get_job(job_id).await?;
        let parts = self.list_job_parts(&job.id).await?;
        let job_vendor = job.vendor_name().map(ToString::to_string);
        Ok(VendorSummary {
            display_name: aggregate_vendor(&parts, job_vendor.as_deref()),
            off_site_vendors: off_site_vendor_names(&parts),
            job_vendor,
            job_id: job.id,
        })
    }
}
