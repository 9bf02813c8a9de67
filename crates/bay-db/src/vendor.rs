//! Derived vendor display name for a job. Never persisted.

use bay_core::entities::JobPart;
use serde::{Deserialize, Serialize};

pub const MIXED: &str = "Mixed";
pub const UNASSIGNED: &str = "Unassigned";

/// Distinct vendor names on off-site items, in first-seen order.
///
/// Items without a projected vendor (degraded relationship or no vendor)
/// contribute nothing.
#[must_use]
pub fn off_site_vendor_names(parts: &[JobPart]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in parts
        .iter()
        .filter(|part| part.is_off_site)
        .filter_map(JobPart::vendor_name)
    {
        if !names.iter().any(|seen| seen == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// One distinct name → that name; several → `"Mixed"`; none → the job-level
/// vendor name, else `"Unassigned"`.
#[must_use]
pub fn aggregate_vendor(parts: &[JobPart], job_vendor_name: Option<&str>) -> String {
    let names = off_site_vendor_names(parts);
    match names.as_slice() {
        [only] => only.clone(),
        [] => job_vendor_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNASSIGNED)
            .to_string(),
        _ => MIXED.to_string(),
    }
}

/// Result of [`BayService::job_vendor_summary`](crate::BayService::job_vendor_summary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorSummary {
    pub job_id: String,
    pub display_name: String,
    pub off_site_vendors: Vec<String>,
    pub job_vendor: Option<String>,
}
