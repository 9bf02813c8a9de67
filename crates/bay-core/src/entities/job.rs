use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Embedded vendor projection (`vendor:vendors(id,name)`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VendorRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A dealership service job, scoped to an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub job_number: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub promised_date: Option<NaiveDate>,
    /// Present only when the job → vendor relationship was projected.
    #[serde(default)]
    pub vendor: Option<VendorRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Job-level vendor name, if the relationship was projected and named.
    #[must_use]
    pub fn vendor_name(&self) -> Option<&str> {
        self.vendor
            .as_ref()
            .and_then(|v| v.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_row_without_vendor_projection() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": "job-1",
            "job_number": "J-1001",
            "org_id": "org-1",
        }))
        .unwrap();
        assert_eq!(job.vendor, None);
        assert_eq!(job.vendor_name(), None);
    }

    #[test]
    fn vendor_name_ignores_blank_names() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": "job-1",
            "vendor": { "id": "v-1", "name": "  " },
        }))
        .unwrap();
        assert_eq!(job.vendor_name(), None);
    }
}
