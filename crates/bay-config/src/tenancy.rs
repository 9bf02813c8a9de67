//! Table names used for tenant scoping and line-item access.

use serde::{Deserialize, Serialize};

fn default_profile_table() -> String {
    "user_profiles".to_string()
}

fn default_identity_table() -> String {
    "users".to_string()
}

fn default_jobs_table() -> String {
    "jobs".to_string()
}

fn default_job_parts_table() -> String {
    "job_parts".to_string()
}

fn default_vendors_table() -> String {
    "vendors".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TenancyConfig {
    /// Tenant-profile table carrying `org_id` per user.
    #[serde(default = "default_profile_table")]
    pub profile_table: String,

    /// Auth-owned identity table that access policies must not reference.
    #[serde(default = "default_identity_table")]
    pub identity_table: String,

    #[serde(default = "default_jobs_table")]
    pub jobs_table: String,

    #[serde(default = "default_job_parts_table")]
    pub job_parts_table: String,

    #[serde(default = "default_vendors_table")]
    pub vendors_table: String,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            profile_table: default_profile_table(),
            identity_table: default_identity_table(),
            jobs_table: default_jobs_table(),
            job_parts_table: default_job_parts_table(),
            vendors_table: default_vendors_table(),
        }
    }
}
