//! Actionable messages for policy denials that reference the identity table.
//!
//! Policies written against the auth layer's identity table (`users`) break
//! once access runs as an ordinary role; the fix is always the same: reload
//! the schema cache and repoint the policy at the tenant-profile table.

use bay_remote::RemoteError;
use regex::Regex;

use crate::access::is_access_denied;

pub const ACCESS_POLICIES_DOC: &str = "docs/ACCESS_POLICIES.md";
pub const SCHEMA_CACHE_DOC: &str = "docs/SCHEMA_CACHE.md";

/// Whether `message` names `table` as a whole identifier.
fn mentions_table(message: &str, table: &str) -> bool {
    let pattern = format!(r"(?i)(^|[^a-z0-9_]){}($|[^a-z0-9_])", regex::escape(table));
    Regex::new(&pattern).is_ok_and(|re| re.is_match(message))
}

/// Remediation text for a denial on `identity_table`, pointing the policy at
/// `profile_table`.
#[must_use]
pub fn remediation_message(identity_table: &str, profile_table: &str) -> String {
    format!(
        "Access was denied by a policy that references the `{identity_table}` table. \
         To fix: (1) reload the schema cache with `NOTIFY pgrst, 'reload schema';` \
         (2) update the policy to look up tenants in `{profile_table}` instead of \
         `{identity_table}`. See {ACCESS_POLICIES_DOC} and {SCHEMA_CACHE_DOC}."
    )
}

/// Rewrite identity-table policy denials into remediation guidance.
///
/// The original message moves to `details`; code and status are kept so the
/// result still classifies as a denial. Every other error is returned as is.
#[must_use]
pub fn remap_permission_error(
    error: RemoteError,
    identity_table: &str,
    profile_table: &str,
) -> RemoteError {
    if !is_access_denied(&error) || !mentions_table(&error.full_text(), identity_table) {
        return error;
    }
    tracing::debug!(table = identity_table, "remapping identity-table policy denial");
    RemoteError {
        message: remediation_message(identity_table, profile_table),
        details: Some(error.message),
        hint: Some(format!("{ACCESS_POLICIES_DOC}, {SCHEMA_CACHE_DOC}")),
        ..error
    }
}
