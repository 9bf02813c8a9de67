//! Access-policy denial detection.

use bay_remote::RemoteError;

/// Postgres `insufficient_privilege`.
const INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Query-layer auth error family (JWT missing, expired, role switch failed).
const AUTH_CODE_PREFIX: &str = "PGRST3";

const DENIAL_PHRASES: [&str; 4] = [
    "permission denied",
    "row-level security",
    "row level security",
    "policy",
];

/// Whether `error` is a rejection by access control rather than a missing
/// schema element or a business constraint.
#[must_use]
pub fn is_access_denied(error: &RemoteError) -> bool {
    if let Some(code) = error.code.as_deref() {
        if code == INSUFFICIENT_PRIVILEGE || code.starts_with(AUTH_CODE_PREFIX) {
            return true;
        }
    }
    if matches!(error.status, Some(401 | 403)) {
        return true;
    }
    let text = error.full_text().to_lowercase();
    DENIAL_PHRASES.iter().any(|phrase| text.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_privilege_code() {
        assert!(is_access_denied(
            &RemoteError::new("denied").with_code("42501")
        ));
    }

    #[test]
    fn auth_code_family() {
        assert!(is_access_denied(
            &RemoteError::new("JWT expired").with_code("PGRST301")
        ));
    }

    #[test]
    fn forbidden_status() {
        assert!(is_access_denied(&RemoteError::new("nope").with_status(403)));
        assert!(is_access_denied(&RemoteError::new("nope").with_status(401)));
    }

    #[test]
    fn policy_phrases_any_case() {
        for message in [
            "Permission denied for table users",
            "new row violates row-level security policy for table \"job_parts\"",
            "ROW LEVEL SECURITY is enabled",
        ] {
            assert!(is_access_denied(&RemoteError::new(message)), "{message}");
        }
    }

    #[test]
    fn drift_and_constraints_are_not_denials() {
        for error in [
            RemoteError::new("column \"scheduled_start_time\" does not exist").with_code("42703"),
            RemoteError::new(
                "Could not find a relationship between 'job_parts' and 'vendors' in the schema cache",
            )
            .with_code("PGRST200"),
            RemoteError::new("duplicate key value violates unique constraint").with_code("23505"),
            RemoteError::default(),
        ] {
            assert!(!is_access_denied(&error), "{error:?}");
        }
    }
}
