//! Access token payload decoding.
//!
//! Signatures are not checked here; the remote store validates every token it
//! receives. This only reads who the token claims to be.

use base64::Engine;
use bay_core::identity::Principal;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::AuthError;

/// Claims read from an access token payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// `sub` claim.
    pub user_id: String,
    pub email: Option<String>,
    /// Database role the token runs as (e.g. `authenticated`).
    pub role: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawClaims {
    sub: Option<String>,
    email: Option<String>,
    role: Option<String>,
    exp: Option<i64>,
}

impl TokenClaims {
    /// Decode the payload segment of `jwt`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for malformed tokens and
    /// `AuthError::MissingClaim` when `sub` is absent or empty.
    pub fn decode(jwt: &str) -> Result<Self, AuthError> {
        let parts: Vec<&str> = jwt.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(AuthError::InvalidToken("expected three segments".into()));
        }
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .map_err(|e| AuthError::InvalidToken(format!("base64 decode failed: {e}")))?;
        let raw: RawClaims = serde_json::from_slice(&payload)
            .map_err(|e| AuthError::InvalidToken(format!("JSON parse failed: {e}")))?;

        let user_id = raw
            .sub
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingClaim("sub"))?;
        Ok(Self {
            user_id,
            email: raw.email.filter(|e| !e.trim().is_empty()),
            role: raw.role,
            expires_at: raw.exp.and_then(|exp| DateTime::from_timestamp(exp, 0)),
        })
    }

    #[must_use]
    pub fn to_principal(&self) -> Principal {
        Principal::new(self.user_id.clone(), self.email.clone())
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_jwt(payload: &str) -> String {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        format!(
            "{}.{}.{}",
            engine.encode(r#"{"alg":"HS256"}"#),
            engine.encode(payload),
            engine.encode("sig")
        )
    }

    #[test]
    fn decodes_subject_and_email() {
        let exp = Utc::now().timestamp() + 3600;
        let jwt = make_jwt(&format!(
            r#"{{"sub":"u-1","email":"tech@shop.example","role":"authenticated","exp":{exp}}}"#
        ));
        let claims = TokenClaims::decode(&jwt).unwrap();
        assert_eq!(claims.user_id, "u-1");
        assert_eq!(claims.role.as_deref(), Some("authenticated"));
        assert!(!claims.is_expired());
        assert_eq!(
            claims.to_principal(),
            Principal::new("u-1", Some("tech@shop.example".into()))
        );
    }

    #[test]
    fn blank_email_is_dropped() {
        let claims = TokenClaims::decode(&make_jwt(r#"{"sub":"u-1","email":" "}"#)).unwrap();
        assert_eq!(claims.email, None);
        assert_eq!(claims.expires_at, None);
    }

    #[test]
    fn expired_token_is_reported() {
        let exp = Utc::now().timestamp() - 60;
        let claims = TokenClaims::decode(&make_jwt(&format!(r#"{{"sub":"u","exp":{exp}}}"#)))
            .unwrap();
        assert!(claims.is_expired());
    }

    #[test]
    fn rejects_wrong_segment_count() {
        let err = TokenClaims::decode("not-a-jwt").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn rejects_bad_base64() {
        let err = TokenClaims::decode("h.!!!.s").unwrap_err();
        assert!(err.to_string().contains("base64 decode failed"));
    }

    #[test]
    fn requires_subject() {
        let err = TokenClaims::decode(&make_jwt(r#"{"email":"a@b.co"}"#)).unwrap_err();
        assert!(matches!(err, AuthError::MissingClaim("sub")));
    }
}
