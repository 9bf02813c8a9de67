//! # bay-auth
//!
//! Who is acting, and on behalf of which tenant.
//!
//! - [`is_access_denied`] separates policy rejections from schema drift and
//!   business-rule failures.
//! - [`remap_permission_error`] turns identity-table policy denials into an
//!   actionable remediation message.
//! - [`OrgContextResolver`] finds the caller's org, recovering from denied or
//!   empty profile lookups without ever failing.
//! - [`claims`] decodes the acting [`Principal`](bay_core::identity::Principal)
//!   from an access token.

pub mod access;
pub mod claims;
pub mod error;
pub mod org;
pub mod remediation;

pub use access::is_access_denied;
pub use claims::TokenClaims;
pub use error::AuthError;
pub use org::OrgContextResolver;
pub use remediation::remap_permission_error;
