//! Repository modules for jobs, line items and tenant context.
//!
//! Each module adds methods to `BayService` via `impl BayService` blocks.

pub mod job_parts;
pub mod jobs;
pub mod org;
