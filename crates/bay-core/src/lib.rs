//! # bay-core
//!
//! Core types and error taxonomies for Bayline, the dealership service-job
//! data access layer.
//!
//! This crate provides the foundational types shared across all Bayline crates:
//! - Entity structs for jobs, line items (job parts) and vendors
//! - The line-item write row and its scheduling invariant
//! - Capability names and the per-capability probe state machine
//! - Telemetry counter keys and log levels
//! - The schema-error and caller-facing error taxonomies
//! - Principal and org context identity types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
