//! Entity structs for Bayline service-job data.
//!
//! Read models deserialize straight from the REST query layer's JSON rows;
//! optional relationship projections default to `None` so degraded reads
//! (projection without the relationship) parse into the same types.

mod job;
mod line_item;

pub use job::{Job, VendorRef};
pub use line_item::{JobPart, LineItemInput, LineItemRow, SCHEDULE_TIME_COLUMNS};
