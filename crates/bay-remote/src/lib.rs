//! # bay-remote
//!
//! Client for the auto-generated REST query layer that fronts the remote store.
//!
//! The rest of the workspace talks to the store only through [`RemoteStore`],
//! so orchestration logic can be exercised against scripted fakes. [`RestClient`]
//! is the production implementation over `reqwest`.

mod client;
mod error;
mod query;
mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::RestClient;
pub use error::RemoteError;
pub use query::{Filter, SelectQuery};
pub use store::RemoteStore;
