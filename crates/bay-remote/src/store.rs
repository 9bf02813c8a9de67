//! The seam between orchestration logic and the remote store.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RemoteError;
use crate::query::{Filter, SelectQuery};

/// Row-level access to the remote store. Every method returns the affected
/// rows as JSON objects.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, RemoteError>;

    async fn insert(&self, table: &str, rows: &[Value]) -> Result<Vec<Value>, RemoteError>;

    async fn update(
        &self,
        table: &str,
        patch: &Value,
        filters: &[Filter],
    ) -> Result<Vec<Value>, RemoteError>;

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>, RemoteError>;
}
