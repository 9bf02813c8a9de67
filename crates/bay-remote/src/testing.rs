//! Scripted in-memory [`RemoteStore`] for tests.
//!
//! Responses are queued per table and consumed in order; an exhausted queue
//! answers with an empty row set. Every call is recorded.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RemoteError;
use crate::query::{Filter, SelectQuery};
use crate::store::RemoteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Select,
    Insert,
    Update,
    Delete,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: Op,
    pub table: String,
    /// Projection for selects.
    pub select: Option<String>,
    pub filters: Vec<Filter>,
    pub order: Option<(String, bool)>,
    pub limit: Option<usize>,
    /// Rows for inserts, the patch for updates.
    pub rows: Vec<Value>,
}

impl Call {
    fn new(op: Op, table: &str) -> Self {
        Self {
            op,
            table: table.to_string(),
            select: None,
            filters: Vec::new(),
            order: None,
            limit: None,
            rows: Vec::new(),
        }
    }

    /// Value of an `eq` filter on `column`.
    #[must_use]
    pub fn eq_value(&self, column: &str) -> Option<&str> {
        self.filters.iter().find_map(|f| match f {
            Filter::Eq { column: c, value } if c == column => Some(value.as_str()),
            _ => None,
        })
    }
}

type Scripted = Result<Vec<Value>, RemoteError>;

#[derive(Debug, Default)]
pub struct ScriptedStore {
    responses: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response for `table`.
    pub fn respond(&self, table: &str, response: Scripted) -> &Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(table.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn respond_ok(&self, table: &str, rows: Vec<Value>) -> &Self {
        self.respond(table, Ok(rows))
    }

    pub fn respond_err(&self, table: &str, error: RemoteError) -> &Self {
        self.respond(table, Err(error))
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn calls_for(&self, table: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.table == table)
            .collect()
    }

    fn record(&self, call: Call) -> Scripted {
        let table = call.table.clone();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&table)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait]
impl RemoteStore for ScriptedStore {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, RemoteError> {
        let mut call = Call::new(Op::Select, &query.table);
        call.select = Some(query.select.clone());
        call.filters.clone_from(&query.filters);
        call.order.clone_from(&query.order);
        call.limit = query.limit;
        self.record(call)
    }

    async fn insert(&self, table: &str, rows: &[Value]) -> Result<Vec<Value>, RemoteError> {
        let mut call = Call::new(Op::Insert, table);
        call.rows = rows.to_vec();
        self.record(call)
    }

    async fn update(
        &self,
        table: &str,
        patch: &Value,
        filters: &[Filter],
    ) -> Result<Vec<Value>, RemoteError> {
        let mut call = Call::new(Op::Update, table);
        call.rows = vec![patch.clone()];
        call.filters = filters.to_vec();
        self.record(call)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>, RemoteError> {
        let mut call = Call::new(Op::Delete, table);
        call.filters = filters.to_vec();
        self.record(call)
    }
}
