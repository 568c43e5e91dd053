//! Remote record access.
//!
//! [`RecordStore`] is the seam between the view controller and the REST
//! API. [`RestClient`] is the production implementation; tests drive the
//! controller with an in-memory store instead.

mod query;
mod rest;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::RecordError;

pub use query::{ListQuery, SortOrder, SortSpec};
pub use rest::{RestClient, TOTAL_COUNT_HEADER};

/// One record: an open JSON object keyed by field key.
pub type Record = Map<String, Value>;

/// One page of a list call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListPage {
    pub records: Vec<Record>,
    /// Total matching records across all pages.
    pub total: u64,
    /// False when the server omitted the total-count header and `total`
    /// fell back to the page length.
    pub total_reported: bool,
}

/// Normalized record id. json-server style backends hand out both numeric
/// and string ids.
pub fn record_id(record: &Record) -> Option<String> {
    match record.get(crate::schema::ID_KEY)? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Generic CRUD accessor for entity collections.
///
/// Implementations keep no local state and never retry: a failed call
/// surfaces immediately.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, entity: &str, query: &ListQuery) -> Result<ListPage, RecordError>;

    async fn get_by_id(&self, entity: &str, id: &str) -> Result<Record, RecordError>;

    /// Create a record; the result carries the server-assigned id.
    async fn create(&self, entity: &str, payload: &Record) -> Result<Record, RecordError>;

    /// Replace a record (full-replace semantics).
    async fn update(&self, entity: &str, id: &str, payload: &Record)
        -> Result<Record, RecordError>;

    /// Merge `payload` into an existing record.
    async fn patch(&self, entity: &str, id: &str, payload: &Record) -> Result<Record, RecordError>;

    async fn remove(&self, entity: &str, id: &str) -> Result<(), RecordError>;

    /// Free-text search without pagination parameters.
    async fn search(&self, entity: &str, text: &str) -> Result<ListPage, RecordError> {
        self.list(entity, &ListQuery::unpaged().with_search(text))
            .await
    }

    /// Whole collection ordered by one field.
    async fn sort(
        &self,
        entity: &str,
        field: &str,
        order: SortOrder,
    ) -> Result<ListPage, RecordError> {
        self.list(entity, &ListQuery::unpaged().with_sort(SortSpec::new(field, order)))
            .await
    }
}
