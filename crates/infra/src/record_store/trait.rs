use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use thiserror::Error;

use stockroom_core::RecordId;

use super::query::ListQuery;

/// Backend collections read by this workspace.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Categories,
    Products,
    Movements,
    Snapshots,
}

impl Collection {
    /// Collection name on the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Categories => "categories",
            Collection::Products => "products",
            Collection::Movements => "stock_movements",
            Collection::Snapshots => "stock_snapshots",
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record store operation error.
///
/// These are **infrastructure errors** (transport, decoding, bad queries) as
/// opposed to domain errors (validation, invariants).
#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to decode {collection} record: {message}")]
    Decode {
        collection: Collection,
        message: String,
    },

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Read access to the backend's collections.
///
/// Records travel as JSON objects carrying at least a string `id` field; use
/// [`list_records`] / [`get_record`] to decode them into domain records.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// List records of a collection matching `query`.
    ///
    /// Filters are applied first, then sorting, then pagination.
    async fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> Result<Vec<JsonValue>, RecordStoreError>;

    /// Fetch one record by id. `Ok(None)` when no such record exists.
    async fn get_by_id(
        &self,
        collection: Collection,
        id: &RecordId,
    ) -> Result<Option<JsonValue>, RecordStoreError>;
}

#[async_trait::async_trait]
impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    async fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> Result<Vec<JsonValue>, RecordStoreError> {
        (**self).list(collection, query).await
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: &RecordId,
    ) -> Result<Option<JsonValue>, RecordStoreError> {
        (**self).get_by_id(collection, id).await
    }
}

fn decode<T: DeserializeOwned>(
    collection: Collection,
    value: JsonValue,
) -> Result<T, RecordStoreError> {
    serde_json::from_value(value).map_err(|e| RecordStoreError::Decode {
        collection,
        message: e.to_string(),
    })
}

/// List and decode records.
pub async fn list_records<T, S>(
    store: &S,
    collection: Collection,
    query: &ListQuery,
) -> Result<Vec<T>, RecordStoreError>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    store
        .list(collection, query)
        .await?
        .into_iter()
        .map(|v| decode(collection, v))
        .collect()
}

/// Fetch and decode one record.
pub async fn get_record<T, S>(
    store: &S,
    collection: Collection,
    id: &RecordId,
) -> Result<Option<T>, RecordStoreError>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    store
        .get_by_id(collection, id)
        .await?
        .map(|v| decode(collection, v))
        .transpose()
}
