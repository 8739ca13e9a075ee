use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;
use serde_json::Value as JsonValue;

use stockroom_core::RecordId;

use super::query::ListQuery;
use super::r#trait::{Collection, RecordStore, RecordStoreError};

/// In-memory record store.
///
/// Intended for tests/dev. Keeps records in insertion order per collection;
/// not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<Collection, Vec<JsonValue>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace (by `id`) a record.
    pub fn insert<T: Serialize>(
        &self,
        collection: Collection,
        record: &T,
    ) -> Result<(), RecordStoreError> {
        let value = serde_json::to_value(record).map_err(|e| RecordStoreError::Decode {
            collection,
            message: e.to_string(),
        })?;
        let id = record_id(&value).ok_or_else(|| RecordStoreError::Decode {
            collection,
            message: "record has no string `id` field".to_string(),
        })?;

        let mut map = self
            .collections
            .write()
            .map_err(|_| RecordStoreError::Unavailable("lock poisoned".to_string()))?;
        let records = map.entry(collection).or_default();
        match records.iter().position(|r| record_id(r) == Some(id)) {
            Some(pos) => records[pos] = value,
            None => records.push(value),
        }
        Ok(())
    }

    /// Insert many records, stopping at the first failure.
    pub fn insert_all<'a, T, I>(
        &self,
        collection: Collection,
        records: I,
    ) -> Result<(), RecordStoreError>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        records.into_iter().try_for_each(|r| self.insert(collection, r))
    }

    /// Remove a record; returns whether it existed.
    pub fn remove(&self, collection: Collection, id: &RecordId) -> Result<bool, RecordStoreError> {
        let mut map = self
            .collections
            .write()
            .map_err(|_| RecordStoreError::Unavailable("lock poisoned".to_string()))?;
        let Some(records) = map.get_mut(&collection) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|r| record_id(r) != Some(id.as_str()));
        Ok(records.len() != before)
    }

    /// Clear one collection.
    pub fn clear(&self, collection: Collection) {
        if let Ok(mut map) = self.collections.write() {
            map.remove(&collection);
        }
    }
}

fn record_id(record: &JsonValue) -> Option<&str> {
    record.get("id").and_then(JsonValue::as_str)
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> Result<Vec<JsonValue>, RecordStoreError> {
        let map = self
            .collections
            .read()
            .map_err(|_| RecordStoreError::Unavailable("lock poisoned".to_string()))?;

        let mut records: Vec<JsonValue> = map
            .get(&collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| query.matches(r))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        // Stable: equal keys keep insertion order.
        records.sort_by(|a, b| query.compare(a, b));

        Ok(match query.pagination {
            Some(p) => records
                .into_iter()
                .skip(p.offset())
                .take(p.limit())
                .collect(),
            None => records,
        })
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: &RecordId,
    ) -> Result<Option<JsonValue>, RecordStoreError> {
        let map = self
            .collections
            .read()
            .map_err(|_| RecordStoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(map
            .get(&collection)
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id.as_str())))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_store::{Pagination, get_record, list_records};
    use serde_json::json;
    use stockroom_products::CategoryRecord;

    fn seeded() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        for (id, name, parent) in [
            ("c1", "Pumps", None),
            ("c2", "Bearings", None),
            ("c3", "Centrifugal", Some("c1")),
            ("c4", "Axial", Some("c1")),
        ] {
            store
                .insert(
                    Collection::Categories,
                    &json!({"id": id, "name": name, "parentId": parent}),
                )
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn list_filters_sorts_and_paginates() {
        let store = seeded();

        let q = ListQuery::new().filter_eq("parentId", "c1").sort("name").unwrap();
        let kids: Vec<CategoryRecord> = list_records(&store, Collection::Categories, &q)
            .await
            .unwrap();
        let names: Vec<&str> = kids.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Axial", "Centrifugal"]);

        let q = ListQuery::new().sort("-name").unwrap().paginate(Pagination::new(2, 3));
        let page = store.list(Collection::Categories, &q).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["name"], "Axial");
    }

    #[tokio::test]
    async fn list_accepts_deserialized_page_zero() {
        let store = seeded();
        let q: ListQuery = serde_json::from_value(json!({
            "filter": [],
            "sort": [],
            "pagination": {"page": 0, "per_page": 2}
        }))
        .unwrap();

        let page = store.list(Collection::Categories, &q).await.unwrap();
        let ids: Vec<&str> = page.iter().filter_map(record_id).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[tokio::test]
    async fn insert_replaces_same_id() {
        let store = seeded();
        store
            .insert(Collection::Categories, &json!({"id": "c2", "name": "Roller bearings"}))
            .unwrap();

        let all = store.list(Collection::Categories, &ListQuery::new()).await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[1]["name"], "Roller bearings");
    }

    #[tokio::test]
    async fn get_by_id_and_remove() {
        let store = seeded();
        let id = RecordId::from("c3");

        let c: Option<CategoryRecord> = get_record(&store, Collection::Categories, &id)
            .await
            .unwrap();
        assert_eq!(c.unwrap().parent_id, Some(RecordId::from("c1")));

        assert!(store.remove(Collection::Categories, &id).unwrap());
        assert!(!store.remove(Collection::Categories, &id).unwrap());
        assert!(store.get_by_id(Collection::Categories, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = seeded();
        let products = store.list(Collection::Products, &ListQuery::new()).await.unwrap();
        assert!(products.is_empty());

        store.clear(Collection::Categories);
        let categories = store
            .list(Collection::Categories, &ListQuery::new())
            .await
            .unwrap();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn decode_failures_name_the_collection() {
        let store = InMemoryRecordStore::new();
        store.insert(Collection::Categories, &json!({"id": "bad"})).unwrap();

        let q = ListQuery::new();
        let err = list_records::<CategoryRecord, _>(&store, Collection::Categories, &q)
            .await
            .unwrap_err();
        match err {
            RecordStoreError::Decode { collection, .. } => {
                assert_eq!(collection, Collection::Categories)
            }
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn insert_requires_string_id() {
        let store = InMemoryRecordStore::new();
        let err = store.insert(Collection::Products, &json!({"name": "x"})).unwrap_err();
        assert!(matches!(err, RecordStoreError::Decode { .. }));
    }
}
