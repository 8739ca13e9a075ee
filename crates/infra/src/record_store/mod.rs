//! Record store boundary.
//!
//! The backend is a hosted collection store. Everything this workspace needs
//! from it is two read operations: list a collection with filter/sort/paging,
//! and fetch one record by id. Any implementation (REST client, in-memory fake)
//! can stand behind [`RecordStore`].

pub mod in_memory;
pub mod query;
pub mod r#trait;

pub use in_memory::InMemoryRecordStore;
pub use query::{FieldFilter, ListQuery, Pagination, SortDirection, SortKey};
pub use r#trait::{Collection, RecordStore, RecordStoreError, get_record, list_records};
