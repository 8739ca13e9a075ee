//! Infrastructure layer: record store boundary, config, store-backed services.

pub mod config;
pub mod record_store;
pub mod services;

pub use config::{ConfigError, StoreConfig};
pub use record_store::{Collection, InMemoryRecordStore, ListQuery, RecordStore, RecordStoreError};
pub use services::{CategoryService, ServiceError, StockService};
