//! Store-backed services.
//!
//! Each service fetches plain records through a [`RecordStore`] and hands the
//! resolved lists to the pure derivations in `stockroom-inventory` and
//! `stockroom-products`. Nothing is cached: every call re-fetches, so callers
//! see new movements and category edits on their next call.

pub mod categories;
pub mod stock;

pub use categories::CategoryService;
pub use stock::StockService;

use serde::de::DeserializeOwned;
use thiserror::Error;

use stockroom_products::CategoryError;

use crate::record_store::{
    Collection, ListQuery, Pagination, RecordStore, RecordStoreError, list_records,
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] RecordStoreError),

    #[error(transparent)]
    Category(#[from] CategoryError),
}

/// Load every record matching `query`, one page at a time.
///
/// Any pagination already set on `query` is replaced.
pub(crate) async fn fetch_all<T, S>(
    store: &S,
    collection: Collection,
    query: ListQuery,
    page_size: u32,
) -> Result<Vec<T>, RecordStoreError>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    let mut out = Vec::new();
    let mut page = 1;
    loop {
        let pagination = Pagination::new(page, page_size);
        let batch: Vec<T> =
            list_records(store, collection, &query.clone().paginate(pagination)).await?;
        let fetched = batch.len();
        out.extend(batch);

        if fetched < pagination.limit() {
            break;
        }
        page += 1;
    }

    tracing::debug!(
        collection = %collection,
        records = out.len(),
        pages = page,
        "fetched collection"
    );
    Ok(out)
}
