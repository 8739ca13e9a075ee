use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use stockroom_core::RecordId;
use stockroom_inventory::{
    MovementRecord, MovementStatistics, StockSnapshot, StockValuation, ValuationSummary,
    compute_current_stock, stock_by_product, value_stock,
};
use stockroom_products::ProductRecord;

use crate::config::StoreConfig;
use crate::record_store::{Collection, ListQuery, RecordStore};

use super::{ServiceError, fetch_all};

/// Stock figures derived from the movement history on every call.
#[derive(Debug)]
pub struct StockService<S> {
    store: S,
    page_size: u32,
}

impl<S> StockService<S>
where
    S: RecordStore,
{
    pub fn new(store: S, config: &StoreConfig) -> Self {
        Self {
            store,
            page_size: config.page_size,
        }
    }

    pub async fn movements_for_product(
        &self,
        product_id: &RecordId,
    ) -> Result<Vec<MovementRecord>, ServiceError> {
        let query = ListQuery::new().filter_eq("productId", product_id.as_str());
        Ok(fetch_all(&self.store, Collection::Movements, query, self.page_size).await?)
    }

    /// Current stock of one product. Unknown products have stock 0.
    pub async fn current_stock(&self, product_id: &RecordId) -> Result<i64, ServiceError> {
        let movements = self.movements_for_product(product_id).await?;
        let stock = compute_current_stock(&movements);
        tracing::debug!(
            product_id = %product_id,
            movements = movements.len(),
            stock,
            "computed current stock"
        );
        Ok(stock)
    }

    /// Current stock of every product with at least one movement.
    pub async fn stock_levels(&self) -> Result<BTreeMap<RecordId, i64>, ServiceError> {
        let movements = self.all_movements().await?;
        Ok(stock_by_product(&movements))
    }

    /// Products with current stock at or below zero.
    pub async fn out_of_stock(&self) -> Result<Vec<ProductRecord>, ServiceError> {
        let products = self.all_products().await?;
        let levels = stock_by_product(&self.all_movements().await?);
        Ok(products
            .into_iter()
            .filter(|p| levels.get(&p.id).copied().unwrap_or(0) <= 0)
            .collect())
    }

    pub async fn valuation(
        &self,
    ) -> Result<(Vec<StockValuation>, ValuationSummary), ServiceError> {
        let products = self.all_products().await?;
        let movements = self.all_movements().await?;
        let valuations = value_stock(&products, &movements);
        let summary = ValuationSummary::from_valuations(&valuations);
        if summary.unvalued_items > 0 {
            tracing::warn!(
                unvalued = summary.unvalued_items,
                "products without purchase price left out of stock value"
            );
        }
        Ok((valuations, summary))
    }

    pub async fn statistics(&self) -> Result<MovementStatistics, ServiceError> {
        Ok(MovementStatistics::from_movements(&self.all_movements().await?))
    }

    pub async fn statistics_for_period(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<MovementStatistics, ServiceError> {
        Ok(MovementStatistics::for_period(&self.all_movements().await?, from, to))
    }

    /// Build (not persist) a snapshot of current stock.
    pub async fn capture_snapshot(
        &self,
        taken_at: DateTime<Utc>,
    ) -> Result<StockSnapshot, ServiceError> {
        let products = self.all_products().await?;
        let movements = self.all_movements().await?;
        let snapshot = StockSnapshot::capture(&products, &movements, taken_at);
        tracing::info!(
            lines = snapshot.lines.len(),
            taken_at = %taken_at,
            "captured stock snapshot"
        );
        Ok(snapshot)
    }

    async fn all_movements(&self) -> Result<Vec<MovementRecord>, ServiceError> {
        let query = ListQuery::new();
        Ok(fetch_all(&self.store, Collection::Movements, query, self.page_size).await?)
    }

    async fn all_products(&self) -> Result<Vec<ProductRecord>, ServiceError> {
        let query = ListQuery::new().sort("name")?;
        Ok(fetch_all(&self.store, Collection::Products, query, self.page_size).await?)
    }
}
