//! Stock snapshots: point-in-time copies of stock quantities and prices.
//!
//! A snapshot is taken on explicit user action and stored as its own record,
//! so later price or movement changes do not rewrite it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Money, RecordId};
use stockroom_products::{ProductRecord, ProductStatus};

use crate::movement::MovementRecord;
use crate::stock::stock_by_product;

/// One product line of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotLine {
    pub product_id: RecordId,
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub purchase_price: Option<Money>,
    pub sale_price: Option<Money>,
}

/// A captured stock snapshot (`stock_snapshots` collection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub taken_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub lines: Vec<SnapshotLine>,
}

impl StockSnapshot {
    /// Capture stock as of `taken_at`.
    ///
    /// Movements stamped after `taken_at` are not counted; movements without a
    /// timestamp are. Archived products are only listed while they still hold
    /// (or owe) stock. Lines follow the order of `products`.
    pub fn capture(
        products: &[ProductRecord],
        movements: &[MovementRecord],
        taken_at: DateTime<Utc>,
    ) -> Self {
        let counted: Vec<MovementRecord> = movements
            .iter()
            .filter(|m| m.created_at.is_none_or(|at| at <= taken_at))
            .cloned()
            .collect();
        let levels = stock_by_product(&counted);

        let lines = products
            .iter()
            .map(|p| (p, levels.get(&p.id).copied().unwrap_or(0)))
            .filter(|(p, quantity)| p.status != ProductStatus::Archived || *quantity != 0)
            .map(|(p, quantity)| SnapshotLine {
                product_id: p.id.clone(),
                code: p.code.clone(),
                name: p.name.clone(),
                quantity,
                purchase_price: p.purchase_price,
                sale_price: p.sale_price,
            })
            .collect();

        Self {
            taken_at,
            note: None,
            lines,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Snapshot value at purchase prices (lines without a price count as zero).
    pub fn purchase_value(&self) -> Money {
        self.lines
            .iter()
            .filter_map(|l| l.purchase_price.map(|p| p.times(l.quantity)))
            .fold(Money::ZERO, Money::saturating_add)
    }

    /// Snapshot value at sale prices (lines without a price count as zero).
    pub fn sale_value(&self) -> Money {
        self.lines
            .iter()
            .filter_map(|l| l.sale_price.map(|p| p.times(l.quantity)))
            .fold(Money::ZERO, Money::saturating_add)
    }

    pub fn line(&self, product_id: &RecordId) -> Option<&SnapshotLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }
}
