//! Inventory domain module.
//!
//! Stock is never stored: it is derived from the full history of IN/OUT
//! movement records every time it is needed. This crate contains that
//! derivation and the light reporting built on it (valuation, movement
//! statistics, snapshots), implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod movement;
pub mod snapshot;
pub mod statistics;
pub mod stock;
pub mod valuation;

pub use movement::{MovementRecord, MovementType, NewMovement};
pub use snapshot::{SnapshotLine, StockSnapshot};
pub use statistics::{MovementStatistics, statistics_by_product};
pub use stock::{compute_current_stock, compute_current_stock_for_product, stock_by_product};
pub use valuation::{StockValuation, ValuationSummary, value_stock};
