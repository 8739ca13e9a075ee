//! Current stock accumulation.
//!
//! current stock(product) = Σ quantity(IN) − Σ quantity(OUT) over every
//! movement referencing the product. The value is recomputed from the full
//! movement history on each call; O(n) in the number of movements.

use std::collections::BTreeMap;

use stockroom_core::RecordId;

use crate::movement::MovementRecord;

/// Net stock over `movements`.
///
/// Movements are assumed (not checked) to belong to one product. Empty input
/// yields 0; over-withdrawal yields a negative result.
pub fn compute_current_stock<'a, I>(movements: I) -> i64
where
    I: IntoIterator<Item = &'a MovementRecord>,
{
    movements
        .into_iter()
        .fold(0i64, |acc, m| acc.saturating_add(m.signed_quantity()))
}

/// Net stock of `product_id` over a mixed movement list.
///
/// Movements are matched by exact id equality. An unknown product yields 0.
pub fn compute_current_stock_for_product(
    movements: &[MovementRecord],
    product_id: &RecordId,
) -> i64 {
    compute_current_stock(movements.iter().filter(|m| &m.product_id == product_id))
}

/// Net stock of every product referenced by `movements`, in one pass.
pub fn stock_by_product(movements: &[MovementRecord]) -> BTreeMap<RecordId, i64> {
    let mut out: BTreeMap<RecordId, i64> = BTreeMap::new();
    for m in movements {
        let entry = out.entry(m.product_id.clone()).or_insert(0);
        *entry = entry.saturating_add(m.signed_quantity());
    }
    out
}
