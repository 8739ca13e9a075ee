//! Stock valuation.
//!
//! Values each product's current stock at its purchase price
//! (quantity × unit cost). Products without a purchase price are reported but
//! left unvalued; negative stock values at zero.

use serde::{Deserialize, Serialize};

use stockroom_core::{Money, RecordId};
use stockroom_products::ProductRecord;

use crate::movement::MovementRecord;
use crate::stock::stock_by_product;

/// Valuation of one product.
///
/// - `quantity`: current stock (may be negative)
/// - `unit_cost`: purchase price, `None` if not set
/// - `total_value`: quantity × unit_cost, `None` if unit_cost not set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockValuation {
    pub product_id: RecordId,
    pub name: String,
    pub quantity: i64,
    pub unit_cost: Option<Money>,
    pub total_value: Option<Money>,
}

impl StockValuation {
    pub fn new(product: &ProductRecord, quantity: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            unit_cost: product.purchase_price,
            total_value: product.purchase_price.map(|cost| cost.times(quantity)),
        }
    }
}

/// Totals over a set of valuations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationSummary {
    pub total_items: usize,
    pub valued_items: usize,
    pub unvalued_items: usize,
    pub total_value: Money,
    pub total_quantity: i64,
}

impl ValuationSummary {
    pub fn from_valuations(valuations: &[StockValuation]) -> Self {
        valuations.iter().fold(Self::default(), |mut acc, v| {
            acc.total_items += 1;
            acc.total_quantity = acc.total_quantity.saturating_add(v.quantity);
            match v.total_value {
                Some(value) => {
                    acc.valued_items += 1;
                    acc.total_value = acc.total_value.saturating_add(value);
                }
                None => acc.unvalued_items += 1,
            }
            acc
        })
    }
}

/// Value every product in `products` against the movement history.
///
/// Output follows the order of `products`. Movements for products not in the
/// list are ignored.
pub fn value_stock(
    products: &[ProductRecord],
    movements: &[MovementRecord],
) -> Vec<StockValuation> {
    let levels = stock_by_product(movements);
    products
        .iter()
        .map(|p| StockValuation::new(p, levels.get(&p.id).copied().unwrap_or(0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementType;

    fn product(id: &str, cost: Option<u64>) -> ProductRecord {
        ProductRecord::new(RecordId::from(id), format!("Product {id}"), id.to_uppercase(), None)
            .unwrap()
            .with_prices(cost.map(Money), None)
            .unwrap()
    }

    fn mv(kind: MovementType, quantity: u64, product: &str) -> MovementRecord {
        MovementRecord {
            id: RecordId::generate(),
            movement_type: kind,
            quantity,
            product_id: RecordId::from(product),
            note: None,
            created_at: None,
        }
    }

    #[test]
    fn values_quantity_times_cost() {
        let products = [product("p1", Some(250)), product("p2", None)];
        let movements = [
            mv(MovementType::In, 10, "p1"),
            mv(MovementType::Out, 2, "p1"),
            mv(MovementType::In, 5, "p2"),
        ];

        let vals = value_stock(&products, &movements);
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0].quantity, 8);
        assert_eq!(vals[0].total_value, Some(Money(2000)));
        assert_eq!(vals[1].quantity, 5);
        assert_eq!(vals[1].total_value, None);
    }

    #[test]
    fn negative_stock_values_at_zero() {
        let vals = value_stock(&[product("p1", Some(100))], &[mv(MovementType::Out, 3, "p1")]);
        assert_eq!(vals[0].quantity, -3);
        assert_eq!(vals[0].total_value, Some(Money::ZERO));
    }

    #[test]
    fn products_without_movements_have_zero_stock() {
        let vals = value_stock(&[product("p1", Some(100))], &[mv(MovementType::In, 3, "other")]);
        assert_eq!(vals[0].quantity, 0);
        assert_eq!(vals[0].total_value, Some(Money::ZERO));
    }

    #[test]
    fn summary_counts_valued_and_unvalued() {
        let products = [product("p1", Some(250)), product("p2", None), product("p3", Some(10))];
        let movements = [
            mv(MovementType::In, 4, "p1"),
            mv(MovementType::In, 7, "p2"),
            mv(MovementType::In, 1, "p3"),
        ];
        let summary = ValuationSummary::from_valuations(&value_stock(&products, &movements));

        assert_eq!(
            summary,
            ValuationSummary {
                total_items: 3,
                valued_items: 2,
                unvalued_items: 1,
                total_value: Money(1010),
                total_quantity: 12,
            }
        );
    }

    #[test]
    fn summary_of_nothing_is_empty() {
        assert_eq!(ValuationSummary::from_valuations(&[]), ValuationSummary::default());
    }
}
