//! Movement statistics for reporting screens.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::RecordId;

use crate::movement::{MovementRecord, MovementType};

/// Counts and quantity totals over a set of movements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementStatistics {
    pub movement_count: usize,
    pub in_count: usize,
    pub out_count: usize,
    pub total_in: u64,
    pub total_out: u64,
}

impl MovementStatistics {
    pub fn from_movements<'a, I>(movements: I) -> Self
    where
        I: IntoIterator<Item = &'a MovementRecord>,
    {
        movements.into_iter().fold(Self::default(), |mut acc, m| {
            acc.record(m);
            acc
        })
    }

    /// Statistics over movements created in `[from, to)`.
    ///
    /// Movements without a creation timestamp cannot be placed in a period and
    /// are left out.
    pub fn for_period(
        movements: &[MovementRecord],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Self {
        Self::from_movements(
            movements
                .iter()
                .filter(|m| m.created_at.is_some_and(|at| at >= from && at < to)),
        )
    }

    fn record(&mut self, m: &MovementRecord) {
        self.movement_count += 1;
        match m.movement_type {
            MovementType::In => {
                self.in_count += 1;
                self.total_in = self.total_in.saturating_add(m.quantity);
            }
            MovementType::Out => {
                self.out_count += 1;
                self.total_out = self.total_out.saturating_add(m.quantity);
            }
        }
    }

    /// Net change (total in − total out).
    pub fn net(&self) -> i64 {
        let total_in = i64::try_from(self.total_in).unwrap_or(i64::MAX);
        let total_out = i64::try_from(self.total_out).unwrap_or(i64::MAX);
        total_in.saturating_sub(total_out)
    }
}

/// Statistics per product referenced by `movements`.
pub fn statistics_by_product(
    movements: &[MovementRecord],
) -> BTreeMap<RecordId, MovementStatistics> {
    let mut out: BTreeMap<RecordId, MovementStatistics> = BTreeMap::new();
    for m in movements {
        out.entry(m.product_id.clone()).or_default().record(m);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::stock::compute_current_stock;

    fn mv(
        kind: MovementType,
        quantity: u64,
        product: &str,
        at: Option<DateTime<Utc>>,
    ) -> MovementRecord {
        MovementRecord {
            id: RecordId::generate(),
            movement_type: kind,
            quantity,
            product_id: RecordId::from(product),
            note: None,
            created_at: at,
        }
    }

    #[test]
    fn counts_and_totals() {
        let ms = [
            mv(MovementType::In, 10, "p1", None),
            mv(MovementType::In, 5, "p2", None),
            mv(MovementType::Out, 3, "p1", None),
        ];
        let stats = MovementStatistics::from_movements(&ms);

        assert_eq!(stats.movement_count, 3);
        assert_eq!(stats.in_count, 2);
        assert_eq!(stats.out_count, 1);
        assert_eq!(stats.total_in, 15);
        assert_eq!(stats.total_out, 3);
        assert_eq!(stats.net(), 12);
        assert_eq!(stats.net(), compute_current_stock(&ms));
    }

    #[test]
    fn per_product_breakdown() {
        let ms = [
            mv(MovementType::In, 10, "p1", None),
            mv(MovementType::Out, 4, "p1", None),
            mv(MovementType::Out, 2, "p2", None),
        ];
        let by_product = statistics_by_product(&ms);
        assert_eq!(by_product[&RecordId::from("p1")].net(), 6);
        assert_eq!(by_product[&RecordId::from("p2")].net(), -2);
        assert_eq!(by_product[&RecordId::from("p2")].in_count, 0);
    }

    #[test]
    fn period_is_half_open_and_skips_untimed() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let end = start + Duration::days(31);
        let ms = [
            mv(MovementType::In, 1, "p1", Some(start)),
            mv(MovementType::In, 2, "p1", Some(end - Duration::seconds(1))),
            mv(MovementType::In, 4, "p1", Some(end)),
            mv(MovementType::In, 8, "p1", None),
        ];
        let stats = MovementStatistics::for_period(&ms, start, end);
        assert_eq!(stats.movement_count, 2);
        assert_eq!(stats.total_in, 3);
    }
}
