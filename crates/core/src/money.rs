//! Money in smallest currency unit.

use serde::{Deserialize, Serialize};

/// Amount in smallest currency unit (e.g. cents).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn cents(self) -> u64 {
        self.0
    }

    /// Multiply by a quantity. Non-positive quantities value at zero.
    pub fn times(self, quantity: i64) -> Money {
        if quantity <= 0 {
            return Money::ZERO;
        }
        Money((quantity as u64).saturating_mul(self.0))
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_quantity_values_at_zero() {
        assert_eq!(Money(250).times(-3), Money::ZERO);
        assert_eq!(Money(250).times(0), Money::ZERO);
        assert_eq!(Money(250).times(4), Money(1000));
    }

    #[test]
    fn displays_major_and_minor_units() {
        assert_eq!(Money(12345).to_string(), "123.45");
        assert_eq!(Money(7).to_string(), "0.07");
    }
}
