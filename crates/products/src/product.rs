use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, Money, RecordId};

/// Product status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Active,
    Archived,
}

/// A catalog product as stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: RecordId,
    pub name: String,
    /// Internal article code (SKU).
    pub code: String,
    #[serde(default)]
    pub category_id: Option<RecordId>,
    /// Unit of measure ("pcs", "kg", "m").
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub purchase_price: Option<Money>,
    #[serde(default)]
    pub sale_price: Option<Money>,
    #[serde(default)]
    pub status: ProductStatus,
}

fn default_unit() -> String {
    "pcs".to_string()
}

impl ProductRecord {
    /// Build a validated product record.
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        code: impl Into<String>,
        category_id: Option<RecordId>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let code = code.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if code.trim().is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            code,
            category_id,
            unit: default_unit(),
            purchase_price: None,
            sale_price: None,
            status: ProductStatus::Active,
        })
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Attach prices. A sale price below the purchase price is allowed (clearance),
    /// but zero prices are rejected as data-entry errors.
    pub fn with_prices(
        mut self,
        purchase_price: Option<Money>,
        sale_price: Option<Money>,
    ) -> Result<Self, DomainError> {
        if purchase_price == Some(Money::ZERO) || sale_price == Some(Money::ZERO) {
            return Err(DomainError::validation("prices must be positive when set"));
        }
        self.purchase_price = purchase_price;
        self.sale_price = sale_price;
        Ok(self)
    }

    pub fn archive(&mut self) -> Result<(), DomainError> {
        if self.status == ProductStatus::Archived {
            return Err(DomainError::conflict("product is already archived"));
        }
        self.status = ProductStatus::Archived;
        Ok(())
    }

    /// Check if product can be sold (must not be archived).
    pub fn can_be_sold(&self) -> bool {
        self.status == ProductStatus::Active
    }
}
