use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockroom_core::{DomainError, DomainResult, RecordId};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementType {
    /// Received stock.
    #[serde(rename = "IN")]
    In,
    /// Dispatched stock.
    #[serde(rename = "OUT")]
    Out,
}

impl MovementType {
    /// Sign applied to the quantity when accumulating stock.
    pub fn sign(self) -> i64 {
        match self {
            MovementType::In => 1,
            MovementType::Out => -1,
        }
    }

    fn parse(raw: &str) -> DomainResult<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "IN" => Ok(MovementType::In),
            "OUT" => Ok(MovementType::Out),
            other => Err(DomainError::validation(format!(
                "unknown movement type '{other}'"
            ))),
        }
    }
}

/// A recorded stock movement (`stock_movements` collection).
///
/// Immutable once created; corrections are made by recording further movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRecord {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: u64,
    pub product_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl MovementRecord {
    /// Quantity with the movement's sign applied (IN positive, OUT negative).
    pub fn signed_quantity(&self) -> i64 {
        // Quantities beyond i64::MAX are not representable as stock.
        i64::try_from(self.quantity).unwrap_or(i64::MAX) * self.movement_type.sign()
    }
}

/// A validated movement about to be recorded.
///
/// All quantity coercion happens here, before a movement can exist as a
/// [`MovementRecord`], so stock accumulation only ever sees whole,
/// non-negative quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovement {
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: u64,
    pub product_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewMovement {
    pub fn new(
        movement_type: MovementType,
        quantity: u64,
        product_id: RecordId,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be greater than zero"));
        }
        Ok(Self {
            movement_type,
            quantity,
            product_id,
            note: None,
        })
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() { None } else { Some(note) };
        self
    }

    /// Validate a raw form/backend payload.
    ///
    /// Accepts `quantity` as a JSON number or a numeric string ("12", " 12 ",
    /// "12.0") and `type` in any letter case. Anything else is rejected.
    pub fn try_from_raw(raw: &JsonValue) -> DomainResult<Self> {
        let movement_type = raw
            .get("type")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| DomainError::validation("type is required"))
            .and_then(MovementType::parse)?;

        let quantity = coerce_quantity(
            raw.get("quantity")
                .ok_or_else(|| DomainError::validation("quantity is required"))?,
        )?;

        let product_id = raw
            .get("productId")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| DomainError::validation("productId is required"))
            .and_then(RecordId::parse)?;

        let movement = Self::new(movement_type, quantity, product_id)?;
        Ok(match raw.get("note").and_then(JsonValue::as_str) {
            Some(note) => movement.with_note(note),
            None => movement,
        })
    }

    /// Turn into a stored record once the store has assigned an id.
    pub fn into_record(self, id: RecordId, created_at: DateTime<Utc>) -> MovementRecord {
        MovementRecord {
            id,
            movement_type: self.movement_type,
            quantity: self.quantity,
            product_id: self.product_id,
            note: self.note,
            created_at: Some(created_at),
        }
    }
}

fn coerce_quantity(value: &JsonValue) -> DomainResult<u64> {
    let number = match value {
        JsonValue::Number(n) => {
            if let Some(q) = n.as_u64() {
                return Ok(q);
            }
            n.as_f64()
        }
        JsonValue::String(s) => {
            let s = s.trim();
            match s.parse::<u64>() {
                Ok(q) => return Ok(q),
                Err(_) => s.parse::<f64>().ok(),
            }
        }
        _ => None,
    };

    match number {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Ok(f as u64)
        }
        Some(f) if f.is_finite() && f < 0.0 => {
            Err(DomainError::validation("quantity cannot be negative"))
        }
        Some(_) => Err(DomainError::validation("quantity must be a whole number")),
        None => Err(DomainError::validation(format!(
            "quantity is not numeric: {value}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_serializes_as_uppercase_tag() {
        let m = NewMovement::new(MovementType::Out, 3, RecordId::from("p1"))
            .unwrap()
            .into_record(RecordId::from("m1"), Utc::now());
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["type"], "OUT");
        assert_eq!(json["productId"], "p1");
        assert_eq!(m.signed_quantity(), -3);
    }

    #[test]
    fn deserializes_backend_record() {
        let m: MovementRecord = serde_json::from_value(json!({
            "id": "m1",
            "type": "IN",
            "quantity": 10,
            "productId": "p1"
        }))
        .unwrap();
        assert_eq!(m.movement_type, MovementType::In);
        assert_eq!(m.signed_quantity(), 10);
        assert_eq!(m.created_at, None);
    }

    #[test]
    fn new_rejects_zero_quantity() {
        let err = NewMovement::new(MovementType::In, 0, RecordId::from("p1")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn raw_payload_coerces_numeric_strings() {
        let m = NewMovement::try_from_raw(&json!({
            "type": "in",
            "quantity": " 12 ",
            "productId": "p1",
            "note": "delivery 42"
        }))
        .unwrap();
        assert_eq!(m.movement_type, MovementType::In);
        assert_eq!(m.quantity, 12);
        assert_eq!(m.note.as_deref(), Some("delivery 42"));

        let m = NewMovement::try_from_raw(&json!({
            "type": "OUT", "quantity": 4.0, "productId": "p1"
        }))
        .unwrap();
        assert_eq!(m.quantity, 4);
    }

    #[test]
    fn raw_payload_rejects_malformed_quantities() {
        for bad in [json!("abc"), json!(-2), json!("-2"), json!(1.5), json!(null), json!([1])] {
            let err = NewMovement::try_from_raw(&json!({
                "type": "IN", "quantity": bad, "productId": "p1"
            }))
            .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "accepted {bad}");
        }
    }

    #[test]
    fn raw_payload_requires_type_and_product() {
        for raw in [
            json!({"quantity": 1, "productId": "p1"}),
            json!({"type": "MOVE", "quantity": 1, "productId": "p1"}),
            json!({"type": "IN", "quantity": 1}),
            json!({"type": "IN", "quantity": 1, "productId": " "}),
        ] {
            assert!(NewMovement::try_from_raw(&raw).is_err(), "{raw}");
        }
    }
}
