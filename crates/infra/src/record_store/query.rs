//! List query parameters: equality filters, sort keys and pagination.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::r#trait::RecordStoreError;

/// Upper bound on `per_page`; larger requests are capped.
pub const MAX_PER_PAGE: u32 = 500;

/// Page-based pagination (pages start at 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 50,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Records to skip. A deserialized `page` of 0 reads as the first page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1).saturating_mul(self.limit())
    }

    /// Page size with the same bounds [`Pagination::new`] applies, for values
    /// that arrived through serde rather than the constructor.
    pub fn limit(&self) -> usize {
        self.per_page.clamp(1, MAX_PER_PAGE) as usize
    }
}

/// Equality filter on a top-level record field.
///
/// A `null` value also matches records that lack the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: JsonValue,
}

impl FieldFilter {
    pub fn matches(&self, record: &JsonValue) -> bool {
        match record.get(&self.field) {
            Some(v) => v == &self.value,
            None => self.value.is_null(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Parse backend sort syntax: `"name"` ascending, `"-created"` descending.
    pub fn parse(raw: &str) -> Result<Self, RecordStoreError> {
        let raw = raw.trim();
        let (direction, field) = match raw.strip_prefix('-') {
            Some(rest) => (SortDirection::Desc, rest),
            None => (SortDirection::Asc, raw.strip_prefix('+').unwrap_or(raw)),
        };
        if field.is_empty() {
            return Err(RecordStoreError::InvalidQuery(format!(
                "empty sort field in '{raw}'"
            )));
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }

    pub fn compare(&self, a: &JsonValue, b: &JsonValue) -> Ordering {
        let ord = compare_json(a.get(&self.field), b.get(&self.field));
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Order: missing/null < bool < number < string; arrays and objects last.
fn compare_json(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    fn rank(v: Option<&JsonValue>) -> u8 {
        match v {
            None | Some(JsonValue::Null) => 0,
            Some(JsonValue::Bool(_)) => 1,
            Some(JsonValue::Number(_)) => 2,
            Some(JsonValue::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(JsonValue::Bool(x)), Some(JsonValue::Bool(y))) => x.cmp(y),
        (Some(JsonValue::Number(x)), Some(JsonValue::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(JsonValue::String(x)), Some(JsonValue::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Parameters of a `list` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub filter: Vec<FieldFilter>,
    pub sort: Vec<SortKey>,
    pub pagination: Option<Pagination>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.filter.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    /// Add a sort key in backend syntax (`"name"`, `"-created"`).
    pub fn sort(self, raw: &str) -> Result<Self, RecordStoreError> {
        Ok(self.sort_by(SortKey::parse(raw)?))
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn matches(&self, record: &JsonValue) -> bool {
        self.filter.iter().all(|f| f.matches(record))
    }

    /// Compare two records by the sort keys, in order.
    pub fn compare(&self, a: &JsonValue, b: &JsonValue) -> Ordering {
        self.sort
            .iter()
            .map(|key| key.compare(a, b))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}
