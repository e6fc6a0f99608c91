//! Dynamic row values.
//!
//! The shape of a row is not known until runtime; it is whatever the owning
//! table's descriptors say it is. Instead of an untyped blob, cells are a
//! closed variant type so formatting and coercion can be handled
//! exhaustively.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scalar (or JSON document) cell of a dynamically shaped row.
///
/// Serialized untagged, so the wire form is plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    /// Arrays and nested objects (e.g. `json`/`jsonb` columns).
    Json(serde_json::Value),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(b),
            serde_json::Value::Number(n) => CellValue::Number(n),
            serde_json::Value::String(s) => CellValue::Text(s),
            other => CellValue::Json(other),
        }
    }
}

/// One persisted row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowRecord(pub BTreeMap<String, CellValue>);

impl RowRecord {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.0.get(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for RowRecord {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(
            map.into_iter()
                .map(|(name, value)| (name, CellValue::from(value)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_map_to_their_variant() {
        assert_eq!(CellValue::from(json!(null)), CellValue::Null);
        assert_eq!(CellValue::from(json!(true)), CellValue::Bool(true));
        assert_eq!(CellValue::from(json!("a")), CellValue::Text("a".into()));
        assert_eq!(CellValue::from(json!(42)).as_i64(), Some(42));
    }

    #[test]
    fn documents_map_to_json() {
        let cell = CellValue::from(json!({"k": [1, 2]}));
        assert!(matches!(cell, CellValue::Json(_)));
    }

    #[test]
    fn untagged_serialization_is_plain_json() {
        let Some(obj) = json!({"id": 1, "name": "a", "meta": {"x": true}, "gone": null})
            .as_object()
            .cloned()
        else {
            unreachable!()
        };
        let row = RowRecord::from(obj);
        let back = serde_json::to_value(&row).unwrap();
        assert_eq!(
            back,
            json!({"id": 1, "name": "a", "meta": {"x": true}, "gone": null})
        );
    }

    #[test]
    fn row_deserializes_from_plain_object() {
        let row: RowRecord = serde_json::from_value(json!({"n": 7, "ok": false})).unwrap();
        assert_eq!(row.get("n").unwrap().as_i64(), Some(7));
        assert_eq!(row.get("ok").unwrap().as_bool(), Some(false));
    }
}
