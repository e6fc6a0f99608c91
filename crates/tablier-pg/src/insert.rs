//! Insert planning: required-field validation and type coercion.
//!
//! Planning is pure and happens entirely before any SQL is issued; a plan
//! that validates is then bound parameter-by-parameter by the store.

use crate::error::StoreError;
use serde_json::Value;
use tablier_core::{ColumnDescriptor, SqlType};

/// One column staged for insertion, with its value already coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertEntry {
    pub column: String,
    pub data_type: String,
    pub value: CoercedValue,
}

/// A value after coercion, ready to be bound as a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    Int(i64),
    /// Validated numeric literal, bound as text with an explicit
    /// `::numeric` cast to avoid round-tripping through floats.
    Numeric(String),
    Bool(bool),
    Text(String),
    Uuid(uuid::Uuid),
    Json(Value),
}

/// A field counts as absent when it is missing, null, or an empty string.
/// Such fields are dropped from the insert set so SQL defaults apply.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Validate `data` against the table's columns and produce the insert set.
///
/// - every non-nullable column must carry a non-blank value (defaults are
///   not inspected);
/// - blank fields are skipped, not sent as NULL;
/// - only keys matching a known column are considered, in ordinal order;
/// - an empty result set is an error.
pub fn plan_insert(
    columns: &[ColumnDescriptor],
    data: &serde_json::Map<String, Value>,
) -> Result<Vec<InsertEntry>, StoreError> {
    for column in columns {
        if !column.nullable && is_blank(data.get(&column.name)) {
            return Err(StoreError::MissingField {
                column: column.name.clone(),
            });
        }
    }

    let mut entries = Vec::new();
    for column in columns {
        let Some(value) = data.get(&column.name) else {
            continue;
        };
        if is_blank(Some(value)) {
            continue;
        }
        entries.push(InsertEntry {
            column: column.name.clone(),
            data_type: column.data_type.clone(),
            value: coerce_value(column, value)?,
        });
    }

    if entries.is_empty() {
        return Err(StoreError::EmptyInsert);
    }
    Ok(entries)
}

fn coerce_value(column: &ColumnDescriptor, value: &Value) -> Result<CoercedValue, StoreError> {
    match column.sql_type() {
        SqlType::Integer | SqlType::Bigint => match value {
            Value::Number(n) => n
                .as_i64()
                .map(CoercedValue::Int)
                .ok_or_else(|| invalid(column, "integer")),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(CoercedValue::Int)
                .map_err(|_| invalid(column, "integer")),
            _ => Err(invalid(column, "integer")),
        },
        SqlType::Numeric | SqlType::Decimal => match value {
            Value::Number(n) => Ok(CoercedValue::Numeric(n.to_string())),
            Value::String(s) if s.trim().parse::<f64>().is_ok() => {
                Ok(CoercedValue::Numeric(s.trim().to_string()))
            }
            _ => Err(invalid(column, "number")),
        },
        // The form layer sends "true"/"false"; anything else reads as false.
        SqlType::Boolean => match value {
            Value::Bool(b) => Ok(CoercedValue::Bool(*b)),
            Value::String(s) => Ok(CoercedValue::Bool(s == "true")),
            _ => Ok(CoercedValue::Bool(false)),
        },
        SqlType::Date | SqlType::Text | SqlType::Other => coerce_passthrough(column, value),
    }
}

/// Strings pass through untouched; `uuid` and `json`/`jsonb` get
/// driver-level types, everything else is rendered as text and relies on
/// an explicit cast where one exists.
fn coerce_passthrough(
    column: &ColumnDescriptor,
    value: &Value,
) -> Result<CoercedValue, StoreError> {
    match column.data_type.as_str() {
        "uuid" => {
            let s = value.as_str().ok_or_else(|| invalid(column, "uuid"))?;
            uuid::Uuid::parse_str(s.trim())
                .map(CoercedValue::Uuid)
                .map_err(|_| invalid(column, "uuid"))
        }
        "json" | "jsonb" => Ok(CoercedValue::Json(value.clone())),
        _ => Ok(CoercedValue::Text(match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        })),
    }
}

fn invalid(column: &ColumnDescriptor, expected: &'static str) -> StoreError {
    StoreError::InvalidValue {
        column: column.name.clone(),
        expected,
    }
}

/// Explicit cast appended to the placeholder for types bound as text.
pub fn cast_for_data_type(data_type: &str) -> Option<&'static str> {
    match data_type {
        "numeric" | "decimal" | "real" | "double precision" => Some("numeric"),
        "date" => Some("date"),
        "timestamp with time zone" => Some("timestamptz"),
        "timestamp without time zone" => Some("timestamp"),
        "time without time zone" => Some("time"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn column(name: &str, data_type: &str, nullable: bool) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.into(),
            data_type: data_type.into(),
            max_length: None,
            default: None,
            nullable,
        }
    }

    fn payload(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().cloned().expect("object payload")
    }

    #[test]
    fn missing_required_column_is_rejected_by_name() {
        let columns = [column("email", "text", false), column("note", "text", true)];
        let err = plan_insert(&columns, &payload(json!({"note": "x"}))).unwrap_err();
        assert!(matches!(err, StoreError::MissingField { column } if column == "email"));
    }

    #[test]
    fn empty_string_counts_as_missing_for_required_columns() {
        let columns = [column("email", "text", false)];
        let err = plan_insert(&columns, &payload(json!({"email": ""}))).unwrap_err();
        assert!(matches!(err, StoreError::MissingField { column } if column == "email"));
    }

    #[test]
    fn required_column_with_default_is_still_required() {
        let mut serial = column("id", "integer", false);
        serial.default = Some("nextval('users_id_seq'::regclass)".into());
        let err = plan_insert(&[serial], &payload(json!({}))).unwrap_err();
        assert!(matches!(err, StoreError::MissingField { column } if column == "id"));
    }

    #[test]
    fn blank_optional_fields_are_dropped_not_nulled() {
        let columns = [
            column("email", "text", false),
            column("nickname", "text", true),
            column("age", "integer", true),
        ];
        let entries = plan_insert(
            &columns,
            &payload(json!({"email": "a@b.c", "nickname": "", "age": null})),
        )
        .unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.column.as_str()).collect();
        assert_eq!(names, ["email"]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let columns = [column("email", "text", false)];
        let entries = plan_insert(
            &columns,
            &payload(json!({"email": "a@b.c", "role": "ADMIN; drop table users"})),
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].column, "email");
    }

    #[test]
    fn all_blank_payload_is_an_empty_insert() {
        let columns = [column("note", "text", true), column("tag", "text", true)];
        let err = plan_insert(&columns, &payload(json!({"note": "", "tag": null}))).unwrap_err();
        assert!(matches!(err, StoreError::EmptyInsert));
    }

    #[test]
    fn integer_strings_become_numbers() {
        let columns = [column("age", "integer", true)];
        let entries = plan_insert(&columns, &payload(json!({"age": "42"}))).unwrap();
        assert_eq!(entries[0].value, CoercedValue::Int(42));
    }

    #[test]
    fn non_numeric_integer_input_is_a_validation_error() {
        let columns = [column("age", "integer", true)];
        let err = plan_insert(&columns, &payload(json!({"age": "forty-two"}))).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidValue { column, expected: "integer" } if column == "age"
        ));
    }

    #[test]
    fn numeric_strings_are_validated_but_kept_as_text() {
        let columns = [column("score", "numeric", true)];
        let entries = plan_insert(&columns, &payload(json!({"score": "3.25"}))).unwrap();
        assert_eq!(entries[0].value, CoercedValue::Numeric("3.25".into()));

        let err = plan_insert(&columns, &payload(json!({"score": "high"}))).unwrap_err();
        assert!(matches!(err, StoreError::InvalidValue { expected: "number", .. }));
    }

    #[test]
    fn boolean_accepts_the_literal_true_and_nothing_else() {
        let columns = [column("active", "boolean", true)];
        let truthy = plan_insert(&columns, &payload(json!({"active": "true"}))).unwrap();
        assert_eq!(truthy[0].value, CoercedValue::Bool(true));

        // documented quirk: any other string reads as false
        let falsy = plan_insert(&columns, &payload(json!({"active": "yes"}))).unwrap();
        assert_eq!(falsy[0].value, CoercedValue::Bool(false));

        let native = plan_insert(&columns, &payload(json!({"active": true}))).unwrap();
        assert_eq!(native[0].value, CoercedValue::Bool(true));
    }

    #[test]
    fn uuid_values_are_parsed() {
        let columns = [column("ref", "uuid", true)];
        let id = uuid::Uuid::new_v4();
        let entries = plan_insert(&columns, &payload(json!({"ref": id.to_string()}))).unwrap();
        assert_eq!(entries[0].value, CoercedValue::Uuid(id));

        let err = plan_insert(&columns, &payload(json!({"ref": "not-a-uuid"}))).unwrap_err();
        assert!(matches!(err, StoreError::InvalidValue { expected: "uuid", .. }));
    }

    #[test]
    fn json_columns_keep_their_document() {
        let columns = [column("meta", "jsonb", true)];
        let entries = plan_insert(&columns, &payload(json!({"meta": {"k": 1}}))).unwrap();
        assert_eq!(entries[0].value, CoercedValue::Json(json!({"k": 1})));
    }

    #[test]
    fn dates_pass_through_as_text() {
        let columns = [column("born_on", "date", true)];
        let entries = plan_insert(&columns, &payload(json!({"born_on": "2024-02-29"}))).unwrap();
        assert_eq!(entries[0].value, CoercedValue::Text("2024-02-29".into()));
        assert_eq!(cast_for_data_type("date"), Some("date"));
    }

    #[test]
    fn entries_follow_ordinal_column_order() {
        let columns = [
            column("a", "text", true),
            column("b", "text", true),
            column("c", "text", true),
        ];
        let entries =
            plan_insert(&columns, &payload(json!({"c": "3", "a": "1", "b": "2"}))).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.column.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
