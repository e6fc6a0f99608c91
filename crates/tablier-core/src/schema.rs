//! Schema metadata read from the database catalog.

use serde::{Deserialize, Serialize};

/// Classified SQL type of a column, reduced to the set the console knows
/// how to coerce. Anything unrecognized lands in [`SqlType::Other`] and is
/// passed through as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlType {
    Integer,
    Bigint,
    Numeric,
    Decimal,
    Boolean,
    Date,
    Text,
    Other,
}

impl SqlType {
    /// Classify a raw `information_schema` data type.
    pub fn from_data_type(data_type: &str) -> Self {
        match data_type {
            "integer" | "smallint" => SqlType::Integer,
            "bigint" => SqlType::Bigint,
            "numeric" | "real" | "double precision" => SqlType::Numeric,
            "decimal" => SqlType::Decimal,
            "boolean" => SqlType::Boolean,
            "date" => SqlType::Date,
            "text" | "character varying" | "character" => SqlType::Text,
            _ => SqlType::Other,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SqlType::Integer | SqlType::Bigint | SqlType::Numeric | SqlType::Decimal
        )
    }
}

/// Metadata for one column, in the shape the admin UI renders grids and
/// create-forms from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Raw catalog type, e.g. `"character varying"`.
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i32>,
    /// Default expression, verbatim from the catalog. Presence is reported
    /// but never inspected: a non-nullable column still requires a value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub nullable: bool,
}

impl ColumnDescriptor {
    pub fn sql_type(&self) -> SqlType {
        SqlType::from_data_type(&self.data_type)
    }
}

/// One table: its name plus columns in ordinal order.
///
/// Constructed fresh from the catalog on every admin request; never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}
