//! Catalog introspection for the application schema.
//!
//! Metadata is read fresh on every call; there is no cache, so the console
//! always reflects the current shape of the database.

use crate::error::StoreError;
use sqlx::{PgPool, Row};
use tablier_core::ColumnDescriptor;

/// List the base-table names of `schema`, ordered by name.
/// An empty schema is a valid (empty) result, not an error.
pub async fn list_tables(pool: &PgPool, schema: &str) -> Result<Vec<String>, StoreError> {
    let rows = sqlx::query(
        r#"
        select table_name
        from information_schema.tables
        where table_schema = $1
          and table_type = 'BASE TABLE'
        order by table_name
        "#,
    )
    .bind(schema)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| row.get::<String, _>("table_name"))
        .collect())
}

/// Describe the columns of `table` in ordinal order.
///
/// Returns an empty vector for an unknown table; existence is checked
/// separately (and first) by the store.
pub async fn describe_table(
    pool: &PgPool,
    schema: &str,
    table: &str,
) -> Result<Vec<ColumnDescriptor>, StoreError> {
    let rows = sqlx::query(
        r#"
        select column_name, data_type, character_maximum_length,
               column_default, is_nullable
        from information_schema.columns
        where table_schema = $1 and table_name = $2
        order by ordinal_position
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in rows {
        let is_nullable: String = row.get("is_nullable");
        columns.push(ColumnDescriptor {
            name: row.get("column_name"),
            data_type: row.get("data_type"),
            max_length: row.get("character_maximum_length"),
            default: row.get("column_default"),
            nullable: is_nullable == "YES",
        });
    }
    Ok(columns)
}
