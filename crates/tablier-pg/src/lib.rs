//! # tablier-pg
//!
//! Postgres access for the admin console: catalog introspection, the
//! paginated row reader and the dynamic row writer.
//!
//! Table names arriving here are untrusted input. Every read/write path
//! first resolves the name against the catalog with an exact-match,
//! parameterized lookup ([`AdminStore::resolve_table`]); only the resolved
//! name, quoted through the strict [`quote_ident`] allow-list, is ever
//! interpolated into query text. Values are always bound parameters.

use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::{Arguments, PgPool, Row};
use tablier_core::{ColumnDescriptor, PageResult, RowRecord};

mod error;
pub mod insert;
pub mod introspect;

pub use error::StoreError;
pub use insert::{CoercedValue, InsertEntry, plan_insert};

fn args_add<T>(args: &mut PgArguments, column: &str, v: T) -> Result<(), StoreError>
where
    T: Send + Sync + 'static,
    for<'q> T: sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    args.add(v).map_err(|e| StoreError::Bind {
        column: column.to_string(),
        message: e.to_string(),
    })
}

/// Quote a catalog-validated identifier for interpolation into SQL text.
///
/// Strict allow-list: identifiers only ever come from introspection
/// output, so anything outside `[A-Za-z0-9_]` is rejected outright.
pub fn quote_ident(ident: &str) -> Result<String, StoreError> {
    if ident.is_empty() {
        return Err(StoreError::InvalidIdentifier(ident.to_string()));
    }
    if !ident
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(StoreError::InvalidIdentifier(ident.to_string()));
    }
    Ok(format!("\"{ident}\""))
}

#[derive(Debug, Clone)]
pub struct AdminStoreOptions {
    /// Schema whose tables the console exposes.
    pub schema: String,
    /// Upper bound applied to caller-supplied page sizes.
    pub max_page_size: u32,
}

impl Default for AdminStoreOptions {
    fn default() -> Self {
        Self {
            schema: "public".to_string(),
            max_page_size: 200,
        }
    }
}

/// Stateless data-access facade over a shared connection pool.
#[derive(Clone)]
pub struct AdminStore {
    pool: PgPool,
    options: AdminStoreOptions,
}

impl AdminStore {
    pub async fn connect(
        database_url: &str,
        options: AdminStoreOptions,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool, options })
    }

    /// Build a store whose pool connects on first use.
    pub fn connect_lazy(
        database_url: &str,
        options: AdminStoreOptions,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)?;
        Ok(Self { pool, options })
    }

    pub fn with_pool(pool: PgPool, options: AdminStoreOptions) -> Self {
        Self { pool, options }
    }

    pub fn options(&self) -> &AdminStoreOptions {
        &self.options
    }

    /// All table names visible to the console.
    pub async fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        introspect::list_tables(&self.pool, &self.options.schema).await
    }

    /// Column metadata for `table`, in ordinal order.
    /// Fails with [`StoreError::UnknownTable`] before touching the table.
    pub async fn describe_table(&self, table: &str) -> Result<Vec<ColumnDescriptor>, StoreError> {
        self.resolve_table(table).await?;
        introspect::describe_table(&self.pool, &self.options.schema, table).await
    }

    /// Exact-match lookup of an untrusted table name against the catalog.
    ///
    /// This is the sole gate through which a name may enter query text;
    /// it fails closed on anything the catalog does not know.
    async fn resolve_table(&self, table: &str) -> Result<String, StoreError> {
        let found: Option<(String,)> = sqlx::query_as(
            r#"
            select table_name
            from information_schema.tables
            where table_schema = $1
              and table_name = $2
              and table_type = 'BASE TABLE'
            "#,
        )
        .bind(&self.options.schema)
        .bind(table)
        .fetch_optional(&self.pool)
        .await?;

        match found {
            Some((name,)) => quote_ident(&name),
            None => Err(StoreError::UnknownTable {
                table: table.to_string(),
            }),
        }
    }

    /// Exact row count of `table`.
    pub async fn count_rows(&self, table: &str) -> Result<i64, StoreError> {
        let ident = self.resolve_table(table).await?;
        let (count,): (i64,) = sqlx::query_as(&format!("select count(*) from {ident}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Read one page of `table` in the engine's natural order, together
    /// with the column metadata describing it.
    ///
    /// Count and fetch are two separate statements; under concurrent
    /// writes `total` and the returned rows may disagree.
    pub async fn read_page(
        &self,
        table: &str,
        page: u32,
        limit: u32,
    ) -> Result<PageResult, StoreError> {
        let ident = self.resolve_table(table).await?;
        let columns = introspect::describe_table(&self.pool, &self.options.schema, table).await?;

        let page = page.max(1);
        let limit = limit.max(1);
        let offset = i64::from(page - 1) * i64::from(limit);

        let (total,): (i64,) = sqlx::query_as(&format!("select count(*) from {ident}"))
            .fetch_one(&self.pool)
            .await?;

        let sql = format!("select to_jsonb(t) as row from {ident} as t limit $1 offset $2");
        let recs = sqlx::query(&sql)
            .bind(i64::from(limit))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let mut rows = Vec::with_capacity(recs.len());
        for rec in recs {
            rows.push(row_from_json(rec.try_get("row")?)?);
        }

        Ok(PageResult {
            rows,
            columns,
            total,
            page,
            limit,
            total_pages: PageResult::pages_for(total, limit),
        })
    }

    /// Validate, coerce and insert one row, returning it as stored.
    ///
    /// Not idempotent: two identical calls create two rows unless a table
    /// constraint intervenes, in which case the second call surfaces the
    /// violation as [`StoreError::Database`].
    pub async fn insert_row(
        &self,
        table: &str,
        columns: &[ColumnDescriptor],
        data: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<RowRecord, StoreError> {
        let ident = self.resolve_table(table).await?;
        let plan = plan_insert(columns, data)?;

        let mut args = PgArguments::default();
        let mut placeholders = Vec::with_capacity(plan.len());
        let mut column_idents = Vec::with_capacity(plan.len());
        for (idx, entry) in plan.iter().enumerate() {
            let cast = insert::cast_for_data_type(&entry.data_type)
                .map(|c| format!("::{c}"))
                .unwrap_or_default();
            placeholders.push(format!("${}{}", idx + 1, cast));
            column_idents.push(quote_ident(&entry.column)?);
            bind_entry(&mut args, entry)?;
        }

        let sql = format!(
            "insert into {ident} as t ({}) values ({}) returning to_jsonb(t) as row",
            column_idents.join(", "),
            placeholders.join(", ")
        );

        tracing::debug!(table, columns = plan.len(), "inserting admin row");
        let rec = sqlx::query_with(&sql, args).fetch_one(&self.pool).await?;
        row_from_json(rec.try_get("row")?)
    }
}

fn bind_entry(args: &mut PgArguments, entry: &InsertEntry) -> Result<(), StoreError> {
    match &entry.value {
        CoercedValue::Int(n) => args_add(args, &entry.column, *n),
        CoercedValue::Numeric(s) => args_add(args, &entry.column, s.clone()),
        CoercedValue::Bool(b) => args_add(args, &entry.column, *b),
        CoercedValue::Text(s) => args_add(args, &entry.column, s.clone()),
        CoercedValue::Uuid(u) => args_add(args, &entry.column, *u),
        CoercedValue::Json(v) => args_add(args, &entry.column, sqlx::types::Json(v.clone())),
    }
}

fn row_from_json(value: serde_json::Value) -> Result<RowRecord, StoreError> {
    match value {
        serde_json::Value::Object(obj) => Ok(RowRecord::from(obj)),
        other => Err(StoreError::Decode(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_outside_the_allow_list_are_rejected() {
        assert!(quote_ident("users").is_ok());
        assert!(quote_ident("user_sessions2").is_ok());
        assert!(quote_ident("").is_err());
        assert!(quote_ident("users\"; drop table users; --").is_err());
        assert!(quote_ident("schéma").is_err());
        assert!(quote_ident("a b").is_err());
    }

    #[test]
    fn quoting_wraps_in_double_quotes() {
        assert_eq!(quote_ident("accounts").unwrap(), "\"accounts\"");
    }
}
