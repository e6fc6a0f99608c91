//! Error types for the admin store.

use thiserror::Error;

/// Errors surfaced by the admin store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested table does not exist in the application schema.
    /// Raised before any query text mentioning the name is built.
    #[error("table '{table}' does not exist")]
    UnknownTable { table: String },

    /// A non-nullable column was absent, null or empty in the payload.
    #[error("required column '{column}' is missing or empty")]
    MissingField { column: String },

    /// A submitted value could not be coerced to the column's SQL type.
    #[error("value for column '{column}' is not a valid {expected}")]
    InvalidValue {
        column: String,
        expected: &'static str,
    },

    /// After dropping blank fields, nothing was left to insert.
    #[error("no insertable column in payload")]
    EmptyInsert,

    /// An identifier failed the allow-list check.
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// A parameter could not be bound.
    #[error("failed to bind parameter for column '{column}': {message}")]
    Bind { column: String, message: String },

    /// A row came back in an unexpected shape.
    #[error("unexpected row shape: {0}")]
    Decode(String),

    /// The underlying database call failed (including constraint
    /// violations). Never retried.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Whether this error is a payload-validation failure, detected before
    /// any write was issued.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StoreError::MissingField { .. }
                | StoreError::InvalidValue { .. }
                | StoreError::EmptyInsert
        )
    }
}
