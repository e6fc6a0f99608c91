//! Shared value types for the Tablier admin console.
//!
//! Everything in this crate is a transient, request-scoped value object:
//! schema metadata is read fresh from the database catalog on every admin
//! request, rows have no fixed shape beyond the descriptors that accompany
//! them, and identities live only as long as the request that carried them.

pub mod identity;
pub mod page;
pub mod row;
pub mod schema;

pub use identity::{CallerIdentity, ParseRoleError, Role};
pub use page::PageResult;
pub use row::{CellValue, RowRecord};
pub use schema::{ColumnDescriptor, SqlType, TableDescriptor};
