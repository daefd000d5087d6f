//! Schema provider abstraction.
//!
//! A provider produces one [`DatabaseSnapshot`] per run. The trait exists so
//! the exporter can be driven by an in-memory snapshot in tests.

pub mod mssql;

use async_trait::async_trait;

use crate::error::Result;
use crate::schema::DatabaseSnapshot;

/// Source of schema metadata for one export run.
#[async_trait]
pub trait SchemaProvider: Send {
    /// Read the full schema snapshot: schemas, tables, views, functions,
    /// and stored procedures.
    async fn snapshot(&mut self) -> Result<DatabaseSnapshot>;
}
