//! # mssql-schema-export
//!
//! Export the schema of a SQL Server database as executable CREATE scripts.
//!
//! One run connects to the database, takes a single snapshot of its
//! structural metadata, and writes three script files:
//!
//! - **Tables.sql** — CREATE SCHEMA statements for custom schemas followed
//!   by schema-qualified CREATE TABLE statements
//! - **Views.sql** — verbatim CREATE VIEW statements from the catalog
//! - **Programmability.sql** — verbatim CREATE FUNCTION and
//!   CREATE PROCEDURE statements
//!
//! Every statement is followed by a `GO` batch separator so the output can
//! be replayed with SQL Server's scripting tools.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mssql_schema_export::{Exporter, ExportConfig};
//!
//! #[tokio::main]
//! async fn main() -> mssql_schema_export::Result<()> {
//!     let config = ExportConfig::default();
//!     let result = Exporter::new(config).run().await?;
//!     println!("Wrote {} files", result.files_written.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod exporter;
pub mod output;
pub mod provider;
pub mod schema;
pub mod script;

// Re-exports for convenient access
pub use config::{ConnectionConfig, ExportConfig};
pub use error::{ExportError, Result};
pub use exporter::{ExportResult, Exporter};
pub use provider::{mssql::MssqlProvider, SchemaProvider};
pub use schema::{Column, DatabaseSnapshot, SqlModule, Table};
