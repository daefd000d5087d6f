//! Schema snapshot types.
//!
//! A [`DatabaseSnapshot`] is the full in-memory representation of a
//! database's structural metadata, produced once per run by a
//! [`crate::provider::SchemaProvider`] and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Column metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// MSSQL data type name (e.g. `nvarchar`, `int`).
    pub data_type: String,

    /// Character maximum length; -1 for `max` types, 0 when not applicable.
    pub max_length: i32,

    /// Numeric precision, 0 when not applicable.
    pub precision: i32,

    /// Numeric scale, 0 when not applicable.
    pub scale: i32,

    /// Whether NULL values are allowed.
    pub is_nullable: bool,

    /// Whether the column is an IDENTITY column.
    pub is_identity: bool,

    /// Ordinal position within the table (1-based).
    pub ordinal_pos: i32,
}

/// Table metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Owning schema name.
    pub schema: String,

    /// Table name.
    pub name: String,

    /// Column definitions in ordinal order.
    pub columns: Vec<Column>,

    /// Primary key column names, in key order.
    pub primary_key: Vec<String>,
}

impl Table {
    /// Get the fully qualified table name.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    /// Check if the table has a primary key.
    pub fn has_pk(&self) -> bool {
        !self.primary_key.is_empty()
    }
}

/// A view, function, or stored procedure with its catalog definition.
///
/// The `definition` field holds the exact defining statement text stored in
/// `sys.sql_modules`; it is emitted verbatim, never reconstructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlModule {
    /// Owning schema name.
    pub schema: String,

    /// Object name.
    pub name: String,

    /// Verbatim CREATE statement text.
    pub definition: String,
}

/// Aggregate root holding everything read from the database in one fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSnapshot {
    /// All schema names present in the database, built-ins included.
    pub schemas: Vec<String>,

    /// Base tables across all schemas.
    pub tables: Vec<Table>,

    /// Views with their catalog definitions.
    pub views: Vec<SqlModule>,

    /// Scalar and table-valued functions with their catalog definitions.
    pub functions: Vec<SqlModule>,

    /// Stored procedures with their catalog definitions.
    pub procedures: Vec<SqlModule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let table = Table {
            schema: "sales".to_string(),
            name: "orders".to_string(),
            columns: Vec::new(),
            primary_key: Vec::new(),
        };
        assert_eq!(table.full_name(), "sales.orders");
        assert!(!table.has_pk());
    }
}
