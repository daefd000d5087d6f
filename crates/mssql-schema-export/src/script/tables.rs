//! T-SQL `CREATE TABLE` scripter.
//!
//! Produces executable CREATE TABLE statements from snapshot metadata:
//! bracket-quoted identifiers, MSSQL type formatting, NULL/NOT NULL and
//! IDENTITY clauses, and clustered primary key constraints.

use crate::schema::{Column, Table};
use crate::script::{quote_ident, text};

/// Scripts `CREATE TABLE` statements for a set of tables.
#[derive(Debug, Clone)]
pub struct TableScripter {
    /// Qualify table names with their owning schema.
    pub include_schema: bool,
}

impl Default for TableScripter {
    fn default() -> Self {
        Self {
            include_schema: true,
        }
    }
}

impl TableScripter {
    /// Create a scripter that qualifies table names with their schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script all tables, each statement followed by a `GO` separator.
    pub fn write(&self, tables: &[Table]) -> String {
        let mut out = String::new();
        for table in tables {
            out.push_str(&self.write_table(table));
            out.push_str("GO\n\n");
        }
        text::normalize(&out)
    }

    fn write_table(&self, table: &Table) -> String {
        let name = if self.include_schema {
            format!(
                "{}.{}",
                quote_ident(&table.schema),
                quote_ident(&table.name)
            )
        } else {
            quote_ident(&table.name)
        };

        let mut lines: Vec<String> = table.columns.iter().map(column_definition).collect();

        if table.has_pk() {
            let pk_cols: Vec<String> = table
                .primary_key
                .iter()
                .map(|c| quote_ident(c))
                .collect();
            let pk_name = format!("PK_{}_{}", table.schema, table.name);
            lines.push(format!(
                "CONSTRAINT {} PRIMARY KEY CLUSTERED ({})",
                quote_ident(&pk_name),
                pk_cols.join(", ")
            ));
        }

        format!("CREATE TABLE {}\n(\n    {}\n)\n", name, lines.join(",\n    "))
    }
}

fn column_definition(col: &Column) -> String {
    let data_type = format_mssql_type(&col.data_type, col.max_length, col.precision, col.scale);
    let identity = if col.is_identity { " IDENTITY(1,1)" } else { "" };
    let null_clause = if col.is_nullable { "NULL" } else { "NOT NULL" };
    format!(
        "{} {}{} {}",
        quote_ident(&col.name),
        data_type,
        identity,
        null_clause
    )
}

/// Format an MSSQL type with its length/precision/scale arguments.
fn format_mssql_type(data_type: &str, max_length: i32, precision: i32, scale: i32) -> String {
    let lower = data_type.to_lowercase();
    match lower.as_str() {
        "bigint" | "int" | "smallint" | "tinyint" | "bit" | "money" | "smallmoney" | "real"
        | "date" | "datetime" | "smalldatetime" | "image" | "text" | "ntext"
        | "uniqueidentifier" | "xml" => data_type.to_string(),
        "float" => {
            if precision > 0 {
                format!("float({})", precision)
            } else {
                "float".to_string()
            }
        }
        "decimal" | "numeric" => {
            if precision > 0 {
                format!("{}({}, {})", data_type, precision, scale)
            } else {
                format!("{}(18, 0)", data_type)
            }
        }
        "datetime2" | "time" | "datetimeoffset" => {
            if scale > 0 {
                format!("{}({})", data_type, scale)
            } else {
                data_type.to_string()
            }
        }
        // CHARACTER_MAXIMUM_LENGTH is already in character units, -1 = max
        "char" | "varchar" | "nchar" | "nvarchar" | "binary" | "varbinary" => {
            if max_length == -1 {
                format!("{}(max)", data_type)
            } else if max_length > 0 {
                format!("{}({})", data_type, max_length)
            } else {
                format!("{}(255)", data_type)
            }
        }
        _ => data_type.to_string(),
    }
}
