//! Statement emitters for the three output scripts.
//!
//! Each emitter is a stateless transformation from snapshot data to script
//! text. Emitters return an empty string for empty input so the caller can
//! suppress the corresponding file entirely.

pub mod tables;
pub mod text;

use crate::schema::SqlModule;

/// Built-in schemas that ship with SQL Server 2017 and are never scripted.
pub const DEFAULT_SCHEMAS: [&str; 13] = [
    "db_accessadmin",
    "db_backupoperator",
    "db_datareader",
    "db_datawriter",
    "db_ddladmin",
    "db_denydatareader",
    "db_denydatawriter",
    "db_owner",
    "db_securityadmin",
    "dbo",
    "guest",
    "INFORMATION_SCHEMA",
    "sys",
];

/// Quote an MSSQL identifier with brackets.
pub fn quote_ident(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// Filter out built-in schemas and sort the remainder ascending by name.
///
/// Comparison is exact-string: a built-in name in different case is treated
/// as a custom schema.
pub fn custom_schemas(schemas: &[String]) -> Vec<String> {
    let mut custom: Vec<String> = schemas
        .iter()
        .filter(|name| !DEFAULT_SCHEMAS.contains(&name.as_str()))
        .cloned()
        .collect();
    custom.sort();
    custom
}

/// Emit `CREATE SCHEMA` statements for the custom schemas in a snapshot.
///
/// Returns an empty string when no custom schemas exist.
pub fn schema_statements(schemas: &[String]) -> String {
    let custom = custom_schemas(schemas);
    if custom.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    for schema in &custom {
        out.push_str(&format!("CREATE SCHEMA {}\nGO\n\n", quote_ident(schema)));
    }

    text::normalize(&out)
}

/// Emit the verbatim definitions of views, functions, or stored procedures,
/// each followed by a `GO` batch separator.
///
/// Objects are ordered by owning-schema name, then object name, both
/// ascending. Returns an empty string for an empty collection.
pub fn module_statements(modules: &[SqlModule]) -> String {
    if modules.is_empty() {
        return String::new();
    }

    let mut ordered: Vec<&SqlModule> = modules.iter().collect();
    ordered.sort_by(|a, b| a.schema.cmp(&b.schema).then_with(|| a.name.cmp(&b.name)));

    let mut out = String::new();
    for module in ordered {
        out.push_str(&module.definition);
        out.push_str("\nGO\n\n");
    }

    text::normalize(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(schema: &str, name: &str, definition: &str) -> SqlModule {
        SqlModule {
            schema: schema.to_string(),
            name: name.to_string(),
            definition: definition.to_string(),
        }
    }

    #[test]
    fn test_custom_schemas_excludes_builtins() {
        let schemas: Vec<String> = ["sales", "dbo", "sys", "audit", "INFORMATION_SCHEMA"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(custom_schemas(&schemas), vec!["audit", "sales"]);
    }

    #[test]
    fn test_custom_schemas_exact_case_only() {
        // Comparison is exact-string: "DBO" is not the built-in "dbo".
        let schemas: Vec<String> = ["DBO", "dbo", "Sys"].iter().map(|s| s.to_string()).collect();
        assert_eq!(custom_schemas(&schemas), vec!["DBO", "Sys"]);
    }

    #[test]
    fn test_custom_schemas_idempotent() {
        let schemas: Vec<String> = ["b", "a", "dbo"].iter().map(|s| s.to_string()).collect();
        let once = custom_schemas(&schemas);
        let twice = custom_schemas(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_schema_statements_single() {
        let schemas = vec!["sales".to_string(), "dbo".to_string()];
        assert_eq!(schema_statements(&schemas), "CREATE SCHEMA [sales]\nGO\n\n");
    }

    #[test]
    fn test_schema_statements_sorted() {
        let schemas = vec!["zeta".to_string(), "alpha".to_string()];
        assert_eq!(
            schema_statements(&schemas),
            "CREATE SCHEMA [alpha]\nGO\n\nCREATE SCHEMA [zeta]\nGO\n\n"
        );
    }

    #[test]
    fn test_schema_statements_empty_for_builtins_only() {
        let schemas = vec!["dbo".to_string(), "sys".to_string()];
        assert_eq!(schema_statements(&schemas), "");
    }

    #[test]
    fn test_module_statements_empty() {
        assert_eq!(module_statements(&[]), "");
    }

    #[test]
    fn test_module_statements_single_view() {
        let views = vec![module(
            "dbo",
            "v_orders",
            "CREATE VIEW dbo.v_orders AS SELECT 1",
        )];
        assert_eq!(
            module_statements(&views),
            "CREATE VIEW dbo.v_orders AS SELECT 1\nGO\n\n"
        );
    }

    #[test]
    fn test_module_statements_ordering() {
        let views = vec![
            module("b", "x", "CREATE VIEW b.x AS SELECT 1"),
            module("a", "z", "CREATE VIEW a.z AS SELECT 1"),
            module("a", "a", "CREATE VIEW a.a AS SELECT 1"),
        ];
        let out = module_statements(&views);
        let pos_aa = out.find("a.a").unwrap();
        let pos_az = out.find("a.z").unwrap();
        let pos_bx = out.find("b.x").unwrap();
        assert!(pos_aa < pos_az && pos_az < pos_bx);
    }

    #[test]
    fn test_module_statements_collapse_blank_runs_in_definition() {
        let views = vec![module(
            "dbo",
            "v",
            "CREATE VIEW dbo.v AS\r\n\r\n\r\nSELECT 1",
        )];
        assert_eq!(
            module_statements(&views),
            "CREATE VIEW dbo.v AS\n\nSELECT 1\nGO\n\n"
        );
    }

    #[test]
    fn test_quote_ident_escapes_brackets() {
        assert_eq!(quote_ident("sales"), "[sales]");
        assert_eq!(quote_ident("odd]name"), "[odd]]name]");
    }
}
