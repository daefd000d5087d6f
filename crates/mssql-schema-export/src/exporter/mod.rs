//! Export orchestrator - main workflow coordinator.
//!
//! One run is strictly linear: open connection, take one schema snapshot,
//! run the emitters in a fixed order, write up to three script files, drop
//! the connection. No retries, no concurrency.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ExportConfig;
use crate::error::Result;
use crate::output;
use crate::provider::{mssql::MssqlProvider, SchemaProvider};
use crate::script::{self, tables::TableScripter};

/// Name of the schemas + tables script.
pub const TABLES_FILE: &str = "Tables.sql";

/// Name of the views script.
pub const VIEWS_FILE: &str = "Views.sql";

/// Name of the functions + stored procedures script.
pub const PROGRAMMABILITY_FILE: &str = "Programmability.sql";

/// Export orchestrator.
pub struct Exporter {
    config: ExportConfig,
    output_dir: Option<PathBuf>,
}

/// Result of an export run.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Custom schemas scripted.
    pub schemas: usize,

    /// Tables scripted.
    pub tables: usize,

    /// Views scripted.
    pub views: usize,

    /// Functions scripted.
    pub functions: usize,

    /// Stored procedures scripted.
    pub procedures: usize,

    /// Paths of the files actually written.
    pub files_written: Vec<PathBuf>,
}

impl ExportResult {
    /// Serialize the result as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Exporter {
    /// Create a new exporter.
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            output_dir: None,
        }
    }

    /// Override the output directory (default: three levels above the
    /// current working directory).
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    /// Run the export against the configured database.
    pub async fn run(&self) -> Result<ExportResult> {
        let mut provider = MssqlProvider::connect(&self.config.connection).await?;
        // Provider owns the connection; dropping it on any exit path below
        // releases the connection.
        self.run_with_provider(&mut provider).await
    }

    /// Run the export against an arbitrary schema provider.
    pub async fn run_with_provider<P: SchemaProvider + ?Sized>(
        &self,
        provider: &mut P,
    ) -> Result<ExportResult> {
        let started = Instant::now();

        info!("Reading schema snapshot");
        let snapshot = provider.snapshot().await?;

        let custom_schemas = script::custom_schemas(&snapshot.schemas);

        info!("Generating scripts");
        let schema_sql = script::schema_statements(&snapshot.schemas);
        let table_sql = if snapshot.tables.is_empty() {
            String::new()
        } else {
            TableScripter::new().write(&snapshot.tables)
        };
        let view_sql = script::module_statements(&snapshot.views);
        let function_sql = script::module_statements(&snapshot.functions);
        let procedure_sql = script::module_statements(&snapshot.procedures);

        let mut files_written = Vec::new();
        match self.output_dir.clone().or_else(output::resolve_output_dir) {
            Some(dir) => {
                let scripts = [
                    (TABLES_FILE, format!("{}{}", schema_sql, table_sql)),
                    (VIEWS_FILE, view_sql),
                    (
                        PROGRAMMABILITY_FILE,
                        format!("{}{}", function_sql, procedure_sql),
                    ),
                ];
                for (name, text) in &scripts {
                    if let Some(path) = output::write_script(&dir, name, text)? {
                        files_written.push(path);
                    }
                }
            }
            None => {
                warn!("Output directory unavailable; no files written");
            }
        }

        let result = ExportResult {
            duration_seconds: started.elapsed().as_secs_f64(),
            schemas: custom_schemas.len(),
            tables: snapshot.tables.len(),
            views: snapshot.views.len(),
            functions: snapshot.functions.len(),
            procedures: snapshot.procedures.len(),
            files_written,
        };

        info!(
            "Export finished in {:.2}s: {} files written",
            result.duration_seconds,
            result.files_written.len()
        );
        Ok(result)
    }
}
