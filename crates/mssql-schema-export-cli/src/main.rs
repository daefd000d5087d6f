//! mssql-schema-export CLI - export SQL Server schema objects as CREATE scripts.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mssql_schema_export::{ExportConfig, ExportError, Exporter, MssqlProvider};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "mssql-schema-export")]
#[command(about = "Export SQL Server schema objects as CREATE scripts")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the schema to Tables.sql, Views.sql, and Programmability.sql
    Export {
        /// Output directory (default: three levels above the working directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Test the database connection
    HealthCheck,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), ExportError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let config = match &cli.config {
        Some(path) => {
            let config = ExportConfig::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => ExportConfig::default(),
    };

    match cli.command {
        Commands::Export { out_dir } => {
            let mut exporter = Exporter::new(config);
            if let Some(dir) = out_dir {
                exporter = exporter.with_output_dir(dir);
            }

            let result = exporter.run().await?;

            if cli.output_json {
                println!("{}", result.to_json()?);
            } else {
                println!("Export completed!");
                println!("  Duration: {:.2}s", result.duration_seconds);
                println!(
                    "  Objects: {} schemas, {} tables, {} views, {} functions, {} procedures",
                    result.schemas,
                    result.tables,
                    result.views,
                    result.functions,
                    result.procedures
                );
                if result.files_written.is_empty() {
                    println!("  No files written (nothing to script)");
                } else {
                    for path in &result.files_written {
                        println!("  Wrote {}", path.display());
                    }
                }
            }
        }

        Commands::HealthCheck => {
            let mut provider = MssqlProvider::connect(&config.connection).await?;
            provider.test_connection().await?;
            println!(
                "Connection OK: {}:{}/{}",
                config.connection.host, config.connection.port, config.connection.database
            );
        }
    }

    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
