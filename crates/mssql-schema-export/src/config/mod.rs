//! Configuration loading and validation.
//!
//! The exporter runs with a compiled-in connection descriptor by default;
//! a YAML file can override any field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{ExportError, Result};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Source database connection (MSSQL).
    #[serde(default)]
    pub connection: ConnectionConfig,
}

impl ExportConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ExportConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.connection.host.is_empty() {
            return Err(ExportError::Config("connection.host is required".into()));
        }
        if self.connection.database.is_empty() {
            return Err(ExportError::Config(
                "connection.database is required".into(),
            ));
        }
        if self.connection.port == 0 {
            return Err(ExportError::Config(
                "connection.port must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Source database (MSSQL) connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Database host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Database port (default: 1433).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name.
    #[serde(default = "default_database")]
    pub database: String,

    /// Username.
    #[serde(default = "default_user")]
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// Encrypt connection (default: false, matching local-instance use).
    #[serde(default)]
    pub encrypt: bool,

    /// Trust server certificate (default: true).
    #[serde(default = "default_true")]
    pub trust_server_cert: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: default_user(),
            password: String::new(),
            encrypt: false,
            trust_server_cert: true,
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("encrypt", &self.encrypt)
            .field("trust_server_cert", &self.trust_server_cert)
            .finish()
    }
}

// Default value functions for serde

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    1433
}

fn default_database() -> String {
    "Northwind".to_string()
}

fn default_user() -> String {
    "sa".to_string()
}

fn default_true() -> bool {
    true
}
