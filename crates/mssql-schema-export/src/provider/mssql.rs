//! MSSQL schema provider.
//!
//! Reads schema metadata through a single Tiberius connection using the
//! standard catalog views (`sys.schemas`, `INFORMATION_SCHEMA`,
//! `sys.sql_modules`).

use async_trait::async_trait;
use tiberius::{AuthMethod, Client, Config, EncryptionLevel, Query, Row};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::provider::SchemaProvider;
use crate::schema::{Column, DatabaseSnapshot, SqlModule, Table};

/// Maximum TDS packet size (32767 bytes, ~32KB).
const TDS_MAX_PACKET_SIZE: u32 = 32767;

/// MSSQL schema provider over a single exclusive connection.
///
/// The connection is owned for the duration of one run and released when
/// the provider is dropped, on both success and error paths.
pub struct MssqlProvider {
    client: Client<Compat<TcpStream>>,
}

impl MssqlProvider {
    /// Open a connection using the given configuration.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let tiberius_config = build_config(config);

        let tcp = TcpStream::connect(tiberius_config.get_addr()).await?;
        tcp.set_nodelay(true).ok();

        let client = Client::connect(tiberius_config, tcp.compat_write()).await?;

        info!(
            "Connected to MSSQL: {}:{}/{}",
            config.host, config.port, config.database
        );

        Ok(Self { client })
    }

    /// Test the connection with a trivial round trip.
    pub async fn test_connection(&mut self) -> Result<()> {
        self.client
            .simple_query("SELECT 1")
            .await?
            .into_row()
            .await?;
        Ok(())
    }

    async fn load_schemas(&mut self) -> Result<Vec<String>> {
        let query = "SELECT name FROM sys.schemas ORDER BY name";
        let stream = self.client.simple_query(query).await?;
        let rows = stream.into_first_result().await?;

        let schemas = rows
            .iter()
            .map(|row| row.get::<&str, _>(0).unwrap_or_default().to_string())
            .collect::<Vec<_>>();

        debug!("Loaded {} schemas", schemas.len());
        Ok(schemas)
    }

    async fn load_tables(&mut self) -> Result<Vec<Table>> {
        let query = r#"
            SELECT
                t.TABLE_SCHEMA,
                t.TABLE_NAME
            FROM INFORMATION_SCHEMA.TABLES t
            WHERE t.TABLE_TYPE = 'BASE TABLE'
            ORDER BY t.TABLE_SCHEMA, t.TABLE_NAME
        "#;

        let stream = self.client.simple_query(query).await?;
        let rows = stream.into_first_result().await?;

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            tables.push(Table {
                schema: row.get::<&str, _>(0).unwrap_or_default().to_string(),
                name: row.get::<&str, _>(1).unwrap_or_default().to_string(),
                columns: Vec::new(),
                primary_key: Vec::new(),
            });
        }

        for table in &mut tables {
            load_columns(&mut self.client, table).await?;
            load_primary_key(&mut self.client, table).await?;
        }

        debug!("Loaded {} tables", tables.len());
        Ok(tables)
    }

    async fn load_views(&mut self) -> Result<Vec<SqlModule>> {
        let query = r#"
            SELECT s.name, v.name, m.definition
            FROM sys.views v
            JOIN sys.schemas s ON v.schema_id = s.schema_id
            JOIN sys.sql_modules m ON m.object_id = v.object_id
            ORDER BY s.name, v.name
        "#;
        self.load_modules(query, "views").await
    }

    async fn load_functions(&mut self) -> Result<Vec<SqlModule>> {
        // FN = scalar, IF = inline table-valued, TF = table-valued
        let query = r#"
            SELECT s.name, o.name, m.definition
            FROM sys.objects o
            JOIN sys.schemas s ON o.schema_id = s.schema_id
            JOIN sys.sql_modules m ON m.object_id = o.object_id
            WHERE o.type IN ('FN', 'IF', 'TF')
            ORDER BY s.name, o.name
        "#;
        self.load_modules(query, "functions").await
    }

    async fn load_procedures(&mut self) -> Result<Vec<SqlModule>> {
        let query = r#"
            SELECT s.name, p.name, m.definition
            FROM sys.procedures p
            JOIN sys.schemas s ON p.schema_id = s.schema_id
            JOIN sys.sql_modules m ON m.object_id = p.object_id
            ORDER BY s.name, p.name
        "#;
        self.load_modules(query, "procedures").await
    }

    async fn load_modules(&mut self, query: &str, kind: &str) -> Result<Vec<SqlModule>> {
        let stream = self.client.simple_query(query).await?;
        let rows = stream.into_first_result().await?;

        let modules = rows.iter().map(row_to_module).collect::<Vec<_>>();

        debug!("Loaded {} {}", modules.len(), kind);
        Ok(modules)
    }
}

#[async_trait]
impl SchemaProvider for MssqlProvider {
    async fn snapshot(&mut self) -> Result<DatabaseSnapshot> {
        let schemas = self.load_schemas().await?;
        let tables = self.load_tables().await?;
        let views = self.load_views().await?;
        let functions = self.load_functions().await?;
        let procedures = self.load_procedures().await?;

        info!(
            "Schema snapshot: {} schemas, {} tables, {} views, {} functions, {} procedures",
            schemas.len(),
            tables.len(),
            views.len(),
            functions.len(),
            procedures.len()
        );

        Ok(DatabaseSnapshot {
            schemas,
            tables,
            views,
            functions,
            procedures,
        })
    }
}

fn build_config(config: &ConnectionConfig) -> Config {
    let mut tiberius_config = Config::new();
    tiberius_config.host(&config.host);
    tiberius_config.port(config.port);
    tiberius_config.database(&config.database);
    tiberius_config.authentication(AuthMethod::sql_server(&config.user, &config.password));

    if config.encrypt {
        if config.trust_server_cert {
            tiberius_config.trust_cert();
        }
        tiberius_config.encryption(EncryptionLevel::Required);
    } else {
        tiberius_config.encryption(EncryptionLevel::NotSupported);
    }

    tiberius_config.packet_size(TDS_MAX_PACKET_SIZE);
    tiberius_config
}

fn row_to_module(row: &Row) -> SqlModule {
    SqlModule {
        schema: row.get::<&str, _>(0).unwrap_or_default().to_string(),
        name: row.get::<&str, _>(1).unwrap_or_default().to_string(),
        definition: row.get::<&str, _>(2).unwrap_or_default().to_string(),
    }
}

/// Load columns for a table.
async fn load_columns(client: &mut Client<Compat<TcpStream>>, table: &mut Table) -> Result<()> {
    let query = r#"
        SELECT
            COLUMN_NAME,
            DATA_TYPE,
            CAST(ISNULL(CHARACTER_MAXIMUM_LENGTH, 0) AS INT),
            CAST(ISNULL(NUMERIC_PRECISION, 0) AS INT),
            CAST(ISNULL(NUMERIC_SCALE, 0) AS INT),
            CASE WHEN IS_NULLABLE = 'YES' THEN 1 ELSE 0 END,
            ISNULL(COLUMNPROPERTY(OBJECT_ID(TABLE_SCHEMA + '.' + TABLE_NAME), COLUMN_NAME, 'IsIdentity'), 0),
            ORDINAL_POSITION
        FROM INFORMATION_SCHEMA.COLUMNS
        WHERE TABLE_SCHEMA = @P1 AND TABLE_NAME = @P2
        ORDER BY ORDINAL_POSITION
    "#;

    let mut query = Query::new(query);
    query.bind(table.schema.as_str());
    query.bind(table.name.as_str());

    let stream = query.query(client).await?;
    let rows = stream.into_first_result().await?;

    for row in rows {
        table.columns.push(Column {
            name: row.get::<&str, _>(0).unwrap_or_default().to_string(),
            data_type: row.get::<&str, _>(1).unwrap_or_default().to_string(),
            max_length: row.get::<i32, _>(2).unwrap_or(0),
            precision: row.get::<i32, _>(3).unwrap_or(0),
            scale: row.get::<i32, _>(4).unwrap_or(0),
            is_nullable: row.get::<i32, _>(5).unwrap_or(0) == 1,
            is_identity: row.get::<i32, _>(6).unwrap_or(0) == 1,
            ordinal_pos: row.get::<i32, _>(7).unwrap_or(0),
        });
    }

    debug!(
        "Loaded {} columns for {}",
        table.columns.len(),
        table.full_name()
    );
    Ok(())
}

/// Load primary key columns for a table, in key order.
async fn load_primary_key(client: &mut Client<Compat<TcpStream>>, table: &mut Table) -> Result<()> {
    let query = r#"
        SELECT c.COLUMN_NAME
        FROM INFORMATION_SCHEMA.TABLE_CONSTRAINTS tc
        JOIN INFORMATION_SCHEMA.KEY_COLUMN_USAGE c
            ON c.CONSTRAINT_NAME = tc.CONSTRAINT_NAME
            AND c.TABLE_SCHEMA = tc.TABLE_SCHEMA
            AND c.TABLE_NAME = tc.TABLE_NAME
        WHERE tc.CONSTRAINT_TYPE = 'PRIMARY KEY'
          AND tc.TABLE_SCHEMA = @P1
          AND tc.TABLE_NAME = @P2
        ORDER BY c.ORDINAL_POSITION
    "#;

    let mut query = Query::new(query);
    query.bind(table.schema.as_str());
    query.bind(table.name.as_str());

    let stream = query.query(client).await?;
    let rows = stream.into_first_result().await?;

    for row in rows {
        let col_name: &str = row.get(0).unwrap_or_default();
        table.primary_key.push(col_name.to_string());
    }

    Ok(())
}
