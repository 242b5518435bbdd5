//! Config file types. Every section is optional; missing keys take the defaults below.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on request body size, in bytes.
    pub max_body_bytes: usize,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    /// Child tables eagerly loaded with every item read and cleared on item delete.
    pub associations: Vec<AssociationConfig>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            host: "0.0.0.0".into(),
            port: 8805,
            max_body_bytes: 1024 * 1024,
            logging: LoggingConfig::default(),
            database: DatabaseConfig::default(),
            associations: Vec::new(),
        }
    }
}

impl ServiceConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enable_console_log: bool,
    pub enable_file_log: bool,
    pub log_file: PathBuf,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            enable_console_log: true,
            enable_file_log: false,
            log_file: PathBuf::from("logs/inventory-service.log"),
            filter: "inventory_service=info,tower_http=info".into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            max_connections: 10,
            acquire_timeout_secs: 30,
        }
    }
}

/// One named include: rows of `schema.table` whose `foreign_key` column equals the item id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationConfig {
    /// JSON key the child rows appear under.
    pub name: String,
    pub table: String,
    #[serde(default)]
    pub schema: Option<String>,
    pub foreign_key: String,
}
