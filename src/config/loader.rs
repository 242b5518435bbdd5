//! Load config from a JSON file and the process environment.

use crate::config::types::ServiceConfig;
use crate::config::validate;
use crate::error::ConfigError;
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DATABASE_URL_ENV: &str = "POSTGRES_DB_CONN_STR";
/// Accepted when `POSTGRES_DB_CONN_STR` is unset.
pub const DATABASE_URL_FALLBACK_ENV: &str = "DATABASE_URL";
pub const PORT_ENV: &str = "PORT";

/// Parse and validate config JSON.
pub fn parse_config(text: &str, origin: &str) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig = serde_json::from_str(text).map_err(|e| ConfigError::Load {
        path: origin.to_string(),
        message: e.to_string(),
    })?;
    validate(&config)?;
    Ok(config)
}

pub fn load_from_path(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let origin = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Load {
        path: origin.clone(),
        message: e.to_string(),
    })?;
    parse_config(&text, &origin)
}

/// Load the service config. `CONFIG_PATH` names the file; when unset, `config.json` is read if it
/// exists and built-in defaults are used otherwise. Environment overrides are applied last.
pub fn load() -> Result<ServiceConfig, ConfigError> {
    let mut config = match env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_from_path(&PathBuf::from(path))?,
        Err(_) => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if path.exists() {
                load_from_path(path)?
            } else {
                ServiceConfig::default()
            }
        }
    };
    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(PORT_ENV) {
        config.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::Validation(format!("{} must be a port number, got '{}'", PORT_ENV, port)))?;
    }
    Ok(())
}

/// Connection string for the item store.
pub fn database_url() -> Result<String, ConfigError> {
    database_url_from(|key| env::var(key).ok())
}

pub fn database_url_from<F>(lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    [DATABASE_URL_ENV, DATABASE_URL_FALLBACK_ENV]
        .iter()
        .filter_map(|key| lookup(key))
        .find(|url| !url.trim().is_empty())
        .ok_or(ConfigError::MissingEnv(DATABASE_URL_ENV))
}
