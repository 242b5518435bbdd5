//! Config sanity checks run after every load.

use crate::config::types::ServiceConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

/// JSON keys of an item; an association may not shadow them.
const ITEM_KEYS: &[&str] = &[
    "id", "name", "categoryID", "active", "soldByType", "price", "cost", "sku", "barcode", "trackStock", "color",
    "image",
];

pub fn validate(config: &ServiceConfig) -> Result<(), ConfigError> {
    if config.database.max_connections == 0 {
        return Err(ConfigError::Validation("database.max_connections must be at least 1".into()));
    }
    if config.max_body_bytes == 0 {
        return Err(ConfigError::Validation("max_body_bytes must be at least 1".into()));
    }

    let ident = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").map_err(|e| ConfigError::Validation(e.to_string()))?;
    let check = |kind: &'static str, value: &str| {
        if ident.is_match(value) {
            Ok(())
        } else {
            Err(ConfigError::InvalidIdentifier {
                kind,
                value: value.to_string(),
            })
        }
    };

    let mut names = HashSet::new();
    for assoc in &config.associations {
        check("association name", &assoc.name)?;
        check("table", &assoc.table)?;
        check("foreign key", &assoc.foreign_key)?;
        if let Some(schema) = &assoc.schema {
            check("schema", schema)?;
        }
        if ITEM_KEYS.contains(&assoc.name.as_str()) || !names.insert(assoc.name.as_str()) {
            return Err(ConfigError::DuplicateAssociation(assoc.name.clone()));
        }
    }
    Ok(())
}
