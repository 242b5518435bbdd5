//! Builds the parameterized statements behind the item store.

use crate::config::AssociationConfig;

pub const ITEMS_TABLE: &str = "items";

/// Item columns in bind order. `id` must stay first.
pub const ITEM_COLUMNS: &[&str] = &[
    "id",
    "name",
    "category_id",
    "active",
    "sold_by_type",
    "price",
    "cost",
    "sku",
    "barcode",
    "track_stock",
    "color",
    "image",
];

/// Quote identifier for PostgreSQL (safe: only from config).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Table name, schema-qualified when a schema is given.
pub fn qualified_table(schema: Option<&str>, table: &str) -> String {
    match schema {
        Some(schema) => format!("{}.{}", quoted(schema), quoted(table)),
        None => quoted(table),
    }
}

fn column_list() -> String {
    ITEM_COLUMNS.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

fn placeholders(n: usize) -> String {
    (1..=n).map(|i| format!("${}", i)).collect::<Vec<_>>().join(", ")
}

pub fn create_items_table() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            "id" TEXT PRIMARY KEY,
            "name" TEXT NOT NULL,
            "category_id" TEXT NOT NULL,
            "active" BOOLEAN NOT NULL DEFAULT FALSE,
            "sold_by_type" TEXT NOT NULL DEFAULT '',
            "price" BIGINT NOT NULL DEFAULT 0,
            "cost" BIGINT NOT NULL DEFAULT 0,
            "sku" TEXT NOT NULL DEFAULT '',
            "barcode" TEXT NOT NULL DEFAULT '',
            "track_stock" BOOLEAN NOT NULL DEFAULT FALSE,
            "color" TEXT NOT NULL DEFAULT '',
            "image" TEXT NOT NULL DEFAULT ''
        )
        "#,
        quoted(ITEMS_TABLE)
    )
}

/// SELECT every item. No ordering; rows come back in whatever order the store yields.
pub fn select_items() -> String {
    format!("SELECT {} FROM {}", column_list(), quoted(ITEMS_TABLE))
}

/// SELECT one item; caller binds the id as `$1`.
pub fn select_item_by_id() -> String {
    format!("{} WHERE \"id\" = $1", select_items())
}

/// INSERT with every column bound in [`ITEM_COLUMNS`] order.
pub fn insert_item() -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(ITEMS_TABLE),
        column_list(),
        placeholders(ITEM_COLUMNS.len())
    )
}

/// INSERT that overwrites every non-key column when the id already exists.
pub fn upsert_item() -> String {
    let assignments = ITEM_COLUMNS
        .iter()
        .skip(1)
        .map(|c| format!("{0} = EXCLUDED.{0}", quoted(c)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} ON CONFLICT (\"id\") DO UPDATE SET {}", insert_item(), assignments)
}

pub fn delete_item() -> String {
    format!("DELETE FROM {} WHERE \"id\" = $1", quoted(ITEMS_TABLE))
}

/// Child rows for a batch of item ids; caller binds a text array as `$1`.
/// The key is compared as text so uuid-typed foreign keys match string ids.
pub fn select_children(assoc: &AssociationConfig) -> String {
    format!(
        "SELECT * FROM {} WHERE {}::text = ANY($1)",
        qualified_table(assoc.schema.as_deref(), &assoc.table),
        quoted(&assoc.foreign_key)
    )
}

/// Child rows of one item; caller binds the id as `$1`.
pub fn delete_children(assoc: &AssociationConfig) -> String {
    format!(
        "DELETE FROM {} WHERE {}::text = $1",
        qualified_table(assoc.schema.as_deref(), &assoc.table),
        quoted(&assoc.foreign_key)
    )
}
