//! Decode arbitrary association rows into JSON objects.

use serde_json::{Map, Number, Value};
use sqlx::postgres::{PgRow, Postgres};
use sqlx::{Column, Decode, Row, Type, TypeInfo};

/// Column name → JSON value. Unsupported or NULL cells become `null`.
pub fn row_to_json(row: &PgRow) -> Value {
    let mut map = Map::new();
    for (idx, col) in row.columns().iter().enumerate() {
        map.insert(col.name().to_string(), cell_to_value(row, idx, col.type_info().name()));
    }
    Value::Object(map)
}

fn cell_to_value(row: &PgRow, idx: usize, type_name: &str) -> Value {
    let value = match type_name {
        "INT2" => decode::<i16>(row, idx).map(Value::from),
        "INT4" => decode::<i32>(row, idx).map(Value::from),
        "INT8" => decode::<i64>(row, idx).map(Value::from),
        "FLOAT4" => decode::<f32>(row, idx)
            .and_then(|n| Number::from_f64(n as f64))
            .map(Value::Number),
        "FLOAT8" => decode::<f64>(row, idx).and_then(Number::from_f64).map(Value::Number),
        "BOOL" => decode::<bool>(row, idx).map(Value::Bool),
        "UUID" => decode::<uuid::Uuid>(row, idx).map(|u| Value::String(u.to_string())),
        "TIMESTAMPTZ" => {
            decode::<chrono::DateTime<chrono::Utc>>(row, idx).map(|d| Value::String(d.to_rfc3339()))
        }
        "TIMESTAMP" => decode::<chrono::NaiveDateTime>(row, idx)
            .map(|d| Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string())),
        "DATE" => decode::<chrono::NaiveDate>(row, idx).map(|d| Value::String(d.format("%Y-%m-%d").to_string())),
        "JSON" | "JSONB" => decode::<Value>(row, idx),
        _ => decode::<String>(row, idx).map(Value::String),
    };
    value.unwrap_or(Value::Null)
}

fn decode<'r, T>(row: &'r PgRow, idx: usize) -> Option<T>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get::<Option<T>, _>(idx).ok().flatten()
}
