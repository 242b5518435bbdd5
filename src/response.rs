//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Plain acknowledgement body, e.g. `{"message":"success"}`.
#[derive(Serialize, Debug, ToSchema)]
pub struct Message {
    pub message: String,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn success() -> (StatusCode, Json<Message>) {
    ok(Message {
        message: "success".to_string(),
    })
}
