//! Item handlers: list, lookup by path or query id, create, update, delete.
//!
//! The `Authorization` header is documented on every operation but never checked.

use crate::error::{AppError, ErrorBody};
use crate::extractors::JsonBody;
use crate::models::{Item, ItemRequest};
use crate::response::{ok, success, Message};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};

/// `GET /items` lists every item; `GET /items?id=X` returns the item with the first `id` value.
#[utoipa::path(
    get,
    path = "/api/v1/items",
    tag = "items",
    params(
        ("Authorization" = String, Header, description = "JWT"),
        ("id" = Option<String>, Query, description = "Item ID; returns that single item instead of the list"),
    ),
    responses(
        (status = 200, description = "All items, or the item matching `id`", body = [Item]),
        (status = 400, description = "`id` given but empty", body = ErrorBody),
        (status = 404, description = "No item with that `id`", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    match params.into_iter().find(|(k, _)| k == "id") {
        Some((_, id)) => {
            if id.is_empty() {
                return Err(AppError::BadRequest("id query parameter is required".into()));
            }
            let item = state.items.get_by_id(&id).await?;
            Ok(ok(item).into_response())
        }
        None => {
            let items = state.items.get_all().await?;
            Ok(ok(items).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/items/{id}",
    tag = "items",
    params(
        ("Authorization" = String, Header, description = "JWT"),
        ("id" = String, Path, description = "Item ID"),
    ),
    responses(
        (status = 200, description = "The item", body = Item),
        (status = 404, description = "No such item", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.items.get_by_id(&id).await?;
    Ok(ok(item))
}

#[utoipa::path(
    post,
    path = "/api/v1/items",
    tag = "items",
    params(("Authorization" = String, Header, description = "JWT")),
    request_body = ItemRequest,
    responses(
        (status = 200, description = "The created item with its generated id", body = Item),
        (status = 400, description = "Validation failure or malformed JSON", body = ErrorBody),
        (status = 409, description = "Id collision", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_create(&req)?;
    let item = req.into_item(uuid::Uuid::new_v4().to_string());
    state.items.create(&item).await?;
    tracing::info!(id = %item.id, "new item created");
    Ok(ok(item))
}

/// Full replace keyed by `id`; an unknown id is inserted.
#[utoipa::path(
    put,
    path = "/api/v1/items",
    tag = "items",
    params(("Authorization" = String, Header, description = "JWT")),
    request_body = Item,
    responses(
        (status = 200, description = "The item as submitted", body = Item),
        (status = 400, description = "Missing id or malformed JSON", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    JsonBody(item): JsonBody<Item>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_id(&item)?;
    state.items.update(&item).await?;
    Ok(ok(item))
}

#[utoipa::path(
    delete,
    path = "/api/v1/items",
    tag = "items",
    params(("Authorization" = String, Header, description = "JWT")),
    request_body = Item,
    responses(
        (status = 200, description = "Deleted", body = Message),
        (status = 400, description = "Missing id or malformed JSON", body = ErrorBody),
        (status = 404, description = "No such item", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    JsonBody(item): JsonBody<Item>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_id(&item)?;
    state.items.delete(&item).await?;
    Ok(success())
}
