//! Item CRUD routes. Update and delete take the item in the body, so they share the collection path.

use crate::handlers::item::{create_item, delete_item, get_item, list_items, update_item};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn item_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/items",
            get(list_items).post(create_item).put(update_item).delete(delete_item),
        )
        .route("/items/:id", get(get_item))
        .with_state(state)
}
