//! OpenAPI document for the item API.

use crate::error::ErrorBody;
use crate::handlers::item;
use crate::models::{Item, ItemRequest};
use crate::response::Message;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory Service API Document",
        version = "1.0",
        description = "Documentation for Inventory Service."
    ),
    paths(
        item::list_items,
        item::get_item,
        item::create_item,
        item::update_item,
        item::delete_item,
    ),
    components(schemas(Item, ItemRequest, Message, ErrorBody)),
    tags((name = "items", description = "Inventory item records"))
)]
pub struct ApiDoc;
