//! Route tables: item CRUD under `/api/v1`, plus health and API document routes.

mod common;
mod item;
pub use common::{common_routes, common_routes_with_ready};
pub use item::item_routes;
