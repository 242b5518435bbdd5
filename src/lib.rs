//! Inventory service: CRUD over inventory items as HTTP/JSON, stored in PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AssociationConfig, ServiceConfig};
pub use error::{AppError, ConfigError};
pub use models::{Item, ItemRequest, LoadedItem};
pub use routes::{common_routes, common_routes_with_ready, item_routes};
pub use state::AppState;
pub use store::{ItemStore, MemoryItemStore, PgItemStore};

use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Full application router: common routes at the root, item routes under `/api/v1`.
/// Bodies over `max_body_bytes` are rejected by [`extractors::JsonBody`] with a 413 envelope.
pub fn app(state: AppState, config: &ServiceConfig) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api/v1", item_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.max_body_bytes)),
        )
}
