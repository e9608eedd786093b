use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use common::config::Config;
use db::DatabaseConnection;

/// Create a router that exposes read-only server configuration values.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new().route("/port", get(port))
}

/// Port that the HTTP server was configured to listen on.
async fn port(Extension(config): Extension<Arc<Config>>) -> Json<Option<u16>> {
    Json(config.server_port())
}
