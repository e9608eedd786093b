/// Faculty creation route.
mod create;

/// Faculty removal route.
mod delete;

/// Single faculty lookup route.
mod details;

/// Name and color based faculty filtering route.
mod filter;

/// Faculty list route.
mod list;

/// Faculty statistics routes.
mod stats;

/// Faculty's students lookup route.
mod students;

/// Faculty update route.
mod update;

use std::sync::Arc;

use axum::{routing::get, Router};
use db::{faculty, DatabaseConnection};
use serde::Serialize;

/// Create a router that provides an API server with faculty management routes.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route(
            "/",
            get(list::list).post(create::create).put(update::update),
        )
        .route("/:id", get(details::details).delete(delete::delete))
        .route("/:id/student", get(students::students))
        .route("/by-name-or-color", get(filter::by_name_or_color))
        .route("/longest-name", get(stats::longest_name))
        .route("/sum", get(stats::sum))
}

/// A single faculty data.
#[derive(Serialize)]
pub(crate) struct FacultyData {
    /// Faculty identifier.
    pub id: i64,

    /// Faculty name.
    pub name: String,

    /// Faculty color.
    pub color: String,
}

impl From<faculty::Model> for FacultyData {
    fn from(model: faculty::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            color: model.color,
        }
    }
}
