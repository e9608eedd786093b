/// Student creation route.
mod create;

/// Student removal route.
mod delete;

/// Single student lookup route.
mod details;

/// Student's faculty lookup route.
mod faculty;

/// Age-based student filtering routes.
mod filter;

/// Student list route.
mod list;

/// Background name printing routes.
mod print;

/// Student statistics routes.
mod stats;

/// Student update route.
mod update;

use std::sync::Arc;

use axum::{routing::get, Router};
use db::{student, DatabaseConnection};
use serde::Serialize;

/// Create a router that provides an API server with student management routes.
pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route(
            "/",
            get(list::list).post(create::create).put(update::update),
        )
        .route("/:id", get(details::details).delete(delete::delete))
        .route("/:id/faculty", get(faculty::faculty))
        .route("/by-age", get(filter::by_age))
        .route("/by-age-range", get(filter::by_age_range))
        .route("/count", get(stats::count))
        .route("/average-age", get(stats::average_age))
        .route("/stream-average-age", get(stats::stream_average_age))
        .route("/last", get(stats::last))
        .route("/starts-with-a", get(stats::starts_with))
        .route("/students/print-parallel", get(print::print_parallel))
        .route("/students/print-synchronized", get(print::print_synchronized))
}

/// A single student data.
#[derive(Serialize)]
pub(crate) struct StudentData {
    /// Student identifier.
    pub id: i64,

    /// Full student name.
    pub name: String,

    /// Student age.
    pub age: i32,

    /// Related faculty identifier.
    pub faculty_id: Option<i64>,
}

impl From<student::Model> for StudentData {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            age: model.age,
            faculty_id: model.faculty_id,
        }
    }
}
