use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{faculty, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};
use tracing::{error, info};

use super::FacultyData;

/// Errors that may occur during the faculty lookup.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum FacultyDetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// The requested faculty was not found.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "faculty not found")]
    FacultyNotFound,
}

/// Single faculty lookup handler.
pub(super) async fn details(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i64>,
) -> Result<Json<FacultyData>, FacultyDetailsError> {
    info!(faculty_id = id, "looking up faculty");

    let faculty = faculty::Entity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or_else(|| {
            error!(faculty_id = id, "there is no faculty with the requested id");
            FacultyDetailsError::FacultyNotFound
        })?;

    Ok(Json(faculty.into()))
}
