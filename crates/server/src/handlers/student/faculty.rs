use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{faculty, student, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};
use tracing::{error, info};

use crate::handlers::faculty::FacultyData;

/// Errors that may occur during the student's faculty lookup.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum StudentFacultyError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// The requested student was not found.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "student not found")]
    StudentNotFound,
}

/// Faculty of a single student.
///
/// Responds with `null` if the student isn't attached to any faculty.
pub(super) async fn faculty(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i64>,
) -> Result<Json<Option<FacultyData>>, StudentFacultyError> {
    info!(student_id = id, "looking up student faculty");

    let (_, faculty) = student::Entity::find_by_id(id)
        .find_also_related(faculty::Entity)
        .one(&*db)
        .await?
        .ok_or_else(|| {
            error!(student_id = id, "there is no student with the requested id");
            StudentFacultyError::StudentNotFound
        })?;

    Ok(Json(faculty.map(FacultyData::from)))
}
