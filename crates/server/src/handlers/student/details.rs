use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{student, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};
use tracing::{error, info};

use super::StudentData;

/// Errors that may occur during the student lookup.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum StudentDetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// The requested student was not found.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "student not found")]
    StudentNotFound,
}

/// Single student lookup handler.
pub(super) async fn details(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i64>,
) -> Result<Json<StudentData>, StudentDetailsError> {
    info!(student_id = id, "looking up student");

    let student = student::Entity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or_else(|| {
            error!(student_id = id, "there is no student with the requested id");
            StudentDetailsError::StudentNotFound
        })?;

    Ok(Json(student.into()))
}
