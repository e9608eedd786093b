use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{faculty, student, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryOrder};
use derive_more::{Display, Error, From};
use tracing::{error, info};

use crate::handlers::student::StudentData;

/// Errors that may occur during the faculty's students lookup.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum FacultyStudentsError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// The requested faculty was not found.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "faculty not found")]
    FacultyNotFound,
}

/// List students attached to a single faculty.
pub(super) async fn students(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<StudentData>>, FacultyStudentsError> {
    info!(faculty_id = id, "listing faculty students");

    let faculty = faculty::Entity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or_else(|| {
            error!(faculty_id = id, "there is no faculty with the requested id");
            FacultyStudentsError::FacultyNotFound
        })?;

    let students = faculty
        .find_related(student::Entity)
        .order_by_asc(student::Column::Id)
        .all(&*db)
        .await?;

    Ok(Json(students.into_iter().map(StudentData::from).collect()))
}
