use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_derive_error::ErrorResponse;
use db::{
    faculty, student, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    QuerySelect, SelectExt, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::{error, info};
use validator::Validate;

use super::StudentData;
use crate::validation::ValidatedJson;

/// Errors that may occur during the student update.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum StudentUpdateError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// The student to update was not found.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "student not found")]
    StudentNotFound,

    /// Provided faculty identifier doesn't exist.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "faculty not found")]
    FacultyNotFound,
}

/// JSON request body.
///
/// Replaces every field of an existing student.
#[derive(Deserialize, Validate)]
pub(super) struct StudentUpdateRequest {
    /// Identifier of the student to update.
    id: i64,

    /// Full student name.
    #[validate(length(min = 1, max = 255))]
    name: String,

    /// Student age.
    #[validate(range(min = 0, max = 200))]
    age: i32,

    /// Faculty to attach the student to, `null` to detach.
    #[serde(default)]
    faculty_id: Option<i64>,
}

/// Replace all information about an existing student.
pub(super) async fn update(
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<StudentUpdateRequest>,
) -> Result<Json<StudentData>, StudentUpdateError> {
    info!(student_id = request.id, "updating student");

    db.transaction(|txn| {
        Box::pin(async move {
            let student_exists = student::Entity::find_by_id(request.id)
                .select_only()
                .exists(txn)
                .await?;

            if !student_exists {
                error!(student_id = request.id, "there is no student with the requested id");
                return Err(StudentUpdateError::StudentNotFound);
            }

            if let Some(faculty_id) = request.faculty_id {
                let faculty_exists = faculty::Entity::find_by_id(faculty_id)
                    .select_only()
                    .exists(txn)
                    .await?;

                if !faculty_exists {
                    return Err(StudentUpdateError::FacultyNotFound);
                }
            }

            let model = student::ActiveModel {
                id: ActiveValue::Unchanged(request.id),
                name: ActiveValue::Set(request.name),
                age: ActiveValue::Set(request.age),
                faculty_id: ActiveValue::Set(request.faculty_id),
            }
            .update(txn)
            .await?;

            Ok(Json(model.into()))
        })
    })
    .await
    .into_raw_result()
}
