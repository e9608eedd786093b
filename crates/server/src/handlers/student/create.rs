use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_derive_error::ErrorResponse;
use db::{
    faculty, student, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QuerySelect, SelectExt,
    TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::validation::ValidatedJson;

/// Errors that may occur during the student creation.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum StudentCreateError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Provided faculty identifier doesn't exist.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "faculty not found")]
    FacultyNotFound,
}

/// JSON request body.
#[derive(Deserialize, Validate)]
pub(super) struct StudentCreateRequest {
    /// Full student name.
    #[validate(length(min = 1, max = 255))]
    name: String,

    /// Student age.
    #[validate(range(min = 0, max = 200))]
    age: i32,

    /// Faculty to attach the student to.
    #[serde(default)]
    faculty_id: Option<i64>,
}

/// Register a new student.
///
/// Responds with the identifier assigned to the created student.
pub(super) async fn create(
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<StudentCreateRequest>,
) -> Result<Json<i64>, StudentCreateError> {
    info!("adding student");

    db.transaction(|txn| {
        Box::pin(async move {
            if let Some(faculty_id) = request.faculty_id {
                let faculty_exists = faculty::Entity::find_by_id(faculty_id)
                    .select_only()
                    .exists(txn)
                    .await?;

                if !faculty_exists {
                    return Err(StudentCreateError::FacultyNotFound);
                }
            }

            let id = student::Entity::insert(student::ActiveModel {
                name: ActiveValue::Set(request.name),
                age: ActiveValue::Set(request.age),
                faculty_id: ActiveValue::Set(request.faculty_id),
                ..Default::default()
            })
            .exec(txn)
            .await?
            .last_insert_id;

            Ok(Json(id))
        })
    })
    .await
    .into_raw_result()
}
