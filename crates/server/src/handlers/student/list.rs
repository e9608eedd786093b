use std::sync::Arc;

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use db::{student, DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use derive_more::{Display, Error, From};
use tracing::info;

use super::StudentData;

#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum StudentListError {
    DatabaseError(DbErr),
}

/// List all registered students in the order they were added.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<StudentData>>, StudentListError> {
    info!("listing all students");

    let students = student::Entity::find()
        .order_by_asc(student::Column::Id)
        .all(&*db)
        .await?;

    Ok(Json(students.into_iter().map(StudentData::from).collect()))
}
