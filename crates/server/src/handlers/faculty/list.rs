use std::sync::Arc;

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use db::{faculty, DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use derive_more::{Display, Error, From};
use tracing::info;

use super::FacultyData;

#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum FacultyListError {
    DatabaseError(DbErr),
}

/// List all faculties in the order they were added.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<FacultyData>>, FacultyListError> {
    info!("listing all faculties");

    let faculties = faculty::Entity::find()
        .order_by_asc(faculty::Column::Id)
        .all(&*db)
        .await?;

    Ok(Json(faculties.into_iter().map(FacultyData::from).collect()))
}
