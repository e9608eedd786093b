use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{student, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::info;

use super::StudentData;

#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum StudentFilterError {
    DatabaseError(DbErr),
}

/// Query string with an exact age to match.
#[derive(Deserialize)]
pub(super) struct AgeQuery {
    age: i32,
}

/// Query string with inclusive age bounds.
#[derive(Deserialize)]
pub(super) struct AgeRangeQuery {
    min: i32,
    max: i32,
}

/// List students of exactly the provided age.
pub(super) async fn by_age(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<AgeQuery>,
) -> Result<Json<Vec<StudentData>>, StudentFilterError> {
    info!(age = query.age, "filtering students by age");

    let students = student::Entity::find()
        .filter(student::Column::Age.eq(query.age))
        .order_by_asc(student::Column::Id)
        .all(&*db)
        .await?;

    Ok(Json(students.into_iter().map(StudentData::from).collect()))
}

/// List students whose age lies within `[min, max]`.
///
/// Bounds are not validated, `min > max` simply yields an empty list.
pub(super) async fn by_age_range(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<AgeRangeQuery>,
) -> Result<Json<Vec<StudentData>>, StudentFilterError> {
    info!(min = query.min, max = query.max, "filtering students by age range");

    let students = student::Entity::find()
        .filter(student::Column::Age.between(query.min, query.max))
        .order_by_asc(student::Column::Id)
        .all(&*db)
        .await?;

    Ok(Json(students.into_iter().map(StudentData::from).collect()))
}
