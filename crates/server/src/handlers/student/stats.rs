use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_derive_error::ErrorResponse;
use common::aggregate::{self, AgeAccumulator};
use db::{
    sea_query::Expr, student, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect,
};
use derive_more::{Display, Error, From};
use futures_util::TryStreamExt;
use serde::Deserialize;
use tracing::info;

use super::StudentData;

/// Default count of students returned by the [`last`] handler.
const DEFAULT_LAST_COUNT: u64 = 5;

/// Max count of students returned by the [`last`] handler.
const MAX_LAST_COUNT: u64 = 100;

#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum StudentStatsError {
    DatabaseError(DbErr),
}

/// Query string for the [`last`] handler.
#[derive(Deserialize)]
pub(super) struct LastQuery {
    #[serde(default)]
    count: Option<u64>,
}

/// Query string for the [`starts_with`] handler.
#[derive(Deserialize)]
pub(super) struct PrefixQuery {
    #[serde(default = "default_prefix")]
    prefix: String,
}

fn default_prefix() -> String {
    String::from("A")
}

/// Total count of registered students.
pub(super) async fn count(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<u64>, StudentStatsError> {
    info!("counting students");

    let count = student::Entity::find().count(&*db).await?;

    Ok(Json(count))
}

/// Average student age computed by the database.
pub(super) async fn average_age(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<i32>, StudentStatsError> {
    info!("computing average student age");

    let (sum, count) = student::Entity::find()
        .select_only()
        .column_as(Expr::col(student::Column::Age).sum(), "sum")
        .column_as(Expr::col(student::Column::Id).count(), "count")
        .into_tuple::<(Option<i64>, i64)>()
        .one(&*db)
        .await?
        .unwrap_or_default();

    Ok(Json(aggregate::average_from_totals(
        sum.unwrap_or_default(),
        count,
    )))
}

/// Average student age computed by streaming every student age.
pub(super) async fn stream_average_age(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<i32>, StudentStatsError> {
    info!("computing average student age from the student stream");

    let accumulator = student::Entity::find()
        .select_only()
        .column(student::Column::Age)
        .into_tuple::<i32>()
        .stream(&*db)
        .await?
        .try_fold(AgeAccumulator::default(), |acc, age| async move {
            Ok(acc.push(age))
        })
        .await?;

    Ok(Json(accumulator.average()))
}

/// Most recently added students, newest first.
pub(super) async fn last(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<LastQuery>,
) -> Result<Json<Vec<StudentData>>, StudentStatsError> {
    let count = query
        .count
        .unwrap_or(DEFAULT_LAST_COUNT)
        .min(MAX_LAST_COUNT);

    info!(count, "listing the last added students");

    let students = student::Entity::find()
        .order_by_desc(student::Column::Id)
        .limit(count)
        .all(&*db)
        .await?;

    Ok(Json(students.into_iter().map(StudentData::from).collect()))
}

/// Upper-cased, sorted names of students whose name starts with the prefix.
///
/// The prefix is matched case-sensitively and defaults to `A`.
pub(super) async fn starts_with(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<PrefixQuery>,
) -> Result<Json<Vec<String>>, StudentStatsError> {
    info!(prefix = %query.prefix, "listing student names by prefix");

    let names = student::Entity::find()
        .select_only()
        .column(student::Column::Name)
        .into_tuple::<String>()
        .all(&*db)
        .await?;

    Ok(Json(aggregate::names_starting_with(names, &query.prefix)))
}
