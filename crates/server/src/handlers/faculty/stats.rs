use std::sync::Arc;

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use common::aggregate;
use db::{faculty, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};
use derive_more::{Display, Error, From};
use tokio::task::JoinError;
use tracing::info;

/// Upper bound of the summed integer range.
const SUM_UPPER_BOUND: i32 = 1_000_000;

#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum FacultyStatsError {
    DatabaseError(DbErr),
    TaskError(JoinError),
}

/// Name of the faculty with the longest name.
///
/// Responds with an empty string if there are no faculties.
pub(super) async fn longest_name(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<String, FacultyStatsError> {
    info!("looking up the longest faculty name");

    let names = faculty::Entity::find()
        .select_only()
        .column(faculty::Column::Name)
        .order_by_asc(faculty::Column::Id)
        .into_tuple::<String>()
        .all(&*db)
        .await?;

    Ok(aggregate::longest_name(names))
}

/// Sum of all integers from one to a million, wrapped to 32 bits.
pub(super) async fn sum() -> Result<Json<i32>, FacultyStatsError> {
    info!(upper_bound = SUM_UPPER_BOUND, "computing range sum");

    let sum = tokio::task::spawn_blocking(|| aggregate::range_sum(SUM_UPPER_BOUND)).await?;

    Ok(Json(sum))
}
