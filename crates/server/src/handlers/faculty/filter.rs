use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{
    faculty,
    sea_query::{Expr, Func},
    Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::info;

use super::FacultyData;

#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum FacultyFilterError {
    DatabaseError(DbErr),
}

/// Query string with optional name and color to match.
#[derive(Deserialize)]
pub(super) struct NameOrColorQuery {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    color: Option<String>,
}

/// List faculties that match either the provided name or the provided color.
///
/// Both values are compared case-insensitively. Responds with an empty
/// list if neither of them was provided.
pub(super) async fn by_name_or_color(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<NameOrColorQuery>,
) -> Result<Json<Vec<FacultyData>>, FacultyFilterError> {
    info!(name = ?query.name, color = ?query.color, "filtering faculties by name or color");

    if query.name.is_none() && query.color.is_none() {
        return Ok(Json(Vec::new()));
    }

    // Both sides are folded by the database. PostgreSQL `LOWER()` folds any
    // letter, SQLite only folds ASCII, so there non-ASCII values match with
    // the exact case only.
    let condition = Condition::any()
        .add_option(query.name.map(|name| {
            Expr::expr(Func::lower(Expr::col(faculty::Column::Name)))
                .eq(Func::lower(Expr::val(name)))
        }))
        .add_option(query.color.map(|color| {
            Expr::expr(Func::lower(Expr::col(faculty::Column::Color)))
                .eq(Func::lower(Expr::val(color)))
        }));

    let faculties = faculty::Entity::find()
        .filter(condition)
        .order_by_asc(faculty::Column::Id)
        .all(&*db)
        .await?;

    Ok(Json(faculties.into_iter().map(FacultyData::from).collect()))
}
