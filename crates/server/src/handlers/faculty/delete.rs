use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use axum_derive_error::ErrorResponse;
use db::{
    faculty, sea_query::Expr, student, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use tracing::{error, info};

/// Errors that may occur during the faculty removal.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum FacultyDeletionError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// The faculty to remove was not found.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "faculty not found")]
    FacultyNotFound,
}

/// Remove a faculty.
///
/// Students of the removed faculty are kept and detached from it.
pub(super) async fn delete(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i64>,
) -> Result<(), FacultyDeletionError> {
    info!(faculty_id = id, "removing faculty");

    db.transaction(|txn| {
        Box::pin(async move {
            student::Entity::update_many()
                .col_expr(student::Column::FacultyId, Expr::value(Option::<i64>::None))
                .filter(student::Column::FacultyId.eq(id))
                .exec(txn)
                .await?;

            let result = faculty::Entity::delete_by_id(id).exec(txn).await?;

            if result.rows_affected == 0 {
                error!(faculty_id = id, "there is no faculty with the requested id");
                return Err(FacultyDeletionError::FacultyNotFound);
            }

            Ok(())
        })
    })
    .await
    .into_raw_result()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{create_database, create_faculty, create_student, ResponseBodyExt};

    use assert_json::{assert_json, validators};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use tower::Service;

    #[tokio::test]
    async fn delete_and_detach() {
        let db = create_database().await;

        let faculty_id = create_faculty(&db, "Gryffindor", "red").await;
        let student_id = create_student(&db, "Harry Potter", 11, Some(faculty_id)).await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

        let response = service
            .call(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/faculty/{faculty_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let response = service
            .call(
                Request::builder()
                    .method("GET")
                    .uri(format!("/faculty/{faculty_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = service
            .call(
                Request::builder()
                    .method("GET")
                    .uri(format!("/student/{student_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_json!(response.json().await, {
            "id": student_id,
            "name": "Harry Potter",
            "age": 11,
            "faculty_id": validators::null()
        });
    }

    #[tokio::test]
    async fn unknown_faculty() {
        let db = create_database().await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .call(
                Request::builder()
                    .method("DELETE")
                    .uri("/faculty/4")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
