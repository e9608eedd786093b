use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_derive_error::ErrorResponse;
use db::{
    faculty, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QuerySelect,
    SelectExt, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::{error, info};
use validator::Validate;

use super::FacultyData;
use crate::validation::ValidatedJson;

/// Errors that may occur during the faculty update.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum FacultyUpdateError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// The faculty to update was not found.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "faculty not found")]
    FacultyNotFound,
}

/// JSON request body.
#[derive(Deserialize, Validate)]
pub(super) struct FacultyUpdateRequest {
    /// Identifier of the faculty to update.
    id: i64,

    /// Faculty name.
    #[validate(length(min = 1, max = 255))]
    name: String,

    /// Faculty color.
    #[validate(length(min = 1, max = 64))]
    color: String,
}

/// Replace name and color of an existing faculty.
pub(super) async fn update(
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<FacultyUpdateRequest>,
) -> Result<Json<FacultyData>, FacultyUpdateError> {
    info!(faculty_id = request.id, "updating faculty");

    db.transaction(|txn| {
        Box::pin(async move {
            let faculty_exists = faculty::Entity::find_by_id(request.id)
                .select_only()
                .exists(txn)
                .await?;

            if !faculty_exists {
                error!(faculty_id = request.id, "there is no faculty with the requested id");
                return Err(FacultyUpdateError::FacultyNotFound);
            }

            let model = faculty::ActiveModel {
                id: ActiveValue::Unchanged(request.id),
                name: ActiveValue::Set(request.name),
                color: ActiveValue::Set(request.color),
            }
            .update(txn)
            .await?;

            Ok(Json(model.into()))
        })
    })
    .await
    .into_raw_result()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{create_database, create_faculty, RequestBodyExt, ResponseBodyExt};

    use assert_json::assert_json;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use serde_json::json;
    use tower::Service;

    #[tokio::test]
    async fn replace() {
        let db = create_database().await;

        let id = create_faculty(&db, "Ravenclaw", "blue").await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

        let response = service
            .call(
                Request::builder()
                    .method("PUT")
                    .uri("/faculty")
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({
                        "id": id,
                        "name": "Ravenclaw",
                        "color": "bronze",
                    })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_json!(response.json().await, {
            "id": id,
            "name": "Ravenclaw",
            "color": "bronze"
        });

        let response = service
            .call(
                Request::builder()
                    .method("GET")
                    .uri(format!("/faculty/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_json!(response.json().await, {
            "id": id,
            "name": "Ravenclaw",
            "color": "bronze"
        });
    }

    #[tokio::test]
    async fn unknown_faculty() {
        let db = create_database().await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()))
            .call(
                Request::builder()
                    .method("PUT")
                    .uri("/faculty")
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({
                        "id": 8,
                        "name": "Durmstrang",
                        "color": "crimson",
                    })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
