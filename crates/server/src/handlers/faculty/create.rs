use std::sync::Arc;

use axum::{extract::State, Json};
use axum_derive_error::ErrorResponse;
use db::{faculty, ActiveValue, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::validation::ValidatedJson;

#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum FacultyCreateError {
    DatabaseError(DbErr),
}

/// JSON request body.
#[derive(Deserialize, Validate)]
pub(super) struct FacultyCreateRequest {
    /// Faculty name.
    #[validate(length(min = 1, max = 255))]
    name: String,

    /// Faculty color.
    #[validate(length(min = 1, max = 64))]
    color: String,
}

/// Register a new faculty.
///
/// Responds with the identifier assigned to the created faculty.
pub(super) async fn create(
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<FacultyCreateRequest>,
) -> Result<Json<i64>, FacultyCreateError> {
    info!(name = %request.name, "adding faculty");

    let id = faculty::Entity::insert(faculty::ActiveModel {
        name: ActiveValue::Set(request.name),
        color: ActiveValue::Set(request.color),
        ..Default::default()
    })
    .exec(&*db)
    .await?
    .last_insert_id;

    Ok(Json(id))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{create_database, RequestBodyExt, ResponseBodyExt};

    use assert_json::assert_json;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use serde_json::json;
    use tower::Service;

    #[tokio::test]
    async fn create_and_find() {
        let db = create_database().await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

        let response = service
            .call(
                Request::builder()
                    .method("POST")
                    .uri("/faculty")
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({
                        "name": "Gryffindor",
                        "color": "red",
                    })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await, "1");

        let response = service
            .call(
                Request::builder()
                    .method("GET")
                    .uri("/faculty/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_json!(response.json().await, {
            "id": 1,
            "name": "Gryffindor",
            "color": "red"
        });
    }

    #[tokio::test]
    async fn invalid_body() {
        let db = create_database().await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

        let response = service
            .call(
                Request::builder()
                    .method("POST")
                    .uri("/faculty")
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({
                        "name": "Gryffindor",
                        "color": "",
                    })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = service
            .call(
                Request::builder()
                    .method("POST")
                    .uri("/faculty")
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({
                        "name": "Gryffindor",
                    })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
