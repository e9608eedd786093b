use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_derive_error::ErrorResponse;
use db::{avatar, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};
use derive_more::{Display, Error, From};
use tracing::info;

use super::AvatarData;
use crate::pagination::Pagination;

#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum AvatarListError {
    DatabaseError(DbErr),
}

/// List avatar metadata page by page.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<AvatarData>>, AvatarListError> {
    info!(
        limit = pagination.limit(),
        offset = pagination.offset(),
        "listing avatars"
    );

    let avatars = avatar::Entity::find()
        .select_only()
        .columns([
            avatar::Column::Id,
            avatar::Column::StudentId,
            avatar::Column::FilePath,
            avatar::Column::FileSize,
            avatar::Column::MediaType,
        ])
        .order_by_asc(avatar::Column::Id)
        .limit(pagination.limit())
        .offset(pagination.offset())
        .into_model::<avatar::AvatarInfo>()
        .all(&*db)
        .await?;

    Ok(Json(avatars.into_iter().map(AvatarData::from).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{create_database, create_student, ResponseBodyExt};

    use assert_json::assert_json;
    use axum::{body::Body, http::Request};
    use common::config::Config;
    use db::{avatar, ActiveValue, DatabaseConnection, EntityTrait};
    use tower::Service;

    async fn create_test_env(db: &DatabaseConnection) {
        for name in ["Harry Potter", "Ron Weasley", "Hermione Granger"] {
            let student_id = create_student(db, name, 11, None).await;

            avatar::Entity::insert(avatar::ActiveModel {
                student_id: ActiveValue::Set(student_id),
                file_path: ActiveValue::Set(format!("avatars/{student_id}.jpg")),
                file_size: ActiveValue::Set(3),
                media_type: ActiveValue::Set(String::from("image/jpeg")),
                data: ActiveValue::Set(vec![1, 2, 3]),
                ..Default::default()
            })
            .exec_without_returning(db)
            .await
            .expect("unable to create avatar");
        }
    }

    #[tokio::test]
    async fn paginated() {
        let db = create_database().await;

        create_test_env(&db).await;

        let mut service = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()));

        let response = service
            .call(
                Request::builder()
                    .method("GET")
                    .uri("/avatar?page=2&size=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_json!(response.json().await, [
            {
                "id": 3,
                "student_id": 3,
                "file_path": "avatars/3.jpg",
                "file_size": 3,
                "media_type": "image/jpeg"
            }
        ]);

        let response = service
            .call(
                Request::builder()
                    .method("GET")
                    .uri("/avatar?page=1&size=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_json!(response.json().await, [
            {
                "id": 1,
                "student_id": 1,
                "file_path": "avatars/1.jpg",
                "file_size": 3,
                "media_type": "image/jpeg"
            },
            {
                "id": 2,
                "student_id": 2,
                "file_path": "avatars/2.jpg",
                "file_size": 3,
                "media_type": "image/jpeg"
            }
        ]);

        let response = service
            .call(
                Request::builder()
                    .method("GET")
                    .uri("/avatar?page=7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_json!(response.json().await, []);
    }
}
