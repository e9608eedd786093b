use std::{io, path::PathBuf, sync::Arc};

use axum::{
    body::StreamBody,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension,
};
use axum_derive_error::ErrorResponse;
use common::{
    config::Config,
    storage::{self, AvatarStorage},
};
use db::{avatar, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect};
use derive_more::{Display, Error, From};
use tokio_util::io::ReaderStream;
use tracing::{error, info};

/// Errors that may occur during the avatar download.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum AvatarDownloadError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Avatar file read error.
    IoError(io::Error),

    /// Either the avatar metadata or the avatar file doesn't exist.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "avatar not found")]
    AvatarNotFound,
}

/// Stream the stored avatar file as an attachment.
pub(super) async fn download(
    Extension(config): Extension<Arc<Config>>,
    State(db): State<Arc<DatabaseConnection>>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, AvatarDownloadError> {
    info!(student_id, "downloading avatar");

    let (file_path, file_size, media_type) = avatar::Entity::find()
        .select_only()
        .columns([
            avatar::Column::FilePath,
            avatar::Column::FileSize,
            avatar::Column::MediaType,
        ])
        .filter(avatar::Column::StudentId.eq(student_id))
        .into_tuple::<(String, i64, String)>()
        .one(&*db)
        .await?
        .ok_or_else(|| {
            error!(student_id, "there is no avatar for the requested student");
            AvatarDownloadError::AvatarNotFound
        })?;

    let path = PathBuf::from(file_path);

    let file = AvatarStorage::new(&config.storage)
        .open(&path)
        .await?
        .ok_or_else(|| {
            error!(student_id, path = %path.display(), "avatar file is missing");
            AvatarDownloadError::AvatarNotFound
        })?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        storage::file_name(&path).unwrap_or_default()
    );

    let headers = [
        (header::CONTENT_TYPE, media_type),
        (header::CONTENT_LENGTH, file_size.to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, StreamBody::new(ReaderStream::new(file))))
}

/// Serve the avatar contents mirrored in the database.
pub(super) async fn preview(
    State(db): State<Arc<DatabaseConnection>>,
    Path(student_id): Path<i64>,
) -> Result<impl IntoResponse, AvatarDownloadError> {
    info!(student_id, "previewing avatar");

    let avatar = avatar::Entity::find()
        .filter(avatar::Column::StudentId.eq(student_id))
        .one(&*db)
        .await?
        .ok_or_else(|| {
            error!(student_id, "there is no avatar for the requested student");
            AvatarDownloadError::AvatarNotFound
        })?;

    let headers = [
        (header::CONTENT_TYPE, avatar.media_type),
        (header::CONTENT_LENGTH, avatar.data.len().to_string()),
    ];

    Ok((headers, avatar.data))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::testing::{create_config, create_database, create_student, ResponseBodyExt};

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use db::{avatar, ActiveValue, DatabaseConnection, EntityTrait};
    use tempfile::TempDir;
    use tower::Service;

    async fn create_test_env(db: &DatabaseConnection, avatars: &TempDir) -> i64 {
        let student_id = create_student(db, "Hermione Granger", 12, None).await;

        let path = avatars.path().join(format!("{student_id}.png"));
        std::fs::write(&path, b"on disk").unwrap();

        avatar::Entity::insert(avatar::ActiveModel {
            student_id: ActiveValue::Set(student_id),
            file_path: ActiveValue::Set(path.to_string_lossy().into_owned()),
            file_size: ActiveValue::Set(7),
            media_type: ActiveValue::Set(String::from("image/png")),
            data: ActiveValue::Set(b"mirrored".to_vec()),
            ..Default::default()
        })
        .exec_without_returning(db)
        .await
        .expect("unable to create avatar");

        student_id
    }

    #[tokio::test]
    async fn download_file() {
        let db = create_database().await;
        let avatars = TempDir::new().unwrap();

        let student_id = create_test_env(&db, &avatars).await;

        let response = crate::app_router(Arc::new(db), create_config(&avatars))
            .call(
                Request::builder()
                    .method("GET")
                    .uri(format!("/avatar/{student_id}/avatar"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "7");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            format!("attachment; filename=\"{student_id}.png\"").as_str()
        );
        assert_eq!(&response.bytes().await[..], b"on disk");
    }

    #[tokio::test]
    async fn preview_mirrored_contents() {
        let db = create_database().await;
        let avatars = TempDir::new().unwrap();

        let student_id = create_test_env(&db, &avatars).await;

        let response = crate::app_router(Arc::new(db), create_config(&avatars))
            .call(
                Request::builder()
                    .method("GET")
                    .uri(format!("/avatar/{student_id}/avatar/preview"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(&response.bytes().await[..], b"mirrored");
    }

    #[tokio::test]
    async fn missing_file() {
        let db = create_database().await;
        let avatars = TempDir::new().unwrap();

        let student_id = create_test_env(&db, &avatars).await;
        std::fs::remove_file(avatars.path().join(format!("{student_id}.png"))).unwrap();

        let response = crate::app_router(Arc::new(db), create_config(&avatars))
            .call(
                Request::builder()
                    .method("GET")
                    .uri(format!("/avatar/{student_id}/avatar"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_avatar() {
        let db = create_database().await;
        let avatars = TempDir::new().unwrap();

        let mut service = crate::app_router(Arc::new(db), create_config(&avatars));

        for uri in ["/avatar/3/avatar", "/avatar/3/avatar/preview"] {
            let response = service
                .call(
                    Request::builder()
                        .method("GET")
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }
}
