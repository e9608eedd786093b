use std::{io, path::Path as FsPath, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use axum_derive_error::ErrorResponse;
use common::{config::Config, storage::AvatarStorage};
use db::{avatar, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect};
use derive_more::{Display, Error, From};
use tracing::{error, info, warn};

/// Errors that may occur during the avatar removal.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum AvatarDeletionError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Avatar file removal error.
    IoError(io::Error),

    /// The student has no avatar.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "avatar not found")]
    AvatarNotFound,
}

/// Remove both the avatar file and its metadata.
pub(super) async fn delete(
    Extension(config): Extension<Arc<Config>>,
    State(db): State<Arc<DatabaseConnection>>,
    Path(student_id): Path<i64>,
) -> Result<(), AvatarDeletionError> {
    info!(student_id, "removing avatar");

    let (id, file_path) = avatar::Entity::find()
        .select_only()
        .columns([avatar::Column::Id, avatar::Column::FilePath])
        .filter(avatar::Column::StudentId.eq(student_id))
        .into_tuple::<(i64, String)>()
        .one(&*db)
        .await?
        .ok_or_else(|| {
            error!(student_id, "there is no avatar for the requested student");
            AvatarDeletionError::AvatarNotFound
        })?;

    let removed = AvatarStorage::new(&config.storage)
        .remove(FsPath::new(&file_path))
        .await?;

    if !removed {
        warn!(student_id, path = %file_path, "avatar file was already missing");
    }

    avatar::Entity::delete_by_id(id).exec(&*db).await?;

    Ok(())
}
