use std::{io, path::Path as FsPath, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use axum_derive_error::ErrorResponse;
use common::{config::Config, storage::AvatarStorage};
use db::{
    avatar, student, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use tracing::{error, info};

/// Errors that may occur during the student removal.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum StudentDeletionError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Avatar file removal error.
    IoError(io::Error),

    /// The student to remove was not found.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "student not found")]
    StudentNotFound,
}

/// Remove a student.
///
/// The avatar row is removed in the same transaction as the student,
/// the avatar file is removed once the transaction is committed.
pub(super) async fn delete(
    Extension(config): Extension<Arc<Config>>,
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i64>,
) -> Result<(), StudentDeletionError> {
    info!(student_id = id, "removing student");

    let avatar_path = db
        .transaction(|txn| {
            Box::pin(async move {
                let avatar_path = avatar::Entity::find()
                    .select_only()
                    .column(avatar::Column::FilePath)
                    .filter(avatar::Column::StudentId.eq(id))
                    .into_tuple::<String>()
                    .one(txn)
                    .await?;

                avatar::Entity::delete_many()
                    .filter(avatar::Column::StudentId.eq(id))
                    .exec(txn)
                    .await?;

                let result = student::Entity::delete_by_id(id).exec(txn).await?;

                if result.rows_affected == 0 {
                    error!(student_id = id, "there is no student with the requested id");
                    return Err(StudentDeletionError::StudentNotFound);
                }

                Ok(avatar_path)
            })
        })
        .await
        .into_raw_result()?;

    if let Some(path) = avatar_path {
        AvatarStorage::new(&config.storage)
            .remove(FsPath::new(&path))
            .await?;
    }

    Ok(())
}
