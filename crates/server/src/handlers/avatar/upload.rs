use std::{
    io,
    path::{Path as FsPath, PathBuf},
    sync::Arc,
};

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Extension,
};
use axum_derive_error::ErrorResponse;
use common::{config::Config, storage::AvatarStorage};
use db::{
    avatar, sea_query::OnConflict, student, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QuerySelect, SelectExt,
};
use derive_more::{Display, Error, From};
use tracing::{debug, error, info};

/// Name of the multipart field that carries the avatar file.
const AVATAR_FIELD: &str = "avatar";

/// Media type used when the upload doesn't declare one.
const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// Errors that may occur during the avatar upload.
#[derive(ErrorResponse, Display, From, Error)]
pub(super) enum AvatarUploadError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Unable to parse the multipart request.
    #[status(StatusCode::BAD_REQUEST)]
    MultipartError(MultipartError),

    /// Avatar file write error.
    IoError(io::Error),

    /// Uploaded file exceeds the configured size limit.
    #[status(StatusCode::BAD_REQUEST)]
    #[display(
        fmt = "illegal size of avatar file: {}, it must be no longer than {}",
        _0,
        _1
    )]
    #[from(ignore)]
    AvatarTooLarge(#[error(ignore)] usize, #[error(ignore)] usize),

    /// The avatar owner was not found.
    #[status(StatusCode::NOT_FOUND)]
    #[display(fmt = "student not found")]
    StudentNotFound,

    #[status(StatusCode::UNPROCESSABLE_ENTITY)]
    #[display(fmt = "no file upload was found")]
    NoFileUpload,

    #[status(StatusCode::UNPROCESSABLE_ENTITY)]
    #[display(fmt = "uploaded file has no name")]
    MissingFileName,

    #[status(StatusCode::UNPROCESSABLE_ENTITY)]
    #[display(fmt = "uploaded file name has no valid extension")]
    InvalidFileName,
}

/// Uploaded avatar file.
struct AvatarUpload {
    file_name: Option<String>,
    media_type: Option<String>,
    contents: Vec<u8>,
}

/// Upload a new avatar for a student, replacing the previous one.
///
/// The file is stored as `<student_id>.<extension>` inside the configured
/// avatars directory, with its metadata and a copy of its contents
/// written to the database.
pub(super) async fn upload(
    Extension(config): Extension<Arc<Config>>,
    State(db): State<Arc<DatabaseConnection>>,
    Path(student_id): Path<i64>,
    mut data: Multipart,
) -> Result<(), AvatarUploadError> {
    let limit = config.storage.avatar_size_limit;
    let mut upload = None;

    while let Some(mut field) = data.next_field().await? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(String::from);
        let media_type = field.content_type().map(String::from);
        let mut contents = Vec::new();

        // Stop reading as soon as the limit is exceeded, the rest of
        // the upload is never buffered.
        while let Some(chunk) = field.chunk().await? {
            let size = contents.len() + chunk.len();

            if size > limit {
                error!(student_id, size, limit, "avatar file is too large");
                return Err(AvatarUploadError::AvatarTooLarge(size, limit));
            }

            contents.extend_from_slice(&chunk);
        }

        upload = Some(AvatarUpload {
            file_name,
            media_type,
            contents,
        });

        break;
    }

    let upload = upload.ok_or(AvatarUploadError::NoFileUpload)?;
    let size = upload.contents.len();

    info!(student_id, size, "uploading avatar");

    let student_exists = student::Entity::find_by_id(student_id)
        .select_only()
        .exists(&*db)
        .await?;

    if !student_exists {
        error!(student_id, "there is no student with the requested id");
        return Err(AvatarUploadError::StudentNotFound);
    }

    let file_name = upload
        .file_name
        .ok_or(AvatarUploadError::MissingFileName)?;

    let storage = AvatarStorage::new(&config.storage);
    let path = storage
        .path_for(student_id, &file_name)
        .ok_or(AvatarUploadError::InvalidFileName)?;

    let previous_path = avatar::Entity::find()
        .select_only()
        .column(avatar::Column::FilePath)
        .filter(avatar::Column::StudentId.eq(student_id))
        .into_tuple::<String>()
        .one(&*db)
        .await?;

    storage.write(&path, &upload.contents).await?;

    avatar::Entity::insert(avatar::ActiveModel {
        student_id: ActiveValue::Set(student_id),
        file_path: ActiveValue::Set(path_to_string(&path)),
        file_size: ActiveValue::Set(size as i64),
        media_type: ActiveValue::Set(
            upload
                .media_type
                .unwrap_or_else(|| String::from(DEFAULT_MEDIA_TYPE)),
        ),
        data: ActiveValue::Set(upload.contents),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::column(avatar::Column::StudentId)
            .update_columns([
                avatar::Column::FilePath,
                avatar::Column::FileSize,
                avatar::Column::MediaType,
                avatar::Column::Data,
            ])
            .to_owned(),
    )
    .exec_without_returning(&*db)
    .await?;

    // The previous file under another extension is removed only once the
    // row points to the new one, a failed write keeps the old avatar intact.
    if let Some(previous_path) = previous_path.map(PathBuf::from) {
        if previous_path != path {
            debug!(student_id, path = %previous_path.display(), "removing previous avatar file");
            storage.remove(&previous_path).await?;
        }
    }

    Ok(())
}

fn path_to_string(path: &FsPath) -> String {
    path.to_string_lossy().into_owned()
}
