/// Avatar removal route.
mod delete;

/// Avatar download routes.
mod download;

/// Paginated avatar list route.
mod list;

/// Avatar upload route.
mod upload;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get},
    Router,
};
use common::config;
use db::{avatar, DatabaseConnection};
use serde::Serialize;

/// Room left in the request body for multipart boundaries and headers.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Create a router that provides an API server with avatar management routes.
///
/// Request bodies are limited according to the configured avatar size limit,
/// so that oversized files are rejected by the upload handler itself.
pub(crate) fn routes(storage: &config::Storage) -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/", get(list::list))
        .route(
            "/:student_id/avatar",
            get(download::download).post(upload::upload),
        )
        .route("/:student_id/avatar/preview", get(download::preview))
        .route("/:student_id", delete(delete::delete))
        .layer(DefaultBodyLimit::max(
            storage.avatar_size_limit.saturating_add(MULTIPART_OVERHEAD),
        ))
}

/// Avatar metadata, without the file contents.
#[derive(Serialize)]
pub(crate) struct AvatarData {
    /// Avatar identifier.
    pub id: i64,

    /// Owning student identifier.
    pub student_id: i64,

    /// Path of the stored avatar file.
    pub file_path: String,

    /// Avatar file size, in bytes.
    pub file_size: i64,

    /// Avatar media type.
    pub media_type: String,
}

impl From<avatar::AvatarInfo> for AvatarData {
    fn from(info: avatar::AvatarInfo) -> Self {
        Self {
            id: info.id,
            student_id: info.student_id,
            file_path: info.file_path,
            file_size: info.file_size,
            media_type: info.media_type,
        }
    }
}
