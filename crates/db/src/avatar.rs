//! Student avatar metadata.
//!
//! Each student has at most one avatar. The image itself is stored
//! on disk at [`Model::file_path`], with a mirrored copy of its contents
//! kept in [`Model::data`] so that small previews can be served without
//! touching the filesystem.

use sea_orm::{entity::prelude::*, FromQueryResult};

/// Avatar model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "avatars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Owning student identifier, unique across all avatars.
    pub student_id: i64,

    /// Path of the stored avatar file.
    pub file_path: String,

    /// Avatar file size, in bytes.
    pub file_size: i64,

    /// Avatar media type, e.g. `image/jpeg`.
    pub media_type: String,

    /// Copy of the avatar file contents.
    pub data: Vec<u8>,
}

/// Avatar model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Avatar metadata without the mirrored file contents.
#[derive(FromQueryResult)]
pub struct AvatarInfo {
    pub id: i64,
    pub student_id: i64,
    pub file_path: String,
    pub file_size: i64,
    pub media_type: String,
}
