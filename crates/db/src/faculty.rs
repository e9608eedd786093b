//! School faculty.
//!
//! Faculties don't store their students directly, the association lives
//! on the student side and is resolved via reverse lookup.

use sea_orm::entity::prelude::*;

/// Faculty model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "faculties")]
pub struct Model {
    /// Unique faculty identifier.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Faculty name.
    pub name: String,

    /// Faculty color.
    pub color: String,
}

/// Faculty model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student::Entity")]
    Students,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
