//! Registered student.

use sea_orm::entity::prelude::*;

/// Student model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    /// Unique student identifier.
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Full student name.
    pub name: String,

    /// Student age, in years.
    pub age: i32,

    /// Faculty the student belongs to, if any.
    pub faculty_id: Option<i64>,
}

/// Student model relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::faculty::Entity",
        from = "Column::FacultyId",
        to = "super::faculty::Column::Id"
    )]
    Faculty,

    #[sea_orm(has_one = "super::avatar::Entity")]
    Avatar,
}

impl Related<super::faculty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Faculty.def()
    }
}

impl Related<super::avatar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Avatar.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
