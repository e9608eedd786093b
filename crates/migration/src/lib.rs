pub use sea_orm_migration::prelude::*;

mod m20230901_000001_create_faculties_table;
mod m20230901_000002_create_students_table;
mod m20230901_000003_create_avatars_table;

pub(crate) use m20230901_000001_create_faculties_table::Faculties;
pub(crate) use m20230901_000002_create_students_table::Students;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230901_000001_create_faculties_table::Migration),
            Box::new(m20230901_000002_create_students_table::Migration),
            Box::new(m20230901_000003_create_avatars_table::Migration),
        ]
    }
}
