use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Avatars::Table)
                    .col(
                        ColumnDef::new(Avatars::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Avatars::StudentId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Avatars::FilePath).string().not_null())
                    .col(ColumnDef::new(Avatars::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Avatars::MediaType).string().not_null())
                    .col(ColumnDef::new(Avatars::Data).binary().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Avatars::Table, Avatars::StudentId)
                            .to(crate::Students::Table, crate::Students::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Avatars::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum Avatars {
    Table,
    Id,
    StudentId,
    FilePath,
    FileSize,
    MediaType,
    Data,
}
