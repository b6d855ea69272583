use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sites::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sites::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Sites::Name).string().not_null())
                    .col(ColumnDef::new(Sites::Location).string().not_null().default(""))
                    .col(ColumnDef::new(Sites::Timezone).string().not_null().default(""))
                    .col(ColumnDef::new(Sites::Status).string_len(16).not_null().default("active"))
                    .col(ColumnDef::new(Sites::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Sites::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sites_created_at")
                    .table(Sites::Table)
                    .col(Sites::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sites::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Sites {
    Table,
    Id,
    Name,
    Location,
    Timezone,
    Status,
    CreatedAt,
    UpdatedAt,
}
