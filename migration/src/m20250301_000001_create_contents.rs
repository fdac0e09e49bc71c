use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contents::Table)
                    .if_not_exists()
                    .col(pk_auto(Contents::Id))
                    .col(string_len(Contents::Kind, 10))
                    .col(string(Contents::Title))
                    .col(text_null(Contents::PosterUrl))
                    .col(string_null(Contents::ReleaseDate))
                    .col(string_null(Contents::Genre))
                    .col(string_null(Contents::Author))
                    .col(string_null(Contents::Publisher))
                    .col(text_null(Contents::Description))
                    .col(string_null(Contents::ExternalId))
                    .col(big_integer(Contents::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contents_created_at")
                    .table(Contents::Table)
                    .col(Contents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contents_kind")
                    .table(Contents::Table)
                    .col(Contents::Kind)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contents::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Contents {
    Table,
    Id,
    Kind,
    Title,
    PosterUrl,
    ReleaseDate,
    Genre,
    Author,
    Publisher,
    Description,
    ExternalId,
    CreatedAt,
}
