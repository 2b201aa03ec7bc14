use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Sell: index on client_id for per-client lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_sell_client")
                    .table(Sell::Table)
                    .col(Sell::ClientId)
                    .to_owned(),
            )
            .await?;

        // Sell: index on date for date range queries
        manager
            .create_index(
                Index::create()
                    .name("idx_sell_date")
                    .table(Sell::Table)
                    .col(Sell::Date)
                    .to_owned(),
            )
            .await?;

        // Phone: index on client_id
        manager
            .create_index(
                Index::create()
                    .name("idx_phone_client")
                    .table(Phone::Table)
                    .col(Phone::ClientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_sell_client").table(Sell::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_sell_date").table(Sell::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_phone_client").table(Phone::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Sell { Table, ClientId, Date }

#[derive(DeriveIden)]
enum Phone { Table, ClientId }
