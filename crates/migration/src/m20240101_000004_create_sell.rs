//! Create `sell` table with FK to `client`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sell::Table)
                    .if_not_exists()
                    .col(pk_auto(Sell::Id))
                    .col(integer(Sell::ClientId).not_null())
                    .col(date(Sell::Date).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sell_client")
                            .from(Sell::Table, Sell::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Sell::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Sell { Table, Id, ClientId, Date }

#[derive(DeriveIden)]
enum Client { Table, Id }
