//! Create `phone` table with FK to `client`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Phone::Table)
                    .if_not_exists()
                    .col(pk_auto(Phone::Id))
                    .col(string_len(Phone::Number, 32).not_null())
                    .col(integer(Phone::ClientId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_phone_client")
                            .from(Phone::Table, Phone::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Phone::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Phone { Table, Id, Number, ClientId }

#[derive(DeriveIden)]
enum Client { Table, Id }
