//! Schema migrations, ordered so referenced tables exist before their
//! foreign keys and the index pass runs once all tables are in place.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_category;
mod m20240101_000002_create_client;
mod m20240101_000003_create_phone;
mod m20240101_000004_create_sell;
mod m20240101_000005_create_user;
mod m20240101_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_category::Migration),
            Box::new(m20240101_000002_create_client::Migration),
            Box::new(m20240101_000003_create_phone::Migration),
            Box::new(m20240101_000004_create_sell::Migration),
            Box::new(m20240101_000005_create_user::Migration),
            // Index pass stays last
            Box::new(m20240101_000006_add_indexes::Migration),
        ]
    }
}
