/// Database connection and configuration tests
pub mod db_tests;

/// CRUD operations tests for all entities
pub mod crud_tests;


use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Migrations run once per test process, however many tests ask for a connection
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// DB-backed tests need a live DATABASE_URL and honor SKIP_DB_TESTS.
pub(crate) fn skip_db_tests() -> bool {
    let _ = dotenvy::dotenv();
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}

/// Connect and make sure the schema is in place.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let db = crate::db::connect().await?;
    MIGRATED
        .get_or_init(|| async {
            if let Err(e) = migration::Migrator::up(&db, None).await {
                // Concurrent test binaries may race on the migration bookkeeping table
                assert!(
                    e.to_string().contains("duplicate key value violates unique constraint"),
                    "migrate up: {e}"
                );
            }
        })
        .await;
    Ok(db)
}
