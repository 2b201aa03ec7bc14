#![cfg(test)]
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Migrations run at most once per test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// DB-backed tests need a live `DATABASE_URL` and honor `SKIP_DB_TESTS`.
pub fn skip_db_tests() -> bool {
    let _ = dotenvy::dotenv();
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}

fn db_config() -> configs::DatabaseConfig {
    let mut cfg = configs::load_default().map(|c| c.database).unwrap_or_default();
    cfg.normalize_from_env();
    cfg
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Apply the schema once, on a connection that is dropped right after
    MIGRATED
        .get_or_init(|| async {
            let cfg = db_config();
            let db = connect_with_config(&cfg).await.expect("connect db for migration");
            if let Err(e) = migration::Migrator::up(&db, None).await {
                // Concurrent test binaries may race on the migration bookkeeping table
                assert!(
                    e.to_string().contains("duplicate key value violates unique constraint"),
                    "migrate up: {e}"
                );
            }
            drop(db);
        })
        .await;

    // Each test gets its own connection on its own runtime
    let mut cfg = db_config();
    cfg.max_connections = cfg.max_connections.max(20);
    cfg.min_connections = cfg.min_connections.min(1);
    cfg.acquire_timeout_secs = 10;
    let db = connect_with_config(&cfg).await?;
    Ok(db)
}
