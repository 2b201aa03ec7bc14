use std::{env, net::SocketAddr};

use axum::Router;
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Bind address: config file first, then SERVER_HOST/SERVER_PORT.
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => (cfg.server.host, cfg.server.port),
        Err(_) => (
            env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()).unwrap_or(8080),
        ),
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Connect to PostgreSQL, preferring the validated config when one loads.
async fn connect_db() -> anyhow::Result<sea_orm::DatabaseConnection> {
    match configs::load_default() {
        Ok(cfg) => {
            let mut dbc = cfg.database;
            dbc.normalize_from_env();
            Ok(models::db::connect_with_config(&dbc).await?)
        }
        Err(_) => Ok(models::db::connect().await?),
    }
}

/// Public entry: connect, migrate, and serve the REST API.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_from_env();

    let db = connect_db().await?;

    // Schema is applied on boot so a fresh database serves immediately
    Migrator::up(&db, None).await?;
    info!("database schema up to date");

    let jwt_secret =
        std::env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string());
    let state = auth::ServerState { db, auth: auth::ServerAuthConfig { jwt_secret } };

    let app: Router = routes::build_router(build_cors(), state);

    let addr = load_bind_addr()?;
    info!(%addr, "starting boutique server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
