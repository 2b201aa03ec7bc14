use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod auth;
pub mod category;
pub mod client;
pub mod phone;
pub mod sell;
pub mod user;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health",
    responses((status = 200, description = "OK"))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router. Category reads require any
/// authenticated user and category mutations require ADMIN; the remaining
/// resources are open, matching the store's deployment behind a trusted
/// front.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me));

    let clients = Router::new()
        .route("/client", get(client::list).post(client::create))
        .route(
            "/client/:id",
            get(client::get).put(client::update).delete(client::delete),
        )
        .route("/client/name/:name", get(client::by_name));

    let phones = Router::new()
        .route("/phone", get(phone::list).post(phone::create))
        .route(
            "/phone/:id",
            get(phone::get).put(phone::update).delete(phone::delete),
        )
        .route("/phone/number/:number", get(phone::by_number))
        .route("/phone/client/:client_id", get(phone::by_client));

    let sells = Router::new()
        .route("/sell", get(sell::list).post(sell::create))
        .route("/sell/:id", get(sell::get).put(sell::update).delete(sell::delete))
        .route("/sell/client/:client_id", get(sell::by_client))
        .route("/sell/date/:date", get(sell::by_date))
        .route("/sell/date/:start/:end", get(sell::by_date_between));

    let users = Router::new()
        .route("/user", get(user::list).post(user::create))
        .route("/user/:id", get(user::get).put(user::update).delete(user::delete))
        .route("/user/name/:name", get(user::by_name))
        .route("/user/email/:email", get(user::by_email));

    let category_reads = Router::new()
        .route("/category", get(category::list))
        .route("/category/:id", get(category::get))
        .route("/category/description/:description", get(category::by_description))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_user));

    let category_writes = Router::new()
        .route("/category", post(category::create))
        .route("/category/:id", put(category::update).delete(category::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    public
        .merge(clients)
        .merge(phones)
        .merge(sells)
        .merge(users)
        .merge(category_reads)
        .merge(category_writes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
