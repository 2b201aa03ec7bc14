use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;
use models::client;
use service::client_service;

#[derive(Debug, Deserialize)]
pub struct ClientInput {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

#[utoipa::path(get, path = "/client", tag = "client",
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<client::Model>>, JsonApiError> {
    Ok(Json(client_service::list_all(&state.db).await?))
}

#[utoipa::path(get, path = "/client/{id}", tag = "client",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<client::Model>, JsonApiError> {
    Ok(Json(client_service::find_by_id(&state.db, id).await?))
}

#[utoipa::path(get, path = "/client/name/{name}", tag = "client",
    params(("name" = String, Path, description = "Name prefix, case-insensitive")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<client::Model>>, JsonApiError> {
    Ok(Json(client_service::find_by_name_starting_with(&state.db, &name).await?))
}

#[utoipa::path(post, path = "/client", tag = "client",
    request_body = crate::openapi::ClientRequest,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Integrity Violation")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ClientInput>,
) -> Result<Json<client::Model>, JsonApiError> {
    let created = client_service::insert(&state.db, &input.name, &input.address).await?;
    info!(id = created.id, "client_created");
    Ok(Json(created))
}

#[utoipa::path(put, path = "/client/{id}", tag = "client",
    params(("id" = i32, Path, description = "Client id")),
    request_body = crate::openapi::ClientRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Integrity Violation"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<ClientInput>,
) -> Result<Json<client::Model>, JsonApiError> {
    let updated = client_service::update(&state.db, id, &input.name, &input.address).await?;
    info!(id, "client_updated");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/client/{id}", tag = "client",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, JsonApiError> {
    client_service::delete(&state.db, id).await?;
    info!(id, "client_deleted");
    Ok(StatusCode::OK)
}
