use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;
use models::phone;
use service::errors::ServiceError;
use service::phone_service;

#[derive(Debug, Deserialize)]
pub struct PhoneInput {
    pub number: String,
    pub client_id: Option<i32>,
}

fn owner_id(input: &PhoneInput) -> Result<i32, JsonApiError> {
    input
        .client_id
        .ok_or_else(|| ServiceError::IntegrityViolation("Invalid client".into()).into())
}

#[utoipa::path(get, path = "/phone", tag = "phone",
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<phone::Model>>, JsonApiError> {
    Ok(Json(phone_service::list_all(&state.db).await?))
}

#[utoipa::path(get, path = "/phone/{id}", tag = "phone",
    params(("id" = i32, Path, description = "Phone id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<phone::Model>, JsonApiError> {
    Ok(Json(phone_service::find_by_id(&state.db, id).await?))
}

#[utoipa::path(get, path = "/phone/number/{number}", tag = "phone",
    params(("number" = String, Path, description = "Exact number")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn by_number(
    State(state): State<ServerState>,
    Path(number): Path<String>,
) -> Result<Json<Vec<phone::Model>>, JsonApiError> {
    Ok(Json(phone_service::find_by_number_order_by_client(&state.db, &number).await?))
}

#[utoipa::path(get, path = "/phone/client/{client_id}", tag = "phone",
    params(("client_id" = i32, Path, description = "Owning client id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn by_client(
    State(state): State<ServerState>,
    Path(client_id): Path<i32>,
) -> Result<Json<Vec<phone::Model>>, JsonApiError> {
    Ok(Json(phone_service::find_by_client(&state.db, client_id).await?))
}

#[utoipa::path(post, path = "/phone", tag = "phone",
    request_body = crate::openapi::PhoneRequest,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Integrity Violation"),
        (status = 404, description = "Client Not Found")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<PhoneInput>,
) -> Result<Json<phone::Model>, JsonApiError> {
    let client_id = owner_id(&input)?;
    let created = phone_service::insert(&state.db, &input.number, client_id).await?;
    info!(id = created.id, client_id, "phone_created");
    Ok(Json(created))
}

#[utoipa::path(put, path = "/phone/{id}", tag = "phone",
    params(("id" = i32, Path, description = "Phone id")),
    request_body = crate::openapi::PhoneRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Integrity Violation"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<PhoneInput>,
) -> Result<Json<phone::Model>, JsonApiError> {
    let client_id = owner_id(&input)?;
    let updated = phone_service::update(&state.db, id, &input.number, client_id).await?;
    info!(id, "phone_updated");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/phone/{id}", tag = "phone",
    params(("id" = i32, Path, description = "Phone id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, JsonApiError> {
    phone_service::delete(&state.db, id).await?;
    info!(id, "phone_deleted");
    Ok(StatusCode::OK)
}
