use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;
use models::category;
use service::category_service;

#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub description: String,
}

#[utoipa::path(get, path = "/category", tag = "category",
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<category::Model>>, JsonApiError> {
    Ok(Json(category_service::list_all(&state.db).await?))
}

#[utoipa::path(get, path = "/category/{id}", tag = "category",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<category::Model>, JsonApiError> {
    Ok(Json(category_service::find_by_id(&state.db, id).await?))
}

#[utoipa::path(get, path = "/category/description/{description}", tag = "category",
    params(("description" = String, Path, description = "Substring to match, case-insensitive")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn by_description(
    State(state): State<ServerState>,
    Path(description): Path<String>,
) -> Result<Json<Vec<category::Model>>, JsonApiError> {
    Ok(Json(category_service::find_by_description_containing(&state.db, &description).await?))
}

#[utoipa::path(post, path = "/category", tag = "category",
    request_body = crate::openapi::CategoryRequest,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Integrity Violation"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<category::Model>, JsonApiError> {
    let created = category_service::insert(&state.db, &input.description).await?;
    info!(id = created.id, "category_created");
    Ok(Json(created))
}

#[utoipa::path(put, path = "/category/{id}", tag = "category",
    params(("id" = i32, Path, description = "Category id")),
    request_body = crate::openapi::CategoryRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Integrity Violation"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<category::Model>, JsonApiError> {
    let updated = category_service::update(&state.db, id, &input.description).await?;
    info!(id, "category_updated");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/category/{id}", tag = "category",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, JsonApiError> {
    category_service::delete(&state.db, id).await?;
    info!(id, "category_deleted");
    Ok(StatusCode::OK)
}
