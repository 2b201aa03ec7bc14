use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;
use models::user;
use service::user_service;

#[derive(Debug, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Response shape: roles as a list, never the password hash.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<user::Model> for UserDto {
    fn from(m: user::Model) -> Self {
        let roles = m.role_list();
        Self { id: m.id, name: m.name, email: m.email, roles }
    }
}

#[utoipa::path(get, path = "/user", tag = "user",
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<UserDto>>, JsonApiError> {
    let rows = user_service::list_all(&state.db).await?;
    Ok(Json(rows.into_iter().map(UserDto::from).collect()))
}

#[utoipa::path(get, path = "/user/{id}", tag = "user",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<UserDto>, JsonApiError> {
    Ok(Json(user_service::find_by_id(&state.db, id).await?.into()))
}

#[utoipa::path(get, path = "/user/name/{name}", tag = "user",
    params(("name" = String, Path, description = "Name prefix, case-insensitive")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<UserDto>>, JsonApiError> {
    let rows = user_service::find_by_name_starting_with(&state.db, &name).await?;
    Ok(Json(rows.into_iter().map(UserDto::from).collect()))
}

#[utoipa::path(get, path = "/user/email/{email}", tag = "user",
    params(("email" = String, Path, description = "Exact email")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn by_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> Result<Json<UserDto>, JsonApiError> {
    Ok(Json(user_service::find_by_email(&state.db, &email).await?.into()))
}

#[utoipa::path(post, path = "/user", tag = "user",
    request_body = crate::openapi::UserRequest,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Integrity Violation")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<UserInput>,
) -> Result<Json<UserDto>, JsonApiError> {
    let created = user_service::insert(
        &state.db,
        &input.name,
        &input.email,
        &input.password,
        &input.roles,
    )
    .await?;
    info!(id = created.id, email = %created.email, "user_created");
    Ok(Json(created.into()))
}

#[utoipa::path(put, path = "/user/{id}", tag = "user",
    params(("id" = i32, Path, description = "User id")),
    request_body = crate::openapi::UserRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Integrity Violation"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UserInput>,
) -> Result<Json<UserDto>, JsonApiError> {
    let updated = user_service::update(
        &state.db,
        id,
        &input.name,
        &input.email,
        &input.password,
        &input.roles,
    )
    .await?;
    info!(id, "user_updated");
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/user/{id}", tag = "user",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, JsonApiError> {
    user_service::delete(&state.db, id).await?;
    info!(id, "user_deleted");
    Ok(StatusCode::OK)
}
