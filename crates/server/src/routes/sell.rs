use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;
use models::sell;
use service::client_service;
use service::sell::domain::SellInput;
use service::sell::repo::seaorm::SeaOrmSellRepository;
use service::sell::SellService;

fn sell_service(state: &ServerState) -> SellService<SeaOrmSellRepository> {
    SellService::new(Arc::new(SeaOrmSellRepository::new(state.db.clone())))
}

#[utoipa::path(get, path = "/sell", tag = "sell",
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<sell::Model>>, JsonApiError> {
    Ok(Json(sell_service(&state).list_all().await?))
}

#[utoipa::path(get, path = "/sell/{id}", tag = "sell",
    params(("id" = i32, Path, description = "Sale id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<sell::Model>, JsonApiError> {
    Ok(Json(sell_service(&state).find_by_id(id).await?))
}

#[utoipa::path(get, path = "/sell/client/{client_id}", tag = "sell",
    params(("client_id" = i32, Path, description = "Owning client id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn by_client(
    State(state): State<ServerState>,
    Path(client_id): Path<i32>,
) -> Result<Json<Vec<sell::Model>>, JsonApiError> {
    // The client itself must exist before its sales are looked up
    let owner = client_service::find_by_id(&state.db, client_id).await?;
    Ok(Json(sell_service(&state).find_by_client(owner.id).await?))
}

#[utoipa::path(get, path = "/sell/date/{date}", tag = "sell",
    params(("date" = String, Path, description = "ISO-8601 date (YYYY-MM-DD)")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn by_date(
    State(state): State<ServerState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<Vec<sell::Model>>, JsonApiError> {
    Ok(Json(sell_service(&state).find_by_date(date).await?))
}

#[utoipa::path(get, path = "/sell/date/{start}/{end}", tag = "sell",
    params(
        ("start" = String, Path, description = "Range start, inclusive (YYYY-MM-DD)"),
        ("end" = String, Path, description = "Range end, inclusive (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn by_date_between(
    State(state): State<ServerState>,
    Path((start, end)): Path<(NaiveDate, NaiveDate)>,
) -> Result<Json<Vec<sell::Model>>, JsonApiError> {
    Ok(Json(sell_service(&state).find_by_date_between(start, end).await?))
}

#[utoipa::path(post, path = "/sell", tag = "sell",
    request_body = crate::openapi::SellRequest,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Integrity Violation")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<SellInput>,
) -> Result<Json<sell::Model>, JsonApiError> {
    let created = sell_service(&state).insert(input).await?;
    info!(id = created.id, client_id = created.client_id, "sell_created");
    Ok(Json(created))
}

#[utoipa::path(put, path = "/sell/{id}", tag = "sell",
    params(("id" = i32, Path, description = "Sale id")),
    request_body = crate::openapi::SellRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Integrity Violation"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<SellInput>,
) -> Result<Json<sell::Model>, JsonApiError> {
    let updated = sell_service(&state).update(id, input).await?;
    info!(id, "sell_updated");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/sell/{id}", tag = "sell",
    params(("id" = i32, Path, description = "Sale id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, JsonApiError> {
    sell_service(&state).delete(id).await?;
    info!(id, "sell_deleted");
    Ok(StatusCode::OK)
}
