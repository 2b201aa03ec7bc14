use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{client_service, errors::ServiceError};
use models::phone;

fn validate_number(number: &str) -> Result<(), ServiceError> {
    if number.trim().is_empty() {
        return Err(ServiceError::IntegrityViolation("Invalid number".into()));
    }
    Ok(())
}

/// Get a phone by id.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<phone::Model, ServiceError> {
    phone::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("Phone", id))
}

/// List all phones ordered by id.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<phone::Model>, ServiceError> {
    let rows = phone::Entity::find()
        .order_by_asc(phone::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if rows.is_empty() {
        return Err(ServiceError::NotFound("No phone registered".into()));
    }
    Ok(rows)
}

/// Insert a new phone for an existing client.
pub async fn insert(db: &DatabaseConnection, number: &str, client_id: i32) -> Result<phone::Model, ServiceError> {
    validate_number(number)?;
    let owner = client_service::find_by_id(db, client_id).await?;
    phone::ActiveModel {
        number: Set(number.to_string()),
        client_id: Set(owner.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Replace a phone keyed by id.
pub async fn update(db: &DatabaseConnection, id: i32, number: &str, client_id: i32) -> Result<phone::Model, ServiceError> {
    validate_number(number)?;
    let owner = client_service::find_by_id(db, client_id).await?;
    let mut am: phone::ActiveModel = find_by_id(db, id).await?.into();
    am.number = Set(number.to_string());
    am.client_id = Set(owner.id);
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Delete a phone by id.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let found = find_by_id(db, id).await?;
    phone::Entity::delete_by_id(found.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// Exact number matches, ordered by owning client.
pub async fn find_by_number_order_by_client(
    db: &DatabaseConnection,
    number: &str,
) -> Result<Vec<phone::Model>, ServiceError> {
    let rows = phone::Entity::find()
        .filter(phone::Column::Number.eq(number))
        .order_by_asc(phone::Column::ClientId)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if rows.is_empty() {
        return Err(ServiceError::NotFound("No phone found".into()));
    }
    Ok(rows)
}

/// Phones owned by a client; the client itself must exist.
pub async fn find_by_client(db: &DatabaseConnection, client_id: i32) -> Result<Vec<phone::Model>, ServiceError> {
    let owner = client_service::find_by_id(db, client_id).await?;
    let rows = phone::Entity::find()
        .filter(phone::Column::ClientId.eq(owner.id))
        .order_by_asc(phone::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if rows.is_empty() {
        return Err(ServiceError::NotFound("No phone found".into()));
    }
    Ok(rows)
}
