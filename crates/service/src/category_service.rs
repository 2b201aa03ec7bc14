use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::ServiceError;
use models::category;

fn validate_description(description: &str) -> Result<(), ServiceError> {
    if description.trim().is_empty() {
        return Err(ServiceError::IntegrityViolation("Invalid description".into()));
    }
    Ok(())
}

/// Get a category by id.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<category::Model, ServiceError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("Category", id))
}

/// List all categories ordered by id.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<category::Model>, ServiceError> {
    let rows = category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if rows.is_empty() {
        return Err(ServiceError::NotFound("No category registered".into()));
    }
    Ok(rows)
}

/// Insert a new category.
pub async fn insert(db: &DatabaseConnection, description: &str) -> Result<category::Model, ServiceError> {
    validate_description(description)?;
    category::ActiveModel {
        description: Set(description.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Replace a category keyed by id.
pub async fn update(db: &DatabaseConnection, id: i32, description: &str) -> Result<category::Model, ServiceError> {
    validate_description(description)?;
    let mut am: category::ActiveModel = find_by_id(db, id).await?.into();
    am.description = Set(description.to_string());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Delete a category by id.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let found = find_by_id(db, id).await?;
    category::Entity::delete_by_id(found.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// Case-insensitive substring search on the description.
pub async fn find_by_description_containing(
    db: &DatabaseConnection,
    description: &str,
) -> Result<Vec<category::Model>, ServiceError> {
    let rows = category::Entity::find()
        .filter(Expr::col(category::Column::Description).ilike(format!("%{}%", description)))
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if rows.is_empty() {
        return Err(ServiceError::NotFound("No category found".into()));
    }
    Ok(rows)
}
