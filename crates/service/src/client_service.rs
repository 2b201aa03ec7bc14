use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::ServiceError;
use models::client;

fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::IntegrityViolation("Invalid name".into()));
    }
    Ok(())
}

/// Get a client by id.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<client::Model, ServiceError> {
    client::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("Client", id))
}

/// List all clients ordered by id.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<client::Model>, ServiceError> {
    let rows = client::Entity::find()
        .order_by_asc(client::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if rows.is_empty() {
        return Err(ServiceError::NotFound("No client registered".into()));
    }
    Ok(rows)
}

/// Insert a new client.
pub async fn insert(db: &DatabaseConnection, name: &str, address: &str) -> Result<client::Model, ServiceError> {
    validate_name(name)?;
    client::ActiveModel {
        name: Set(name.to_string()),
        address: Set(address.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Replace a client keyed by id.
pub async fn update(db: &DatabaseConnection, id: i32, name: &str, address: &str) -> Result<client::Model, ServiceError> {
    validate_name(name)?;
    let mut am: client::ActiveModel = find_by_id(db, id).await?.into();
    am.name = Set(name.to_string());
    am.address = Set(address.to_string());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Delete a client by id; owned phones and sales go with it.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let found = find_by_id(db, id).await?;
    client::Entity::delete_by_id(found.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// Case-insensitive name prefix search, ordered by name.
pub async fn find_by_name_starting_with(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Vec<client::Model>, ServiceError> {
    let rows = client::Entity::find()
        .filter(Expr::col(client::Column::Name).ilike(format!("{}%", name)))
        .order_by_asc(client::Column::Name)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if rows.is_empty() {
        return Err(ServiceError::NotFound("No client found".into()));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, skip_db_tests};
    use uuid::Uuid;

    #[tokio::test]
    async fn client_crud_service() -> Result<(), anyhow::Error> {
        if skip_db_tests() {
            return Ok(());
        }
        let db = get_db().await?;

        let name = format!("Zelda Fitzgerald {}", Uuid::new_v4());
        let created = insert(&db, &name, "7 Paradise Row").await?;
        assert_eq!(created.name, name);

        let found = find_by_id(&db, created.id).await?;
        assert_eq!(found.address, "7 Paradise Row");

        // Prefix search ignores case
        let prefix = name[..5].to_lowercase();
        let matches = find_by_name_starting_with(&db, &prefix).await?;
        assert!(matches.iter().any(|c| c.id == created.id));

        let updated = update(&db, created.id, &name, "8 Paradise Row").await?;
        assert_eq!(updated.address, "8 Paradise Row");

        delete(&db, created.id).await?;
        match find_by_id(&db, created.id).await {
            Err(ServiceError::NotFound(msg)) => {
                assert_eq!(msg, format!("Client {} not found", created.id));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn client_rejects_blank_name() -> Result<(), anyhow::Error> {
        if skip_db_tests() {
            return Ok(());
        }
        let db = get_db().await?;

        match insert(&db, "", "9 Nowhere Lane").await {
            Err(ServiceError::IntegrityViolation(msg)) => assert_eq!(msg, "Invalid name"),
            other => panic!("unexpected result: {:?}", other),
        }
        Ok(())
    }
}
