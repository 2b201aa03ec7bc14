use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::ServiceError;
use models::user;

/// Field checks shared by insert and update; `exclude_id` skips the
/// duplicate-email check against the row being replaced.
async fn validate(
    db: &DatabaseConnection,
    exclude_id: Option<i32>,
    name: &str,
    email: &str,
) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::IntegrityViolation("Invalid name".into()));
    }
    if !email.contains('@') {
        return Err(ServiceError::IntegrityViolation("Invalid email".into()));
    }
    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if existing.map_or(false, |u| Some(u.id) != exclude_id) {
        return Err(ServiceError::IntegrityViolation("Email already registered".into()));
    }
    Ok(())
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Get a user by id.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("User", id))
}

/// List all users ordered by id.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    let rows = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if rows.is_empty() {
        return Err(ServiceError::NotFound("No user registered".into()));
    }
    Ok(rows)
}

/// Insert a new user; the password is stored as an argon2 hash.
pub async fn insert(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
    roles: &[String],
) -> Result<user::Model, ServiceError> {
    validate(db, None, name, email).await?;
    user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password: Set(hash_password(password)?),
        roles: Set(roles.join(",")),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Replace a user keyed by id; the incoming password is re-hashed.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    email: &str,
    password: &str,
    roles: &[String],
) -> Result<user::Model, ServiceError> {
    validate(db, Some(id), name, email).await?;
    let mut am: user::ActiveModel = find_by_id(db, id).await?.into();
    am.name = Set(name.to_string());
    am.email = Set(email.to_string());
    am.password = Set(hash_password(password)?);
    am.roles = Set(roles.join(","));
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Delete a user by id.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let found = find_by_id(db, id).await?;
    user::Entity::delete_by_id(found.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// Case-insensitive name prefix search, ordered by name.
pub async fn find_by_name_starting_with(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Vec<user::Model>, ServiceError> {
    let rows = user::Entity::find()
        .filter(Expr::col(user::Column::Name).ilike(format!("{}%", name)))
        .order_by_asc(user::Column::Name)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if rows.is_empty() {
        return Err(ServiceError::NotFound("No user found".into()));
    }
    Ok(rows)
}

/// Exact email lookup.
pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<user::Model, ServiceError> {
    user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", email)))
}
