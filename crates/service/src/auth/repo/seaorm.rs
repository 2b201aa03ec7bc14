use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::auth::domain::UserRecord;
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::user;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_record(u: user::Model) -> UserRecord {
    let roles = u.role_list();
    UserRecord { id: u.id, name: u.name, email: u.email, roles, password_hash: u.password }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        let res = user::Entity::find()
            .filter(user::Column::Email.eq(email.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_record))
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<UserRecord>, AuthError> {
        let res = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(to_record))
    }
}
