use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    Unchanged,
};

use crate::errors::ServiceError;
use crate::sell::repository::SellRepository;
use models::{client, sell};

/// PostgreSQL-backed store for sales.
pub struct SeaOrmSellRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSellRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SellRepository for SeaOrmSellRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<sell::Model>, ServiceError> {
        sell::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<sell::Model>, ServiceError> {
        sell::Entity::find()
            .order_by_asc(sell::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, client_id: i32, date: NaiveDate) -> Result<sell::Model, ServiceError> {
        sell::ActiveModel {
            client_id: Set(client_id),
            date: Set(date),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, sale: sell::Model) -> Result<sell::Model, ServiceError> {
        sell::ActiveModel {
            id: Unchanged(sale.id),
            client_id: Set(sale.client_id),
            date: Set(sale.date),
        }
        .update(&self.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        sell::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }

    async fn find_by_client(&self, client_id: i32) -> Result<Vec<sell::Model>, ServiceError> {
        sell::Entity::find()
            .filter(sell::Column::ClientId.eq(client_id))
            .order_by_asc(sell::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_date_desc(&self, date: NaiveDate) -> Result<Vec<sell::Model>, ServiceError> {
        sell::Entity::find()
            .filter(sell::Column::Date.eq(date))
            .order_by_desc(sell::Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<sell::Model>, ServiceError> {
        sell::Entity::find()
            .filter(sell::Column::Date.between(start, end))
            .order_by_asc(sell::Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn client_exists(&self, client_id: i32) -> Result<bool, ServiceError> {
        let found = client::Entity::find_by_id(client_id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.is_some())
    }
}
