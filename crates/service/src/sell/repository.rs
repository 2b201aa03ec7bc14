use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::ServiceError;
use models::sell;

/// Repository abstraction for sale persistence.
///
/// `update` and `delete` expect the target row to exist; the service checks
/// existence first so it owns the error message.
#[async_trait]
pub trait SellRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<sell::Model>, ServiceError>;
    async fn list_all(&self) -> Result<Vec<sell::Model>, ServiceError>;
    async fn insert(&self, client_id: i32, date: NaiveDate) -> Result<sell::Model, ServiceError>;
    async fn update(&self, sale: sell::Model) -> Result<sell::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;

    async fn find_by_client(&self, client_id: i32) -> Result<Vec<sell::Model>, ServiceError>;
    async fn find_by_date_desc(&self, date: NaiveDate) -> Result<Vec<sell::Model>, ServiceError>;
    async fn find_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<sell::Model>, ServiceError>;

    /// Client lookup backing the "Invalid client" integrity rule.
    async fn client_exists(&self, client_id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockSellRepository {
        rows: Mutex<Vec<sell::Model>>,
        clients: Mutex<HashSet<i32>>,
        next_id: AtomicI32,
    }

    impl MockSellRepository {
        /// Mock whose `client_exists` treats the given ids as stored clients.
        pub fn with_clients(ids: &[i32]) -> Self {
            let mock = Self::default();
            mock.clients.lock().unwrap().extend(ids.iter().copied());
            mock
        }
    }

    #[async_trait]
    impl SellRepository for MockSellRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<sell::Model>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|s| s.id == id).cloned())
        }

        async fn list_all(&self) -> Result<Vec<sell::Model>, ServiceError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by_key(|s| s.id);
            Ok(rows)
        }

        async fn insert(&self, client_id: i32, date: NaiveDate) -> Result<sell::Model, ServiceError> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let sale = sell::Model { id, client_id, date };
            self.rows.lock().unwrap().push(sale.clone());
            Ok(sale)
        }

        async fn update(&self, sale: sell::Model) -> Result<sell::Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|s| s.id == sale.id) {
                Some(stored) => {
                    *stored = sale.clone();
                    Ok(sale)
                }
                None => Err(ServiceError::Db("update target missing".into())),
            }
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.rows.lock().unwrap().retain(|s| s.id != id);
            Ok(())
        }

        async fn find_by_client(&self, client_id: i32) -> Result<Vec<sell::Model>, ServiceError> {
            let mut rows: Vec<_> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.client_id == client_id)
                .cloned()
                .collect();
            rows.sort_by_key(|s| s.id);
            Ok(rows)
        }

        async fn find_by_date_desc(&self, date: NaiveDate) -> Result<Vec<sell::Model>, ServiceError> {
            let mut rows: Vec<_> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.date == date)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.date.cmp(&a.date));
            Ok(rows)
        }

        async fn find_by_date_between(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<sell::Model>, ServiceError> {
            let mut rows: Vec<_> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.date >= start && s.date <= end)
                .cloned()
                .collect();
            rows.sort_by_key(|s| s.date);
            Ok(rows)
        }

        async fn client_exists(&self, client_id: i32) -> Result<bool, ServiceError> {
            Ok(self.clients.lock().unwrap().contains(&client_id))
        }
    }
}
