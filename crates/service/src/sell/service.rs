use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};

use super::domain::SellInput;
use super::repository::SellRepository;
use crate::errors::ServiceError;
use models::sell;

/// Sale business service independent of web framework
pub struct SellService<R: SellRepository> {
    repo: Arc<R>,
}

impl<R: SellRepository> SellService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Resolve the client reference; absent or unknown clients violate the
    /// sale integrity rule.
    async fn validate_client(&self, client_id: Option<i32>) -> Result<i32, ServiceError> {
        let id = client_id
            .ok_or_else(|| ServiceError::IntegrityViolation("Invalid client".into()))?;
        if !self.repo.client_exists(id).await? {
            return Err(ServiceError::IntegrityViolation("Invalid client".into()));
        }
        Ok(id)
    }

    /// A sale never carries a date after today (UTC).
    fn validate_date(date: NaiveDate) -> Result<(), ServiceError> {
        if date > Utc::now().date_naive() {
            return Err(ServiceError::IntegrityViolation("Invalid date".into()));
        }
        Ok(())
    }

    /// Get a sale by id.
    pub async fn find_by_id(&self, id: i32) -> Result<sell::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Sale", id))
    }

    /// List all sales ordered by id.
    pub async fn list_all(&self) -> Result<Vec<sell::Model>, ServiceError> {
        let rows = self.repo.list_all().await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound("No sale registered".into()));
        }
        Ok(rows)
    }

    /// Insert a new sale after checking the client reference and the date.
    ///
    /// # Examples
    /// ```
    /// use service::sell::{domain::SellInput, repository::mock::MockSellRepository, service::SellService};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockSellRepository::with_clients(&[1]));
    /// let svc = SellService::new(repo);
    /// let sale = tokio_test::block_on(svc.insert(SellInput {
    ///     client_id: Some(1),
    ///     date: "2023-01-31".parse().unwrap(),
    /// }))
    /// .unwrap();
    /// assert_eq!(sale.client_id, 1);
    /// assert!(sale.id > 0);
    /// ```
    #[instrument(skip(self, input), fields(client_id = ?input.client_id, date = %input.date))]
    pub async fn insert(&self, input: SellInput) -> Result<sell::Model, ServiceError> {
        let client_id = self.validate_client(input.client_id).await?;
        Self::validate_date(input.date)?;
        let created = self.repo.insert(client_id, input.date).await?;
        info!(id = created.id, client_id, "sale_created");
        Ok(created)
    }

    /// Replace a sale keyed by id, re-running the date and client checks.
    /// A failed check leaves the stored row untouched.
    #[instrument(skip(self, input), fields(date = %input.date))]
    pub async fn update(&self, id: i32, input: SellInput) -> Result<sell::Model, ServiceError> {
        Self::validate_date(input.date)?;
        let client_id = self.validate_client(input.client_id).await?;
        let current = self.find_by_id(id).await?;
        let updated = self
            .repo
            .update(sell::Model { id: current.id, client_id, date: input.date })
            .await?;
        info!(id = updated.id, client_id, "sale_updated");
        Ok(updated)
    }

    /// Delete a sale by id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let found = self.find_by_id(id).await?;
        self.repo.delete(found.id).await?;
        info!(id, "sale_deleted");
        Ok(())
    }

    /// Sales owned by a client.
    ///
    /// # Examples
    /// ```
    /// use service::sell::{domain::SellInput, repository::mock::MockSellRepository, service::SellService};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockSellRepository::with_clients(&[1, 2]));
    /// let svc = SellService::new(repo);
    /// tokio_test::block_on(async {
    ///     svc.insert(SellInput { client_id: Some(1), date: "2023-01-01".parse().unwrap() }).await.unwrap();
    ///     svc.insert(SellInput { client_id: Some(2), date: "2023-02-01".parse().unwrap() }).await.unwrap();
    ///     let owned = svc.find_by_client(1).await.unwrap();
    ///     assert_eq!(owned.len(), 1);
    /// });
    /// ```
    pub async fn find_by_client(&self, client_id: i32) -> Result<Vec<sell::Model>, ServiceError> {
        let rows = self.repo.find_by_client(client_id).await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound("No sale found".into()));
        }
        Ok(rows)
    }

    /// Exact-date matches, newest first.
    pub async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<sell::Model>, ServiceError> {
        let rows = self.repo.find_by_date_desc(date).await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound("No sale found".into()));
        }
        Ok(rows)
    }

    /// Inclusive `[start, end]` range matches ordered by date.
    pub async fn find_by_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<sell::Model>, ServiceError> {
        let rows = self.repo.find_by_date_between(start, end).await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound("No sale found".into()));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sell::repository::mock::MockSellRepository;

    fn svc_with_clients(ids: &[i32]) -> SellService<MockSellRepository> {
        SellService::new(Arc::new(MockSellRepository::with_clients(ids)))
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn insert_rejects_absent_client() {
        let svc = svc_with_clients(&[1]);
        let result = svc.insert(SellInput { client_id: None, date: d("2023-01-01") }).await;
        match result {
            Err(ServiceError::IntegrityViolation(msg)) => assert_eq!(msg, "Invalid client"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn insert_rejects_unknown_client() {
        let svc = svc_with_clients(&[1]);
        let result = svc.insert(SellInput { client_id: Some(99), date: d("2023-01-01") }).await;
        match result {
            Err(ServiceError::IntegrityViolation(msg)) => assert_eq!(msg, "Invalid client"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn insert_rejects_future_date() {
        let svc = svc_with_clients(&[1]);
        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        let result = svc.insert(SellInput { client_id: Some(1), date: tomorrow }).await;
        match result {
            Err(ServiceError::IntegrityViolation(msg)) => assert_eq!(msg, "Invalid date"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn insert_accepts_today() {
        let svc = svc_with_clients(&[1]);
        let today = Utc::now().date_naive();
        let sale = svc.insert(SellInput { client_id: Some(1), date: today }).await.unwrap();
        assert_eq!(sale.date, today);
    }

    #[tokio::test]
    async fn insert_then_find_by_id_round_trips() {
        let svc = svc_with_clients(&[1]);
        let created =
            svc.insert(SellInput { client_id: Some(1), date: d("2023-01-31") }).await.unwrap();
        let found = svc.find_by_id(created.id).await.unwrap();
        assert_eq!(found.client_id, 1);
        assert_eq!(found.date, d("2023-01-31"));
    }

    #[tokio::test]
    async fn find_by_id_missing_reports_id() {
        let svc = svc_with_clients(&[]);
        match svc.find_by_id(1).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "Sale 1 not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_all_empty_store_is_not_found() {
        let svc = svc_with_clients(&[]);
        match svc.list_all().await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "No sale registered"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_all_returns_every_row() {
        let svc = svc_with_clients(&[1]);
        for day in ["2023-01-01", "2023-02-01", "2023-03-01"] {
            svc.insert(SellInput { client_id: Some(1), date: d(day) }).await.unwrap();
        }
        assert_eq!(svc.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_replaces_client_and_date() {
        let svc = svc_with_clients(&[1, 2]);
        let created =
            svc.insert(SellInput { client_id: Some(1), date: d("2023-01-01") }).await.unwrap();

        let updated = svc
            .update(created.id, SellInput { client_id: Some(2), date: d("2023-02-01") })
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.client_id, 2);
        assert_eq!(updated.date, d("2023-02-01"));

        let stored = svc.find_by_id(created.id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_with_future_date_leaves_row_unchanged() {
        let svc = svc_with_clients(&[1]);
        let created =
            svc.insert(SellInput { client_id: Some(1), date: d("2023-01-01") }).await.unwrap();

        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        match svc.update(created.id, SellInput { client_id: Some(1), date: tomorrow }).await {
            Err(ServiceError::IntegrityViolation(msg)) => assert_eq!(msg, "Invalid date"),
            other => panic!("unexpected result: {:?}", other),
        }

        let stored = svc.find_by_id(created.id).await.unwrap();
        assert_eq!(stored.date, d("2023-01-01"));
    }

    #[tokio::test]
    async fn update_missing_sale_is_not_found() {
        let svc = svc_with_clients(&[1]);
        match svc.update(7, SellInput { client_id: Some(1), date: d("2023-01-01") }).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "Sale 7 not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn delete_missing_sale_is_not_found() {
        let svc = svc_with_clients(&[]);
        match svc.delete(1).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "Sale 1 not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn find_by_date_matches_exact_day_only() {
        let svc = svc_with_clients(&[1]);
        svc.insert(SellInput { client_id: Some(1), date: d("2023-01-01") }).await.unwrap();
        svc.insert(SellInput { client_id: Some(1), date: d("2023-01-02") }).await.unwrap();

        let rows = svc.find_by_date(d("2023-01-01")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, d("2023-01-01"));

        match svc.find_by_date(d("2020-01-01")).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "No sale found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn find_by_date_between_is_inclusive_and_ordered() {
        let svc = svc_with_clients(&[1]);
        for day in ["2023-06-01", "2023-01-01", "2022-12-31"] {
            svc.insert(SellInput { client_id: Some(1), date: d(day) }).await.unwrap();
        }

        // Both endpoints are part of the range
        let rows = svc.find_by_date_between(d("2023-01-01"), d("2023-06-01")).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, d("2023-01-01"));
        assert_eq!(rows[1].date, d("2023-06-01"));

        let all = svc.find_by_date_between(d("2022-01-01"), d("2023-06-01")).await.unwrap();
        assert_eq!(all.len(), 3);

        match svc.find_by_date_between(d("2022-01-01"), d("2022-02-01")).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "No sale found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    // Seed three 2023 sales, two owned by client 1 and one by client 2, then
    // walk the per-client view and the post-delete count.
    #[tokio::test]
    async fn per_client_view_and_delete_shrink_the_store() {
        let svc = svc_with_clients(&[1, 2]);
        let first =
            svc.insert(SellInput { client_id: Some(1), date: d("2023-01-01") }).await.unwrap();
        svc.insert(SellInput { client_id: Some(1), date: d("2023-02-01") }).await.unwrap();
        svc.insert(SellInput { client_id: Some(2), date: d("2023-03-01") }).await.unwrap();

        assert_eq!(svc.find_by_client(1).await.unwrap().len(), 2);
        assert_eq!(svc.find_by_client(2).await.unwrap().len(), 1);
        assert_eq!(svc.list_all().await.unwrap().len(), 3);

        svc.delete(first.id).await.unwrap();
        assert_eq!(svc.list_all().await.unwrap().len(), 2);
        assert_eq!(svc.find_by_client(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_by_client_without_sales_is_not_found() {
        let svc = svc_with_clients(&[1, 3]);
        svc.insert(SellInput { client_id: Some(1), date: d("2023-01-01") }).await.unwrap();
        match svc.find_by_client(3).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "No sale found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
