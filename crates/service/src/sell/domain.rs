use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Input for creating or replacing a sale.
///
/// `client_id` stays optional so a missing reference reaches the service
/// and is rejected as "Invalid client" instead of failing to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellInput {
    pub client_id: Option<i32>,
    pub date: NaiveDate,
}
