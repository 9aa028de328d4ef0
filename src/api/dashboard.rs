//! Dashboard endpoints.

use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;

pub const DEFAULT_ACTIVITY_LIMIT: u32 = 10;

pub async fn get_stats(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/dashboard/stats", &[]).await?.into_json()
}

/// GET /dashboard/activity?limit=..
pub async fn get_recent_activity(client: &ApiClient, limit: u32) -> Result<Value, ApiError> {
    client
        .get("/dashboard/activity", &[("limit", limit.to_string())])
        .await?
        .into_json()
}

/// GET /dashboard/summary, with `date` only when given.
pub async fn get_daily_summary(client: &ApiClient, date: Option<&str>) -> Result<Value, ApiError> {
    let params: Vec<(&str, String)> = date.map(|d| ("date", d.to_string())).into_iter().collect();
    client
        .get("/dashboard/summary", &params)
        .await?
        .into_json()
}
