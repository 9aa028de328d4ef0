//! In-app notification endpoints.

use serde_json::{json, Value};

use super::client::{empty_body, ApiClient};
use super::error::ApiError;

pub const DEFAULT_NOTIFICATION_LIMIT: u32 = 20;

/// GET /notifications?limit=..
pub async fn get_notifications(client: &ApiClient, limit: u32) -> Result<Value, ApiError> {
    client
        .get("/notifications", &[("limit", limit.to_string())])
        .await?
        .into_json()
}

pub async fn mark_read(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client
        .patch(&format!("/notifications/{}", urlencoding::encode(id)), &json!({ "read": true }))
        .await?
        .into_json()
}

pub async fn mark_all_read(client: &ApiClient) -> Result<Value, ApiError> {
    client
        .post("/notifications/mark-all-read", &empty_body())
        .await?
        .into_json()
}

pub async fn delete_notification(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client
        .delete(&format!("/notifications/{}", urlencoding::encode(id)))
        .await?
        .into_json()
}
