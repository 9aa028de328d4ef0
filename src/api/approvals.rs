//! Approval queue endpoints.
//!
//! Approvals are assistant-proposed actions waiting on the executive.

use serde_json::{json, Value};

use super::client::{empty_body, ApiClient};
use super::error::ApiError;

/// GET /approvals?status=pending
pub async fn get_pending_approvals(client: &ApiClient) -> Result<Value, ApiError> {
    client
        .get("/approvals", &[("status", "pending".to_string())])
        .await?
        .into_json()
}

pub async fn get_approval(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client.get(&format!("/approvals/{}", urlencoding::encode(id)), &[]).await?.into_json()
}

/// Approve, optionally with edits to the proposed action (`{}` for none).
pub async fn approve(client: &ApiClient, id: &str, modifications: &Value) -> Result<Value, ApiError> {
    client
        .post(&format!("/approvals/{}/approve", urlencoding::encode(id)), modifications)
        .await?
        .into_json()
}

pub async fn reject(client: &ApiClient, id: &str, reason: &str) -> Result<Value, ApiError> {
    client
        .post(&format!("/approvals/{}/reject", urlencoding::encode(id)), &json!({ "reason": reason }))
        .await?
        .into_json()
}

pub async fn update_approval(client: &ApiClient, id: &str, updates: &Value) -> Result<Value, ApiError> {
    client
        .put(&format!("/approvals/{}", urlencoding::encode(id)), updates)
        .await?
        .into_json()
}

pub async fn approve_all(client: &ApiClient) -> Result<Value, ApiError> {
    client
        .post("/approvals/approve-all", &empty_body())
        .await?
        .into_json()
}
