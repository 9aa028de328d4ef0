//! Email endpoints.

use serde_json::{json, Value};

use super::client::{empty_body, ApiClient};
use super::error::ApiError;

/// GET /emails with optional filters as query parameters.
pub async fn get_emails(client: &ApiClient, filters: &[(&str, String)]) -> Result<Value, ApiError> {
    client.get("/emails", filters).await?.into_json()
}

pub async fn get_email(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client.get(&format!("/emails/{}", urlencoding::encode(id)), &[]).await?.into_json()
}

/// POST /emails/sync, pulling new mail from the connected inbox.
pub async fn sync_emails(client: &ApiClient) -> Result<Value, ApiError> {
    client.post("/emails/sync", &empty_body()).await?.into_json()
}

/// POST /emails/{id}/process, asking the assistant to triage one email.
pub async fn process_email(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client
        .post(&format!("/emails/{}/process", urlencoding::encode(id)), &empty_body())
        .await?
        .into_json()
}

pub async fn mark_email_read(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client
        .patch(&format!("/emails/{}", urlencoding::encode(id)), &json!({ "read": true }))
        .await?
        .into_json()
}
