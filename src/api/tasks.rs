//! Task endpoints.

use serde_json::{json, Value};

use super::client::ApiClient;
use super::error::ApiError;

pub async fn get_tasks(client: &ApiClient, filters: &[(&str, String)]) -> Result<Value, ApiError> {
    client.get("/tasks", filters).await?.into_json()
}

pub async fn get_task(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client.get(&format!("/tasks/{}", urlencoding::encode(id)), &[]).await?.into_json()
}

pub async fn create_task(client: &ApiClient, task: &Value) -> Result<Value, ApiError> {
    client.post("/tasks", task).await?.into_json()
}

pub async fn update_task(client: &ApiClient, id: &str, task: &Value) -> Result<Value, ApiError> {
    client.put(&format!("/tasks/{}", urlencoding::encode(id)), task).await?.into_json()
}

pub async fn delete_task(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client.delete(&format!("/tasks/{}", urlencoding::encode(id))).await?.into_json()
}

/// PATCH /tasks/{id} with `{"status": "completed"}`.
pub async fn complete_task(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client
        .patch(&format!("/tasks/{}", urlencoding::encode(id)), &json!({ "status": "completed" }))
        .await?
        .into_json()
}
