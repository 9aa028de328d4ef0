//! User settings endpoints. All settings live on the server.

use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::PasswordChangeRequest;

pub async fn get_settings(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/settings", &[]).await?.into_json()
}

pub async fn update_settings(client: &ApiClient, settings: &Value) -> Result<Value, ApiError> {
    client.put("/settings", settings).await?.into_json()
}

pub async fn update_profile(client: &ApiClient, profile: &Value) -> Result<Value, ApiError> {
    client.put("/settings/profile", profile).await?.into_json()
}

pub async fn change_password(
    client: &ApiClient,
    current_password: &str,
    new_password: &str,
) -> Result<Value, ApiError> {
    let request = PasswordChangeRequest {
        current_password: current_password.to_string(),
        new_password: new_password.to_string(),
    };
    client
        .post("/settings/password", &request)
        .await?
        .into_json()
}

pub async fn update_notification_preferences(
    client: &ApiClient,
    preferences: &Value,
) -> Result<Value, ApiError> {
    client
        .put("/settings/notifications", preferences)
        .await?
        .into_json()
}

pub async fn update_ai_preferences(client: &ApiClient, preferences: &Value) -> Result<Value, ApiError> {
    client.put("/settings/ai", preferences).await?.into_json()
}
