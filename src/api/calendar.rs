//! Calendar endpoints.

use serde_json::Value;

use super::client::{empty_body, ApiClient};
use super::error::ApiError;

/// GET /calendar/events?start=..&end=..
pub async fn get_events(client: &ApiClient, start: &str, end: &str) -> Result<Value, ApiError> {
    client
        .get(
            "/calendar/events",
            &[("start", start.to_string()), ("end", end.to_string())],
        )
        .await?
        .into_json()
}

pub async fn create_event(client: &ApiClient, event: &Value) -> Result<Value, ApiError> {
    client.post("/calendar/events", event).await?.into_json()
}

pub async fn update_event(client: &ApiClient, id: &str, event: &Value) -> Result<Value, ApiError> {
    client
        .put(&format!("/calendar/events/{}", urlencoding::encode(id)), event)
        .await?
        .into_json()
}

pub async fn delete_event(client: &ApiClient, id: &str) -> Result<Value, ApiError> {
    client
        .delete(&format!("/calendar/events/{}", urlencoding::encode(id)))
        .await?
        .into_json()
}

/// GET /calendar/availability?date=..
pub async fn get_availability(client: &ApiClient, date: &str) -> Result<Value, ApiError> {
    client
        .get("/calendar/availability", &[("date", date.to_string())])
        .await?
        .into_json()
}

pub async fn sync_calendar(client: &ApiClient) -> Result<Value, ApiError> {
    client.post("/calendar/sync", &empty_body()).await?.into_json()
}
