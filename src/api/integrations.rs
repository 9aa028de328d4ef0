//! Third-party account integrations (Gmail, Google Calendar).
//!
//! The authorize endpoints may answer with a redirect page rather than JSON,
//! so they hand back the raw `Payload`.

use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::Payload;

/// An integration the backend can connect on the user's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integration {
    Gmail,
    Calendar,
}

impl Integration {
    fn slug(self) -> &'static str {
        match self {
            Integration::Gmail => "gmail",
            Integration::Calendar => "calendar",
        }
    }
}

/// GET /integrations/{name}/authorize
pub async fn connect(client: &ApiClient, integration: Integration) -> Result<Payload, ApiError> {
    client
        .get(&format!("/integrations/{}/authorize", integration.slug()), &[])
        .await
}

/// DELETE /integrations/{name}
pub async fn disconnect(client: &ApiClient, integration: Integration) -> Result<Value, ApiError> {
    client
        .delete(&format!("/integrations/{}", integration.slug()))
        .await?
        .into_json()
}

/// GET /integrations/{name}/status
pub async fn status(client: &ApiClient, integration: Integration) -> Result<Value, ApiError> {
    client
        .get(&format!("/integrations/{}/status", integration.slug()), &[])
        .await?
        .into_json()
}
