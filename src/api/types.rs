//! Request and response types for the Executive Secretary backend API.
//!
//! Bodies are opaque JSON except where the session layer needs structure
//! (login and the current user), which use camelCase like the web client.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;

/// HTTP verbs the gateway issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API call, built per request and consumed by `ApiClient::call`.
///
/// `query` is only serialized for GET requests. Pairs keep insertion order so
/// the produced URL is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    /// Sent without the session token; a 401 leaves the session alone.
    pub anonymous: bool,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            anonymous: false,
        }
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a caller header. Caller headers win over the gateway defaults.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Path plus URL-encoded query string (GET only).
    pub fn target(&self) -> String {
        if self.method != Method::Get || self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

/// A response exactly as the transport delivered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(false, |ct| ct.to_ascii_lowercase().contains("application/json"))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Successful outcome of a call.
///
/// Non-JSON success responses (binary payloads, redirect pages) are handed
/// back untouched as `Raw`.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Raw(RawResponse),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Raw(_) => None,
        }
    }

    /// The JSON body. An empty raw body reads as `null`.
    pub fn into_json(self) -> Result<Value, ApiError> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Raw(raw) if raw.body.is_empty() => Ok(Value::Null),
            Payload::Raw(raw) => Err(ApiError::Decode(format!(
                "expected a JSON response, got {}",
                raw.content_type.as_deref().unwrap_or("no content type")
            ))),
        }
    }

    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = self.into_json()?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// The signed-in user as the client caches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    #[serde(default, alias = "full_name")]
    pub full_name: String,
}

/// Login request body sent to POST /auth/login.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Login response from POST /auth/login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Body of GET /auth/me. Older backends return the user bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CurrentUserResponse {
    Wrapped { user: User },
    Bare(User),
}

impl CurrentUserResponse {
    pub fn into_user(self) -> User {
        match self {
            CurrentUserResponse::Wrapped { user } | CurrentUserResponse::Bare(user) => user,
        }
    }
}

/// Response from GET /auth/google/url.
#[derive(Debug, Deserialize)]
pub struct OAuthUrlResponse {
    pub url: Option<String>,
}

/// Password change body sent to POST /settings/password.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_target_encodes_query_in_order() {
        let req = RequestDescriptor::new(Method::Get, "/calendar/events")
            .query("start", "2026-10-01")
            .query("end", "2026-10-31 23:59");
        assert_eq!(
            req.target(),
            "/calendar/events?start=2026-10-01&end=2026-10-31%2023%3A59"
        );
    }

    #[test]
    fn test_non_get_target_ignores_query() {
        let req = RequestDescriptor::new(Method::Post, "/tasks").query("x", "1");
        assert_eq!(req.target(), "/tasks");
    }

    #[test]
    fn test_json_content_type_detection() {
        let raw = RawResponse {
            status: 200,
            status_text: "OK".into(),
            content_type: Some("Application/JSON; charset=utf-8".into()),
            body: Vec::new(),
        };
        assert!(raw.is_json());
        assert!(raw.is_success());
    }

    #[test]
    fn test_user_accepts_snake_and_camel_names() {
        let camel: User = serde_json::from_value(json!({"email": "a@b.com", "fullName": "A B"})).unwrap();
        let snake: User =
            serde_json::from_value(json!({"email": "a@b.com", "full_name": "A B", "role": "executive"}))
                .unwrap();
        assert_eq!(camel, snake);
    }

    #[test]
    fn test_current_user_wrapped_or_bare() {
        let wrapped: CurrentUserResponse =
            serde_json::from_value(json!({"user": {"email": "x@y.z", "fullName": "X"}})).unwrap();
        let bare: CurrentUserResponse =
            serde_json::from_value(json!({"email": "x@y.z", "fullName": "X"})).unwrap();
        assert_eq!(wrapped.into_user(), bare.into_user());
    }

    #[test]
    fn test_raw_payload_into_json() {
        let empty = Payload::Raw(RawResponse {
            status: 204,
            status_text: "No Content".into(),
            content_type: None,
            body: Vec::new(),
        });
        assert_eq!(empty.into_json().unwrap(), Value::Null);

        let html = Payload::Raw(RawResponse {
            status: 200,
            status_text: "OK".into(),
            content_type: Some("text/html".into()),
            body: b"<html></html>".to_vec(),
        });
        assert!(matches!(html.into_json(), Err(ApiError::Decode(_))));
    }
}
