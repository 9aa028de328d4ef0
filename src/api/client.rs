//! HTTP gateway with bearer-token injection and response interpretation.
//!
//! Every request carries `Content-Type: application/json` and, when the
//! session holds a token, `Authorization: Bearer <token>`. Caller headers
//! override both. A 401 clears the session and surfaces `AuthExpired`; what to
//! do next (navigating to login) is the caller's policy, see `AuthManager::guard`.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::error::{ApiError, GENERIC_FAILURE_MESSAGE};
use super::mock;
use super::transport::{HttpRequest, Transport};
use super::types::{Method, Payload, RawResponse, RequestDescriptor};
use crate::session::Session;

pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
    base_url: String,
    demo_mode: bool,
}

impl ApiClient {
    /// Create a client against `base_url`. Demo mode never touches `transport`.
    pub fn new(
        base_url: &str,
        demo_mode: bool,
        session: Arc<Session>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            session,
            base_url: base_url.trim_end_matches('/').to_string(),
            demo_mode,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_demo(&self) -> bool {
        self.demo_mode
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Perform one call.
    ///
    /// Demo mode returns the canned payload for the route before any header or
    /// credential work. Failures are logged with the endpoint.
    pub async fn call(&self, request: RequestDescriptor) -> Result<Payload, ApiError> {
        let endpoint = format!("{} {}", request.method, request.target());

        if self.demo_mode {
            log::info!("DEMO MODE: mock API call -> {}", endpoint);
            return Ok(Payload::Json(mock::mock_response(
                request.method,
                &request.path,
            )));
        }

        let result = self.execute(request).await;
        if let Err(ref e) = result {
            log::error!("API error ({}): {}", endpoint, e);
        }
        result
    }

    async fn execute(&self, request: RequestDescriptor) -> Result<Payload, ApiError> {
        let url = format!("{}{}", self.base_url, request.target());
        let anonymous = request.anonymous;
        let headers = self.headers(request.headers, anonymous);
        let body = request
            .body
            .map(|b| serde_json::to_vec(&b))
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;

        let resp = self
            .transport
            .send(HttpRequest {
                method: request.method,
                url,
                headers,
                body,
            })
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        self.handle_response(resp, anonymous)
    }

    /// Defaults first, then caller headers replacing any default of the same name.
    fn headers(&self, custom: Vec<(String, String)>, anonymous: bool) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.session.token().filter(|_| !anonymous) {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        for (name, value) in custom {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }
        headers
    }

    fn handle_response(&self, resp: RawResponse, anonymous: bool) -> Result<Payload, ApiError> {
        if resp.status == 401 && !anonymous {
            self.session.clear();
            return Err(ApiError::AuthExpired);
        }

        if !resp.is_json() {
            if !resp.is_success() {
                return Err(ApiError::Http {
                    status: resp.status,
                    message: format!("HTTP {}: {}", resp.status, resp.status_text),
                });
            }
            return Ok(Payload::Raw(resp));
        }

        let data: Value = if resp.body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))?
        };

        if !resp.is_success() {
            return Err(ApiError::Http {
                status: resp.status,
                message: error_message(&data),
            });
        }

        Ok(Payload::Json(data))
    }

    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Payload, ApiError> {
        let mut request = RequestDescriptor::new(Method::Get, path);
        for (key, value) in params {
            request = request.query(*key, value);
        }
        self.call(request).await
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Payload, ApiError> {
        self.call(with_body(Method::Post, path, body)?).await
    }

    pub async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Payload, ApiError> {
        self.call(with_body(Method::Put, path, body)?).await
    }

    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Payload, ApiError> {
        self.call(with_body(Method::Patch, path, body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<Payload, ApiError> {
        self.call(RequestDescriptor::new(Method::Delete, path)).await
    }
}

fn with_body<T: Serialize + ?Sized>(
    method: Method,
    path: &str,
    body: &T,
) -> Result<RequestDescriptor, ApiError> {
    let body = serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(RequestDescriptor::new(method, path).json(body))
}

/// `message`, then `error`, then the generic fallback. Empty, null, false and
/// zero fields are skipped; other non-string values are rendered as JSON.
fn error_message(data: &Value) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|field| data.get(field))
        .find_map(|value| match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

/// Empty JSON object, the body the web client sends when a POST has nothing to say.
pub fn empty_body() -> Value {
    Value::Object(serde_json::Map::new())
}
