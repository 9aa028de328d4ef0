//! Authentication endpoints.

use super::client::{empty_body, ApiClient};
use super::error::ApiError;
use super::types::{CurrentUserResponse, LoginRequest, LoginResponse, OAuthUrlResponse, User};

pub const DEMO_TOKEN: &str = "demo-token";
pub const DEMO_USER_NAME: &str = "Demo User";

/// POST /auth/login
///
/// Demo mode answers with a fixed token and the given identifier without any
/// network call.
pub async fn login(client: &ApiClient, email: &str) -> Result<LoginResponse, ApiError> {
    if client.is_demo() {
        return Ok(LoginResponse {
            token: DEMO_TOKEN.to_string(),
            user: User {
                email: email.to_string(),
                full_name: DEMO_USER_NAME.to_string(),
            },
        });
    }

    let request = LoginRequest {
        email: email.to_string(),
    };
    client.post("/auth/login", &request).await?.decode()
}

/// POST /auth/logout. Demo mode has nothing to notify.
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    if client.is_demo() {
        return Ok(());
    }
    client.post("/auth/logout", &empty_body()).await?;
    Ok(())
}

/// GET /auth/me
pub async fn current_user(client: &ApiClient) -> Result<User, ApiError> {
    let resp: CurrentUserResponse = client.get("/auth/me", &[]).await?.decode()?;
    Ok(resp.into_user())
}

/// GET /auth/google/url, returning the provider URL to send the user to.
pub async fn google_auth_url(client: &ApiClient) -> Result<String, ApiError> {
    let resp: OAuthUrlResponse = client.get("/auth/google/url", &[]).await?.decode()?;
    resp.url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::Decode("OAuth URL not returned".to_string()))
}
