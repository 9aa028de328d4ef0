//! Session manager: login, logout, and what happens when the session expires.
//!
//! The gateway only reports `AuthExpired` (after clearing the session). This
//! layer owns the follow-up policy: send the user to the login page, except in
//! demo mode where there is no login page to go to.

use std::sync::Arc;

use crate::api::types::{LoginResponse, User};
use crate::api::{self, ApiClient, ApiError};
use crate::session::Session;
use crate::ui::Ui;

pub struct AuthManager {
    api: Arc<ApiClient>,
    session: Arc<Session>,
    ui: Ui,
    login_url: String,
}

impl AuthManager {
    pub fn new(api: Arc<ApiClient>, ui: Ui, login_url: impl Into<String>) -> Self {
        let session = Arc::clone(api.session());
        Self {
            api,
            session,
            ui,
            login_url: login_url.into(),
        }
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Sign in and store the returned token and user.
    pub async fn login(&self, email: &str) -> Result<LoginResponse, ApiError> {
        log::info!("Logging in as {}", email);
        let resp = self.guard(api::auth::login(&self.api, email).await)?;

        self.session.set_token(Some(resp.token.clone()));
        self.session.set_current_user(Some(resp.user.clone()));

        log::info!("Login complete for {}", resp.user.email);
        Ok(resp)
    }

    /// Notify the backend (best effort), wipe all local state, go to login.
    pub async fn logout(&self) {
        log::info!("Logging out");

        if let Err(e) = api::auth::logout(&self.api).await {
            log::warn!("Backend logout failed (will continue local cleanup): {}", e);
        }

        self.session.clear();
        if !self.session.store().clear() {
            log::warn!("Local storage could not be cleared");
        }

        self.ui.navigator.navigate(&self.login_url);
        log::info!("Logout complete");
    }

    /// True when a token is held (or restorable). No network involved.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub fn set_token(&self, token: Option<String>) {
        self.session.set_token(token);
    }

    /// Fetch the signed-in user and cache it. Errors are returned, not swallowed.
    pub async fn load_current_user(&self) -> Result<User, ApiError> {
        let user = self.guard(api::auth::current_user(&self.api).await)?;
        self.session.set_current_user(Some(user.clone()));
        Ok(user)
    }

    /// The cached user, if `login` or `load_current_user` has run.
    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    /// Start the Google OAuth flow by navigating to the provider URL.
    pub async fn login_with_google(&self) -> Result<(), ApiError> {
        log::info!("Requesting Google OAuth URL");
        match self.guard(api::auth::google_auth_url(&self.api).await) {
            Ok(url) => {
                self.ui.navigator.navigate(&url);
                Ok(())
            }
            Err(e) => {
                log::error!("Google login failed: {}", e);
                self.ui.toasts.error("Google login failed");
                Err(e)
            }
        }
    }

    /// Apply the expiry policy to a gateway result: on `AuthExpired`, navigate
    /// to login unless running in demo mode. The result passes through as is.
    pub fn guard<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(ApiError::AuthExpired) = &result {
            if self.api.is_demo() {
                log::info!("Session expired in demo mode; staying on page");
            } else {
                log::info!("Session expired; redirecting to {}", self.login_url);
                self.ui.navigator.navigate(&self.login_url);
            }
        }
        result
    }
}
