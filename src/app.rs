//! Application context.
//!
//! `App` wires config, storage, session, gateway, auth and UI together. It is
//! constructed explicitly and handed to whoever needs it; there is no global
//! instance. Lifecycle is `initialize` / `reset`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::transport::{HttpTransport, Transport};
use crate::api::types::{Method, RequestDescriptor, User};
use crate::api::{ApiClient, ApiError};
use crate::auth::AuthManager;
use crate::config::{ClientConfig, StorageKind};
use crate::session::Session;
use crate::storage::{FileBackend, KeychainBackend, LocalStore, MemoryBackend, StorageBackend};
use crate::ui::{Severity, Ui};

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How often the background checker asks the backend for its version.
pub const UPDATE_CHECK_INTERVAL: Duration = Duration::from_secs(30 * 60);

pub const INIT_FAILED_MESSAGE: &str = "Failed to initialize application";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";
pub const ONLINE_MESSAGE: &str = "Back online";
pub const OFFLINE_MESSAGE: &str = "You are offline. Changes will sync when back online.";

/// Snapshot of application status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub version: &'static str,
    pub initialized: bool,
    pub user: Option<User>,
    pub online: bool,
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    version: Option<String>,
}

pub struct App {
    config: ClientConfig,
    session: Arc<Session>,
    api: Arc<ApiClient>,
    auth: AuthManager,
    ui: Ui,
    initialized: AtomicBool,
    online: AtomicBool,
}

impl App {
    pub fn new(config: ClientConfig, store: LocalStore, transport: Arc<dyn Transport>, ui: Ui) -> Self {
        let session = Arc::new(Session::init(store));
        let api = Arc::new(ApiClient::new(
            config.effective_base_url(),
            config.demo_mode,
            Arc::clone(&session),
            transport,
        ));
        let auth = AuthManager::new(Arc::clone(&api), ui.clone(), config.login_url());

        Self {
            config,
            session,
            api,
            auth,
            ui,
            initialized: AtomicBool::new(false),
            online: AtomicBool::new(true),
        }
    }

    /// Production wiring: configured storage, reqwest transport, headless UI.
    pub fn from_config(config: ClientConfig) -> Self {
        let backend: Arc<dyn StorageBackend> = match config.storage {
            StorageKind::File => Arc::new(FileBackend::new(config.storage_path.clone())),
            StorageKind::Keychain => Arc::new(KeychainBackend::new()),
            StorageKind::Memory => Arc::new(MemoryBackend::new()),
        };
        let transport = Arc::new(HttpTransport::new(config.timeout, config.connect_timeout));
        Self::new(config, LocalStore::new(backend), transport, Ui::headless())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Startup sequence.
    ///
    /// Returns `Ok(false)` when the user has to log in first (the login page
    /// has been requested). A failure to load the user shows an error toast
    /// and is returned.
    pub async fn initialize(&self) -> Result<bool, ApiError> {
        if self.is_initialized() {
            return Ok(true);
        }
        log::info!("Executive Secretary AI v{} - Initializing...", APP_VERSION);

        if self.config.demo_mode {
            log::info!("DEMO MODE: Skipping authentication");
        } else if !self.auth.is_authenticated() {
            log::info!("User not authenticated, redirecting to login...");
            self.ui.navigator.navigate(self.auth.login_url());
            return Ok(false);
        }

        self.ui.loading.show();
        let result = self.auth.load_current_user().await;
        self.ui.loading.hide();

        if let Err(e) = result {
            log::error!("Application initialization error: {}", e);
            self.ui.toasts.error(INIT_FAILED_MESSAGE);
            return Err(e);
        }

        self.initialized.store(true, Ordering::SeqCst);
        log::info!("Executive Secretary AI initialized successfully");
        Ok(true)
    }

    /// Forget in-memory state; the next `initialize` starts over.
    pub fn reset(&self) {
        self.initialized.store(false, Ordering::SeqCst);
        self.session.reset();
    }

    /// Connectivity changed. Only real transitions raise a toast.
    pub fn set_online(&self, online: bool) {
        if self.online.swap(online, Ordering::SeqCst) == online {
            return;
        }
        if online {
            self.ui.toasts.success(ONLINE_MESSAGE);
        } else {
            self.ui.toasts.warning(OFFLINE_MESSAGE);
        }
    }

    /// Ask the backend for its version. A newer one raises a persistent toast
    /// and is returned; failures are only logged. The request carries no
    /// session token and cannot end the session.
    pub async fn check_for_updates(&self) -> Option<String> {
        if self.config.demo_mode {
            return None;
        }

        let request = RequestDescriptor::new(Method::Get, "/version").anonymous();
        let resp = match self.api.call(request).await {
            Ok(payload) => payload.decode::<VersionResponse>(),
            Err(e) => Err(e),
        };
        let latest = match resp {
            Ok(VersionResponse { version: Some(v) }) if !v.is_empty() => v,
            Ok(_) => return None,
            Err(e) => {
                log::debug!("Update check failed: {}", e);
                return None;
            }
        };

        if latest == APP_VERSION {
            return None;
        }
        self.ui.toasts.show(
            format!("New version {} available. Reload to update.", latest),
            Severity::Info,
            0,
        );
        Some(latest)
    }

    /// Run `check_for_updates` every `UPDATE_CHECK_INTERVAL` until aborted.
    pub fn spawn_update_checker(app: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(UPDATE_CHECK_INTERVAL);
            // The first tick completes immediately; the first check runs one interval in.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                app.check_for_updates().await;
            }
        })
    }

    /// Last-resort handler for failures nobody caught.
    ///
    /// Always logs. Shows the generic error toast unless the failure is
    /// authentication related (the session layer already acted) or a
    /// script-loading error. Returns whether a toast was shown.
    pub fn report_unhandled(&self, error: &(dyn std::error::Error + 'static)) -> bool {
        log::error!("Unhandled error: {}", error);
        if is_auth_related(error) || is_script_load_error(error) {
            return false;
        }
        self.ui.toasts.error(UNEXPECTED_ERROR_MESSAGE);
        true
    }

    pub fn info(&self) -> AppInfo {
        AppInfo {
            version: APP_VERSION,
            initialized: self.is_initialized(),
            user: self.auth.current_user(),
            online: self.online.load(Ordering::SeqCst),
        }
    }
}

fn is_auth_related(error: &(dyn std::error::Error + 'static)) -> bool {
    error
        .downcast_ref::<ApiError>()
        .map_or(false, ApiError::is_auth_expired)
        || error.to_string().contains("401")
}

fn is_script_load_error(error: &(dyn std::error::Error + 'static)) -> bool {
    error.to_string().contains("Script error")
}
