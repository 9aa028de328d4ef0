//! User feedback surface: toasts, the loading overlay, dialogs, navigation.
//!
//! The widgets keep their own state and talk to the screen through small
//! traits. `LogUi` is the headless implementation used by the CLI: it writes
//! every effect to the log.

pub mod loading;
pub mod modal;
pub mod toast;

use std::sync::Arc;

pub use loading::LoadingOverlay;
pub use modal::{DialogEvent, ModalRegistry};
pub use toast::{Severity, Toast, ToastCenter, ToastId};

/// Moves the user to another page (login, an OAuth provider).
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);
}

/// Renders toasts inside the container.
pub trait ToastSink: Send + Sync {
    fn show(&self, toast: &Toast);
    fn remove(&self, id: ToastId);
}

pub trait BusyIndicator: Send + Sync {
    fn set_busy(&self, busy: bool);
}

pub trait DialogSurface: Send + Sync {
    fn set_visible(&self, id: &str, visible: bool);
    fn set_scroll_locked(&self, locked: bool);
}

/// Headless UI that reports everything through `log`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogUi;

impl Navigator for LogUi {
    fn navigate(&self, target: &str) {
        log::info!("Navigate -> {}", target);
    }
}

impl ToastSink for LogUi {
    fn show(&self, toast: &Toast) {
        match toast.severity {
            Severity::Error => log::error!("[toast] {}", toast.message),
            Severity::Warning => log::warn!("[toast] {}", toast.message),
            Severity::Success | Severity::Info => log::info!("[toast] {}", toast.message),
        }
    }

    fn remove(&self, id: ToastId) {
        log::debug!("[toast] {} removed", id);
    }
}

impl BusyIndicator for LogUi {
    fn set_busy(&self, busy: bool) {
        log::debug!("Loading overlay {}", if busy { "shown" } else { "hidden" });
    }
}

impl DialogSurface for LogUi {
    fn set_visible(&self, id: &str, visible: bool) {
        log::debug!("Dialog {} {}", id, if visible { "opened" } else { "closed" });
    }

    fn set_scroll_locked(&self, locked: bool) {
        log::debug!("Background scroll {}", if locked { "locked" } else { "unlocked" });
    }
}

/// All feedback widgets for one application instance.
#[derive(Clone)]
pub struct Ui {
    pub toasts: ToastCenter,
    pub loading: Arc<LoadingOverlay>,
    pub modals: Arc<ModalRegistry>,
    pub navigator: Arc<dyn Navigator>,
}

impl Ui {
    /// Build every widget over one backend implementing all the seams.
    pub fn new<B>(backend: Arc<B>) -> Self
    where
        B: Navigator + ToastSink + BusyIndicator + DialogSurface + 'static,
    {
        Self {
            toasts: ToastCenter::new(backend.clone()),
            loading: Arc::new(LoadingOverlay::new(backend.clone())),
            modals: Arc::new(ModalRegistry::new(backend.clone())),
            navigator: backend,
        }
    }

    pub fn headless() -> Self {
        Self::new(Arc::new(LogUi))
    }
}
