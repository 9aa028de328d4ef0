//! Toast notifications.
//!
//! Toasts stack in one container created on first use. Each toast with a
//! non-zero duration owns a timer task that removes it; a zero duration makes
//! it persistent until dismissed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;

use super::ToastSink;

/// Auto-hide delay used by the severity helpers.
pub const DEFAULT_DURATION_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type ToastId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    /// 0 means persistent.
    pub auto_hide_ms: u64,
}

struct Inner {
    sink: Arc<dyn ToastSink>,
    container: OnceLock<Mutex<Vec<Toast>>>,
    next_id: AtomicU64,
}

impl Inner {
    fn container(&self) -> &Mutex<Vec<Toast>> {
        self.container.get_or_init(|| {
            log::debug!("Toast container created");
            Mutex::new(Vec::new())
        })
    }

    fn remove(&self, id: ToastId) -> bool {
        let removed = {
            let mut toasts = self
                .container()
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        };
        if removed {
            self.sink.remove(id);
        }
        removed
    }
}

/// Handle to the toast container. Cloning shares the same container.
#[derive(Clone)]
pub struct ToastCenter {
    inner: Arc<Inner>,
}

impl ToastCenter {
    pub fn new(sink: Arc<dyn ToastSink>) -> Self {
        Self {
            inner: Arc::new(Inner {
                sink,
                container: OnceLock::new(),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Show a toast. With `duration_ms > 0` it is removed after that delay
    /// (needs a tokio runtime; without one it stays until dismissed).
    pub fn show(&self, message: impl Into<String>, severity: Severity, duration_ms: u64) -> ToastId {
        let toast = Toast {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
            message: message.into(),
            severity,
            auto_hide_ms: duration_ms,
        };
        let id = toast.id;

        self.inner
            .container()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast.clone());
        self.inner.sink.show(&toast);

        if duration_ms > 0 {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let inner = Arc::clone(&self.inner);
                    handle.spawn(async move {
                        tokio::time::sleep(Duration::from_millis(duration_ms)).await;
                        inner.remove(id);
                    });
                }
                Err(_) => log::warn!("No async runtime; toast {} will not auto-hide", id),
            }
        }
        id
    }

    /// Remove a toast now. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.inner.remove(id)
    }

    /// Toasts currently on screen, oldest first.
    pub fn visible(&self) -> Vec<Toast> {
        self.inner
            .container()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.show(message, Severity::Success, DEFAULT_DURATION_MS)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.show(message, Severity::Error, DEFAULT_DURATION_MS)
    }

    pub fn warning(&self, message: impl Into<String>) -> ToastId {
        self.show(message, Severity::Warning, DEFAULT_DURATION_MS)
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.show(message, Severity::Info, DEFAULT_DURATION_MS)
    }
}
