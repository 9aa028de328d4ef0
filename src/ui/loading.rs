//! Full-screen busy indicator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use super::BusyIndicator;

/// Blocking overlay, created on first use. `show`/`hide` are idempotent: the
/// indicator only hears about actual transitions.
pub struct LoadingOverlay {
    indicator: Arc<dyn BusyIndicator>,
    created: OnceLock<()>,
    visible: AtomicBool,
}

impl LoadingOverlay {
    pub fn new(indicator: Arc<dyn BusyIndicator>) -> Self {
        Self {
            indicator,
            created: OnceLock::new(),
            visible: AtomicBool::new(false),
        }
    }

    fn init(&self) {
        self.created
            .get_or_init(|| log::debug!("Loading overlay created"));
    }

    pub fn show(&self) {
        self.init();
        if !self.visible.swap(true, Ordering::SeqCst) {
            self.indicator.set_busy(true);
        }
    }

    pub fn hide(&self) {
        self.init();
        if self.visible.swap(false, Ordering::SeqCst) {
            self.indicator.set_busy(false);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}
