//! Named dialogs with background scroll lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::DialogSurface;

/// Key name that dismisses open dialogs.
pub const CANCEL_KEY: &str = "Escape";

/// User input a dialog reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    BackdropClick(String),
    CloseButton(String),
    Key(String),
}

/// Registered dialogs and whether each is open.
pub struct ModalRegistry {
    surface: Arc<dyn DialogSurface>,
    dialogs: Mutex<HashMap<String, bool>>,
}

impl ModalRegistry {
    pub fn new(surface: Arc<dyn DialogSurface>) -> Self {
        Self {
            surface,
            dialogs: Mutex::new(HashMap::new()),
        }
    }

    /// Make a dialog known, closed. Registering twice keeps its current state.
    pub fn register(&self, id: &str) {
        self.dialogs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id.to_string())
            .or_insert(false);
    }

    /// Show `id` and lock background scroll. Unknown ids are ignored.
    pub fn open(&self, id: &str) -> bool {
        if !self.set_open(id, true) {
            return false;
        }
        self.surface.set_visible(id, true);
        self.surface.set_scroll_locked(true);
        true
    }

    /// Hide `id` and unlock background scroll. Unknown ids are ignored.
    pub fn close(&self, id: &str) -> bool {
        if !self.set_open(id, false) {
            return false;
        }
        self.surface.set_visible(id, false);
        self.surface.set_scroll_locked(false);
        true
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.dialogs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .copied()
            .unwrap_or(false)
    }

    /// Route a dismissal input. Returns the dialogs that were closed.
    pub fn handle(&self, event: &DialogEvent) -> Vec<String> {
        let targets: Vec<String> = match event {
            DialogEvent::BackdropClick(id) | DialogEvent::CloseButton(id) => vec![id.clone()],
            DialogEvent::Key(key) if key == CANCEL_KEY => self
                .dialogs
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .filter(|(_, open)| **open)
                .map(|(id, _)| id.clone())
                .collect(),
            DialogEvent::Key(_) => Vec::new(),
        };

        targets
            .into_iter()
            .filter(|id| self.is_open(id) && self.close(id))
            .collect()
    }

    fn set_open(&self, id: &str, open: bool) -> bool {
        match self
            .dialogs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(id)
        {
            Some(state) => {
                *state = open;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingUi;

    fn registry() -> (ModalRegistry, Arc<RecordingUi>) {
        let ui = Arc::new(RecordingUi::default());
        let modals = ModalRegistry::new(ui.clone());
        modals.register("taskModal");
        (modals, ui)
    }

    #[test]
    fn test_open_and_close_toggle_scroll_lock() {
        let (modals, ui) = registry();
        assert!(modals.open("taskModal"));
        assert!(modals.is_open("taskModal"));
        assert!(ui.scroll_locked());

        assert!(modals.close("taskModal"));
        assert!(!modals.is_open("taskModal"));
        assert!(!ui.scroll_locked());
    }

    #[test]
    fn test_unknown_dialog_is_ignored() {
        let (modals, ui) = registry();
        assert!(!modals.open("missing"));
        assert!(!ui.scroll_locked());
    }

    #[test]
    fn test_backdrop_and_close_button_dismiss() {
        let (modals, _) = registry();
        modals.open("taskModal");
        assert_eq!(
            modals.handle(&DialogEvent::BackdropClick("taskModal".into())),
            vec!["taskModal".to_string()]
        );

        modals.open("taskModal");
        assert_eq!(
            modals.handle(&DialogEvent::CloseButton("taskModal".into())),
            vec!["taskModal".to_string()]
        );
    }

    #[test]
    fn test_cancel_key_only_acts_while_open() {
        let (modals, _) = registry();
        assert!(modals.handle(&DialogEvent::Key(CANCEL_KEY.into())).is_empty());

        modals.open("taskModal");
        assert!(modals.handle(&DialogEvent::Key("Enter".into())).is_empty());
        assert!(modals.is_open("taskModal"));

        assert_eq!(
            modals.handle(&DialogEvent::Key(CANCEL_KEY.into())),
            vec!["taskModal".to_string()]
        );
        assert!(!modals.is_open("taskModal"));
    }
}
