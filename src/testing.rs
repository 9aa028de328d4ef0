//! Test doubles shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::transport::{HttpRequest, Transport, TransportError};
use crate::api::types::RawResponse;
use crate::storage::{MemoryBackend, StorageBackend, StorageError};
use crate::ui::{BusyIndicator, DialogSurface, Navigator, Toast, ToastId, ToastSink};

pub fn json_response(status: u16, body: Value) -> RawResponse {
    RawResponse {
        status,
        status_text: reason(status).to_string(),
        content_type: Some("application/json".to_string()),
        body: serde_json::to_vec(&body).unwrap(),
    }
}

pub fn text_response(status: u16, content_type: &str, body: &str) -> RawResponse {
    RawResponse {
        status,
        status_text: reason(status).to_string(),
        content_type: Some(content_type.to_string()),
        body: body.as_bytes().to_vec(),
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "",
    }
}

/// Transport that records every request and replays queued responses.
/// With the queue empty it answers `200 {}`.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: RawResponse) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError(message.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json_response(200, serde_json::json!({}))))
    }
}

/// UI double recording every effect.
#[derive(Default)]
pub struct RecordingUi {
    navigations: Mutex<Vec<String>>,
    shown: Mutex<Vec<Toast>>,
    removed: Mutex<Vec<ToastId>>,
    busy: Mutex<Vec<bool>>,
    scroll_locked: Mutex<bool>,
}

impl RecordingUi {
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn shown_toasts(&self) -> Vec<Toast> {
        self.shown.lock().unwrap().clone()
    }

    pub fn toast_messages(&self) -> Vec<String> {
        self.shown_toasts().into_iter().map(|t| t.message).collect()
    }

    pub fn removed_toasts(&self) -> Vec<ToastId> {
        self.removed.lock().unwrap().clone()
    }

    pub fn busy_changes(&self) -> Vec<bool> {
        self.busy.lock().unwrap().clone()
    }

    pub fn scroll_locked(&self) -> bool {
        *self.scroll_locked.lock().unwrap()
    }
}

impl Navigator for RecordingUi {
    fn navigate(&self, target: &str) {
        self.navigations.lock().unwrap().push(target.to_string());
    }
}

impl ToastSink for RecordingUi {
    fn show(&self, toast: &Toast) {
        self.shown.lock().unwrap().push(toast.clone());
    }

    fn remove(&self, id: ToastId) {
        self.removed.lock().unwrap().push(id);
    }
}

impl BusyIndicator for RecordingUi {
    fn set_busy(&self, busy: bool) {
        self.busy.lock().unwrap().push(busy);
    }
}

impl DialogSurface for RecordingUi {
    fn set_visible(&self, _id: &str, _visible: bool) {}

    fn set_scroll_locked(&self, locked: bool) {
        *self.scroll_locked.lock().unwrap() = locked;
    }
}

/// Memory backend whose removals can be switched to fail, leaving data behind.
#[derive(Default)]
pub struct RemoveFailingBackend {
    inner: MemoryBackend,
    failing: AtomicBool,
}

impl RemoveFailingBackend {
    pub fn fail_removes(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("removal refused".into()));
        }
        Ok(())
    }
}

impl StorageBackend for RemoveFailingBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value)
    }
    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.remove_item(key)
    }
    fn clear(&self) -> Result<(), StorageError> {
        self.check()?;
        self.inner.clear()
    }
}
