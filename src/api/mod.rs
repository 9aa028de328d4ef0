//! API client module for the Executive Secretary backend.
//!
//! `client::ApiClient` is the gateway: descriptor in, `Payload` or `ApiError`
//! out. The per-area modules wrap each backend endpoint as one function.

pub mod approvals;
pub mod auth;
pub mod calendar;
pub mod client;
pub mod dashboard;
pub mod emails;
pub mod error;
pub mod integrations;
pub mod mock;
pub mod notifications;
pub mod settings;
pub mod tasks;
pub mod transport;
pub mod types;


pub use client::ApiClient;
pub use error::ApiError;
pub use transport::{HttpRequest, HttpTransport, Transport, TransportError};
pub use types::{Method, Payload, RawResponse, RequestDescriptor, User};
