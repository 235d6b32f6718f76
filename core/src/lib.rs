//! Form controller core for the HttpCookies inspector page.
//!
//! # Overview
//! The page lets a user pick a method and a URL, optionally add headers and
//! a body, and asks a server endpoint to perform the request. The endpoint
//! answers with the status, cookies and headers it saw, which the controller
//! renders as HTML.
//!
//! # Design
//! - Host-does-IO: the controller builds an `HttpRequest` and parses the
//!   `HttpResponse`; the host executes the round-trip in between.
//! - The UI is reached only through the `ViewBinding` trait, so the same
//!   controller drives a browser binding or the headless `MemoryView`.
//! - Rendering keeps the trust boundary explicit: the endpoint's `error`
//!   text is inserted verbatim, cookie and header data is escaped.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod multipart;
pub mod render;
pub mod types;
pub mod view;

pub use client::InspectorClient;
pub use config::ControllerConfig;
pub use controller::{Completion, FormController, PendingSubmission, SubmissionTicket, UiState};
pub use error::{ApiError, ConfigError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::{escape_html, Trust};
pub use types::{Cookie, Header, InspectionResult, ResultPayload, SubmissionRequest};
pub use view::{MemoryView, Role, ViewBinding};
