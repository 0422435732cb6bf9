//! Headless client core for the posts service.
//!
//! # Overview
//! Two layers. The access layer turns the five post operations into HTTP
//! round-trips against one configured base URL and reports every failure
//! as a `TransportError`. The view controllers (list, detail, form) own
//! per-screen state and call the access layer on mount and on user
//! actions; a host UI renders their state and performs the navigation they
//! return.
//!
//! # Design
//! - `PostClient` is stateless and never does I/O: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`. A `Transport`
//!   executes the request in between (host-does-IO).
//! - `PostApi` composes the two, logs failures, and implements
//!   `PostAccess`, the seam controllers are generic over.
//! - Notifications go through an injected `Notifier`; there is no global
//!   registry.
//! - Loads are keyed by their trigger through `FetchGuard`, so late results
//!   for an abandoned screen are dropped.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod access;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod http;
pub mod notify;
pub mod route;
pub mod transport;
pub mod types;
pub mod views;

pub use access::{PostAccess, PostApi};
pub use client::PostClient;
pub use config::Config;
pub use error::{ConfigError, TransportError, TransportErrorKind, ValidationError};
pub use format::{format_created_at, format_timestamp, DateStyle};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use notify::{Notification, Notifier, Severity};
pub use route::Route;
pub use transport::{Transport, UreqTransport};
pub use types::{Post, PostDraft, PostId, Saved};
pub use views::{DetailView, FormMode, FormView, ListView};
