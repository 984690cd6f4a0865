//! # statehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** (`/api/states`, `/api/states/{category}`,
//!   `/api/events`, `/api/events/{event_type}`)
//! - Serve the **debug forms** (`/change_state`, `/fire_event`) and the root
//!   page, rendered server-side with zero JavaScript
//! - Gate every API and debug call on the shared `api_password`, before any
//!   payload is decoded or any store/bus call is made
//! - Map store and bus results into HTTP responses (JSON or HTML)
//!
//! ## Dependency rule
//! Depends on `statehub-app` (for the port traits) and `statehub-domain`
//! (for the types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;

/// Default TCP port of the network endpoint.
pub const SERVER_PORT: u16 = 8123;

#[cfg(test)]
mod test_support;
