//! # statehub-adapter-remote
//!
//! Client-side proxies for a statehub reachable over HTTP.
//!
//! ## Responsibilities
//! - `RemoteEventBus`: implements the `EventBus` port by forwarding `fire`
//!   and `listeners` to the remote `/api/events` endpoints
//! - `RemoteStateStore`: implements the `StateStore` port on top of the
//!   remote `/api/states` endpoints
//! - `Bridge`: a local store announcing its changes on a remote bus
//!
//! The proxies hold no data: every call is a live round trip. A remote
//! "unknown category" answer maps to `None`; any other failure surfaces as
//! `HubError::Remote` so it is never mistaken for a missing category.
//!
//! ## Dependency rule
//! Depends on `statehub-app` (port traits) and `statehub-domain` only. The
//! wire contract is the one served by the HTTP adapter.

pub mod bridge;
pub mod client;
pub mod error;
pub mod event_bus;
pub mod state_store;

pub use bridge::{Bridge, bridge};
pub use client::HubClient;
pub use error::RemoteError;
pub use event_bus::RemoteEventBus;
pub use state_store::RemoteStateStore;
