//! Port definitions: traits that every bus and store implements.
//!
//! Ports are the boundaries between callers and whichever implementation
//! backs them. The local implementations live in this crate, the remote
//! proxies in the remote adapter crate; consumers only see the traits.

pub mod event_bus;
pub mod state_store;

pub use event_bus::{EventBus, Listener, ListenerError, ListenerResult, listener};
pub use state_store::{StateStore, WriteOutcome};
