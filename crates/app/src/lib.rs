//! # statehub-app
//!
//! Application layer: **port definitions** (traits) and the in-process
//! implementations behind them.
//!
//! ## Responsibilities
//! - Define the capability traits every bus and store satisfies:
//!   - `EventBus`: listen, listen once, fire, listener counts
//!   - `StateStore`: set state, get state, list categories
//! - Provide the **local** implementations that hold authoritative data:
//!   - `LocalEventBus`: listener registry with concurrent dispatch
//!   - `LocalStateStore`: category map announcing changes on a bound bus
//! - Provide `HubContext`, the explicit object owning one local bus/store pair
//!
//! ## Dependency rule
//! Depends on `statehub-domain` only (plus `tokio` for locks and the blocking
//! pool). Never imports adapter crates. The remote proxies live in an adapter
//! crate and implement the same traits.

pub mod context;
pub mod event_bus;
pub mod ports;
pub mod state_store;
