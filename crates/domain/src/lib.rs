//! # statehub-domain
//!
//! Pure domain model for the statehub control plane.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Events** (named occurrences with a JSON object payload)
//! - Define **States** (the current value of a category plus its attributes)
//! - Enforce the `last_changed` invariant: it only moves when the value moves
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod state;
