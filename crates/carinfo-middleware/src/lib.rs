//! `carinfo-middleware` – Service Runtime
//!
//! The in-process middleware surface the CarInfo service publishes through:
//! a registry of named service objects and observable attributes that fan
//! change notifications out to subscribers.
//!
//! # Modules
//!
//! - [`runtime`] – [`Runtime`][runtime::Runtime]: registers service stubs
//!   under a `(domain, instance)` address; registration returns a plain
//!   boolean, `false` when the address is already taken.
//! - [`attribute`] – [`Attribute`][attribute::Attribute]: a named, remotely
//!   observable property built on Tokio broadcast channels.  Setting it
//!   caches the latest value and notifies every subscriber.

pub mod attribute;
pub mod runtime;

pub use attribute::{Attribute, AttributeSubscription};
pub use runtime::{Runtime, ServiceStub};
