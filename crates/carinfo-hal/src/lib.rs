//! `carinfo-hal` – Vehicle Hardware Abstraction
//!
//! Driver-facing traits for the telemetry sources the CarInfo service
//! publishes from.  The rest of the stack only ever talks to the traits, so
//! drivers can be swapped without touching the publisher or the middleware.
//!
//! # Modules
//!
//! - [`battery`] – [`BatterySensor`][battery::BatterySensor]: the battery
//!   telemetry contract (one fallible refresh, four infallible accessors).
//! - [`sim`] – [`SimBatterySensor`][sim::SimBatterySensor]: an in-process
//!   simulated battery pack for headless tests and CI pipelines.

pub mod battery;
pub mod sim;

pub use battery::BatterySensor;
pub use sim::SimBatterySensor;
