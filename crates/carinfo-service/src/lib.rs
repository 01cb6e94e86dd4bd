//! `carinfo-service` – Battery Info Service
//!
//! The glue between one battery telemetry source and one middleware
//! attribute, plus the `carinfod` daemon that drives it on a timer.
//!
//! # Modules
//!
//! - [`publisher`] – [`BatteryInfoPublisher`][publisher::BatteryInfoPublisher]:
//!   reads the sensor's four values, assembles a
//!   [`BatteryReading`][carinfo_types::BatteryReading], and sets the battery
//!   attribute; also forwards service registration to the runtime.
//! - [`config`] – persisted daemon configuration
//!   (`~/.carinfo/config.toml`) with `CARINFO_*` environment overrides.

pub mod config;
pub mod publisher;

pub use publisher::BatteryInfoPublisher;
