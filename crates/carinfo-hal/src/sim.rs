//! In-process simulated battery pack for CI/CD testing without vehicle
//! hardware.
//!
//! [`SimBatterySensor`] models a 3-cell lithium pack discharging under a
//! constant load.  Each [`refresh`][crate::battery::BatterySensor::refresh]
//! drains the pack by a small fixed step and recomputes the derived readings,
//! so the full CarInfo stack can run in headless tests with plausible, slowly
//! changing telemetry.
//!
//! # Example
//!
//! ```rust
//! use carinfo_hal::{BatterySensor, SimBatterySensor};
//!
//! let mut sensor = SimBatterySensor::new("piracer_battery");
//! sensor.refresh().expect("sim refresh must succeed");
//! assert!(sensor.level() <= 100.0);
//! ```

use carinfo_types::CarInfoError;
use tracing::trace;

use crate::battery::BatterySensor;

/// Pack voltage when fully charged (3 cells × 4.2 V).
const FULL_VOLTAGE: f32 = 12.6;

/// Pack voltage at the discharge cut-off (3 cells × 3.0 V).
const EMPTY_VOLTAGE: f32 = 9.0;

/// Voltage drop applied per refresh.
const DRAIN_STEP_VOLTS: f32 = 0.005;

/// Load current drawn from the pack unless overridden (amps).
const DEFAULT_LOAD_AMPS: f32 = 2.0;

/// A simulated battery power monitor.  Starts fully charged and discharges a
/// little on every refresh.  Always succeeds.
pub struct SimBatterySensor {
    id: String,
    voltage: f32,
    load_amps: f32,
    level: f32,
    consumption: f32,
    refreshes: u64,
}

impl SimBatterySensor {
    /// Create a fully charged simulated pack with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let mut sensor = Self {
            id: id.into(),
            voltage: FULL_VOLTAGE,
            load_amps: DEFAULT_LOAD_AMPS,
            level: 0.0,
            consumption: 0.0,
            refreshes: 0,
        };
        sensor.recompute();
        sensor
    }

    /// Override the simulated load current (builder-style).
    pub fn with_load_current(mut self, amps: f32) -> Self {
        self.load_amps = amps;
        self.recompute();
        self
    }

    /// Number of refreshes performed so far.  Tests use this to assert how
    /// often the publisher touched the hardware.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    // Derive level and consumption from the current voltage and load.
    fn recompute(&mut self) {
        self.level =
            ((self.voltage - EMPTY_VOLTAGE) / (FULL_VOLTAGE - EMPTY_VOLTAGE) * 100.0).clamp(0.0, 100.0);
        self.consumption = self.voltage * self.load_amps;
    }
}

impl BatterySensor for SimBatterySensor {
    fn id(&self) -> &str {
        &self.id
    }

    fn refresh(&mut self) -> Result<(), CarInfoError> {
        self.voltage = (self.voltage - DRAIN_STEP_VOLTS).max(EMPTY_VOLTAGE);
        self.recompute();
        self.refreshes += 1;
        trace!(
            sensor = %self.id,
            voltage = self.voltage,
            level = self.level,
            "simulated battery refresh"
        );
        Ok(())
    }

    fn level(&self) -> f32 {
        self.level
    }

    fn voltage(&self) -> f32 {
        self.voltage
    }

    fn current(&self) -> f32 {
        self.load_amps
    }

    fn consumption(&self) -> f32 {
        self.consumption
    }
}
