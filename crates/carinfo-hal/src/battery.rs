//! Generic `BatterySensor` trait for battery power monitors.
//!
//! Drivers implement this trait and are handed to the publisher at
//! construction time.  A driver caches its readings: [`refresh`]
//! re-reads the underlying hardware, the four accessors return the values
//! from the most recent refresh.
//!
//! [`refresh`]: BatterySensor::refresh

use carinfo_types::CarInfoError;

/// A battery power monitor (e.g. the current/voltage sensor on a vehicle's
/// main pack).
///
/// The accessors are infallible and return whatever the last refresh
/// produced; they perform no range checking, so a faulty sensor's NaN or
/// negative readings are reported as-is.
pub trait BatterySensor: Send + Sync {
    /// Stable identifier for this sensor, e.g. `"piracer_battery"`.
    fn id(&self) -> &str;

    /// Re-read the underlying hardware into the cached readings.
    ///
    /// # Errors
    ///
    /// Returns [`CarInfoError::HardwareFault`] when the hardware cannot be
    /// read (bus timeout, device absent, …).  The cached readings keep their
    /// previous values in that case.
    fn refresh(&mut self) -> Result<(), CarInfoError>;

    /// State of charge in percent from the last refresh.
    fn level(&self) -> f32;

    /// Pack voltage in volts from the last refresh.
    fn voltage(&self) -> f32;

    /// Discharge current in amps from the last refresh.
    fn current(&self) -> f32;

    /// Power draw in watts from the last refresh.
    fn consumption(&self) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal in-process sensor used only for tests.
    struct MockBatterySensor {
        id: String,
        refreshed: bool,
    }

    impl MockBatterySensor {
        fn new(id: &str) -> Self {
            Self {
                id: id.to_string(),
                refreshed: false,
            }
        }
    }

    impl BatterySensor for MockBatterySensor {
        fn id(&self) -> &str {
            &self.id
        }

        fn refresh(&mut self) -> Result<(), CarInfoError> {
            self.refreshed = true;
            Ok(())
        }

        fn level(&self) -> f32 {
            if self.refreshed { 80.0 } else { 0.0 }
        }

        fn voltage(&self) -> f32 {
            12.5
        }

        fn current(&self) -> f32 {
            2.5
        }

        fn consumption(&self) -> f32 {
            10.0
        }
    }

    #[test]
    fn mock_sensor_refresh_updates_readings() {
        let mut sensor = MockBatterySensor::new("pack");
        assert_eq!(sensor.id(), "pack");
        assert!((sensor.level() - 0.0).abs() < f32::EPSILON);

        sensor.refresh().unwrap();
        assert!((sensor.level() - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn trait_object_is_usable_behind_a_box() {
        let mut sensor: Box<dyn BatterySensor> = Box::new(MockBatterySensor::new("pack"));
        sensor.refresh().unwrap();
        assert!((sensor.voltage() - 12.5).abs() < f32::EPSILON);
        assert!((sensor.consumption() - 10.0).abs() < f32::EPSILON);
    }
}
