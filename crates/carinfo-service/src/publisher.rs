//! [`BatteryInfoPublisher`] – bridges one battery sensor to one middleware
//! attribute.
//!
//! On each publish the publisher assembles a fresh
//! [`BatteryReading`] from four scalar values – either passed in explicitly
//! or read from the bound sensor – and sets the battery attribute with it.
//! The readings are forwarded exactly as provided: no range checking, no
//! clamping, no retry.
//!
//! Collaborators are injected through the constructor; the publisher keeps
//! no state beyond the bound sensor and the attribute handle.

use std::sync::{Arc, Mutex, MutexGuard};

use carinfo_hal::BatterySensor;
use carinfo_middleware::{Attribute, Runtime, ServiceStub};
use carinfo_types::{BatteryReading, CarInfoError};

/// Interface name the publisher registers under.
pub const INTERFACE: &str = "vehicle.carinfo.BatteryInfo";

/// Service implementation publishing battery telemetry.
///
/// The sensor sits behind a [`Mutex`] so the publisher itself can be shared
/// via [`Arc`] – the same instance is registered with the runtime and driven
/// by the periodic publish loop.
pub struct BatteryInfoPublisher {
    sensor: Mutex<Box<dyn BatterySensor>>,
    battery: Attribute<BatteryReading>,
}

impl BatteryInfoPublisher {
    /// Create a publisher bound to `sensor`, publishing on `battery`.
    pub fn new(sensor: Box<dyn BatterySensor>, battery: Attribute<BatteryReading>) -> Self {
        Self {
            sensor: Mutex::new(sensor),
            battery,
        }
    }

    /// Assemble a [`BatteryReading`] from four explicit values and set the
    /// battery attribute with it.
    ///
    /// Any numeric value is accepted and forwarded unchanged, NaN and
    /// negatives included.  Returns the number of subscribers notified.
    pub fn publish_values(&self, level: f32, voltage: f32, current: f32, consumption: f32) -> usize {
        self.battery
            .set(BatteryReading::new(level, voltage, current, consumption))
    }

    /// Read each of the sensor's four accessors exactly once and publish
    /// those values unchanged.
    ///
    /// Does not refresh the sensor; call [`refresh`][Self::refresh] first to
    /// pull new values from the hardware.
    pub fn publish_from_sensor(&self) -> usize {
        let (level, voltage, current, consumption) = {
            let sensor = self.sensor();
            (
                sensor.level(),
                sensor.voltage(),
                sensor.current(),
                sensor.consumption(),
            )
        };
        self.publish_values(level, voltage, current, consumption)
    }

    /// Re-read the underlying hardware into the sensor's cached values.
    ///
    /// # Errors
    ///
    /// Propagates the sensor's [`CarInfoError::HardwareFault`] unchanged.
    pub fn refresh(&self) -> Result<(), CarInfoError> {
        self.sensor().refresh()
    }

    /// Register this publisher with `runtime` under `(domain, instance)`.
    ///
    /// Forwards the parameters unchanged and returns the runtime's boolean
    /// result as-is; no retry.  Takes the [`Arc`] by value because the
    /// runtime keeps the stub; call as
    /// `Arc::clone(&publisher).register_service(…)` to retain a handle.
    pub fn register_service(self: Arc<Self>, runtime: &Runtime, domain: &str, instance: &str) -> bool {
        runtime.register_service(domain, instance, self)
    }

    /// The most recently published reading, read back from the attribute.
    pub fn battery(&self) -> Option<BatteryReading> {
        self.battery.get()
    }

    /// Identifier of the bound sensor.
    pub fn sensor_id(&self) -> String {
        self.sensor().id().to_string()
    }

    fn sensor(&self) -> MutexGuard<'_, Box<dyn BatterySensor>> {
        self.sensor.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ServiceStub for BatteryInfoPublisher {
    fn interface(&self) -> &str {
        INTERFACE
    }
}
