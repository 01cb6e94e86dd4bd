use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Battery level below which [`BatteryReading::is_low`] reports true (percent).
pub const LOW_LEVEL_PERCENT: f32 = 20.0;

/// Battery level below which [`BatteryReading::is_critical`] reports true (percent).
pub const CRITICAL_LEVEL_PERCENT: f32 = 10.0;

/// One battery telemetry snapshot.
///
/// Four independent scalar measurements with no cross-field invariant.  A
/// fresh value is assembled on every publish and handed to the middleware
/// attribute; the attribute keeps its own copy.
///
/// Readings are forwarded exactly as the sensor reported them.  No range
/// checking is performed anywhere in the stack, so NaN or negative values
/// travel through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryReading {
    /// State of charge in percent (0–100 for a healthy sensor).
    pub level: f32,
    /// Pack voltage in volts.
    pub voltage: f32,
    /// Discharge current in amps.
    pub current: f32,
    /// Power draw in watts.
    pub consumption: f32,
}

impl BatteryReading {
    /// Assemble a reading from the four raw measurements.
    pub fn new(level: f32, voltage: f32, current: f32, consumption: f32) -> Self {
        Self {
            level,
            voltage,
            current,
            consumption,
        }
    }

    /// Charge below [`LOW_LEVEL_PERCENT`].
    pub fn is_low(&self) -> bool {
        self.level < LOW_LEVEL_PERCENT
    }

    /// Charge below [`CRITICAL_LEVEL_PERCENT`].
    pub fn is_critical(&self) -> bool {
        self.level < CRITICAL_LEVEL_PERCENT
    }
}

/// Change notification delivered to attribute subscribers.
///
/// Every attribute set stamps the new value with a unique id and a UTC
/// timestamp so downstream consumers can correlate and order updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeUpdate<T> {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// The attribute's new value.
    pub value: T,
}

/// Global error type spanning sensor faults and configuration problems.
#[derive(Error, Debug)]
pub enum CarInfoError {
    #[error("Hardware Fault on {component}: {details}")]
    HardwareFault { component: String, details: String },

    #[error("Configuration Error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_reading_holds_constructor_values() {
        let reading = BatteryReading::new(80.0, 12.5, 2.5, 10.0);
        assert!((reading.level - 80.0).abs() < f32::EPSILON);
        assert!((reading.voltage - 12.5).abs() < f32::EPSILON);
        assert!((reading.current - 2.5).abs() < f32::EPSILON);
        assert!((reading.consumption - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn battery_reading_serialization_roundtrip() {
        let reading = BatteryReading::new(55.5, 11.8, 1.2, 14.16);
        let json = serde_json::to_string(&reading).unwrap();
        let back: BatteryReading = serde_json::from_str(&json).unwrap();
        assert_eq!(reading, back);
    }

    #[test]
    fn low_and_critical_thresholds() {
        assert!(!BatteryReading::new(20.0, 12.0, 1.0, 12.0).is_low());
        assert!(BatteryReading::new(19.9, 12.0, 1.0, 12.0).is_low());

        assert!(!BatteryReading::new(10.0, 11.0, 1.0, 11.0).is_critical());
        let critical = BatteryReading::new(9.9, 11.0, 1.0, 11.0);
        assert!(critical.is_critical());
        assert!(critical.is_low(), "critical charge is also low");
    }

    #[test]
    fn nan_and_negative_readings_are_stored_verbatim() {
        let reading = BatteryReading::new(f32::NAN, -1.0, 0.0, 0.0);
        assert!(reading.level.is_nan());
        assert!(reading.voltage < 0.0);
    }

    #[test]
    fn attribute_update_roundtrip() {
        let update = AttributeUpdate {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            value: BatteryReading::new(80.0, 12.5, 2.5, 10.0),
        };
        let json = serde_json::to_string(&update).unwrap();
        let back: AttributeUpdate<BatteryReading> = serde_json::from_str(&json).unwrap();
        assert_eq!(update.id, back.id);
        assert_eq!(update.value, back.value);
    }

    #[test]
    fn car_info_error_display() {
        let err = CarInfoError::HardwareFault {
            component: "piracer_battery".to_string(),
            details: "i2c read timed out".to_string(),
        };
        assert!(err.to_string().contains("piracer_battery"));

        let err2 = CarInfoError::Config("missing field".to_string());
        assert!(err2.to_string().contains("missing field"));
    }
}
