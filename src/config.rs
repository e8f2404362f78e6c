//! Monitor configuration parameters
//!
//! All tunable parameters for the soil monitor.  Values are loaded through
//! a [`ConfigPort`](crate::app::ports::ConfigPort); anything missing falls
//! back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Longest pump run accepted from configuration (seconds).
pub const MAX_PUMP_SECS: u32 = 600;

/// Longest sleep whose millisecond value still fits the delay argument.
pub const MAX_SLEEP_SECS: u32 = u32::MAX / 1000;

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // --- Watering ---
    /// Water when the normalized reading is below this (0-255)
    pub target_moisture: u8,
    /// Pump run time per watering (seconds)
    pub pump_secs: u32,

    // --- Timing ---
    /// Wait between readings (seconds)
    pub sleep_secs: u32,

    // --- Device ---
    /// Put the device in simulation mode at start
    pub simulate: bool,
    /// I2C bus the sensor hangs off
    pub i2c_bus: String,
    /// Use an external driver node instead of the in-process device
    pub device_node: Option<String>,

    // --- Pump GPIO ---
    /// sysfs GPIO class directory
    pub gpio_root: String,
    /// Pump relay pin number
    pub gpio_pin: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Watering
            target_moisture: 0x80,
            pump_secs: 5,

            // Timing
            sleep_secs: 3600, // hourly

            // Device
            simulate: false,
            i2c_bus: "/dev/i2c-1".into(),
            device_node: None,

            // Pump GPIO
            gpio_root: "/sys/class/gpio".into(),
            gpio_pin: 17,
        }
    }
}

impl MonitorConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sleep_secs == 0 {
            return Err(ConfigError::ValidationFailed("sleep_secs must be > 0"));
        }
        if self.sleep_secs > MAX_SLEEP_SECS {
            return Err(ConfigError::ValidationFailed("sleep_secs exceeds limit"));
        }
        if self.pump_secs == 0 {
            return Err(ConfigError::ValidationFailed("pump_secs must be > 0"));
        }
        if self.pump_secs > MAX_PUMP_SECS {
            return Err(ConfigError::ValidationFailed("pump_secs exceeds limit"));
        }
        if self.i2c_bus.is_empty() {
            return Err(ConfigError::ValidationFailed("i2c_bus is empty"));
        }
        if self.gpio_root.is_empty() {
            return Err(ConfigError::ValidationFailed("gpio_root is empty"));
        }
        if self.device_node.as_deref() == Some("") {
            return Err(ConfigError::ValidationFailed("device_node is empty"));
        }
        Ok(())
    }

    pub fn pump_ms(&self) -> u32 {
        self.pump_secs.saturating_mul(1000)
    }

    pub fn sleep_ms(&self) -> u32 {
        self.sleep_secs.saturating_mul(1000)
    }
}
