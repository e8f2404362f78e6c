//! Port traits: the hexagonal boundary between the monitor loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (moisture device, pump, event sinks, config storage)
//! implement these traits.  The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the loop never touches hardware directly.

use crate::config::MonitorConfig;
use crate::device::{MoistureSource, SoilDevice};
use crate::error::{DeviceError, PumpError};
use crate::sensors::Moisture;

// ───────────────────────────────────────────────────────────────
// Soil port (driven adapter: moisture device ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented access to a moisture device.
pub trait SoilPort {
    /// Read one normalized moisture byte.
    fn read_moisture(&mut self) -> Result<Moisture, DeviceError>;

    /// Write raw bytes (a data byte or a command string).
    /// Returns the number of bytes the device consumed.
    fn send(&mut self, bytes: &[u8]) -> Result<usize, DeviceError>;
}

impl<S: MoistureSource> SoilPort for SoilDevice<S> {
    fn read_moisture(&mut self) -> Result<Moisture, DeviceError> {
        self.read_byte()
    }

    fn send(&mut self, bytes: &[u8]) -> Result<usize, DeviceError> {
        self.write(bytes)
    }
}

impl<S: MoistureSource> SoilPort for &SoilDevice<S> {
    fn read_moisture(&mut self) -> Result<Moisture, DeviceError> {
        self.read_byte()
    }

    fn send(&mut self, bytes: &[u8]) -> Result<usize, DeviceError> {
        self.write(bytes)
    }
}

// ───────────────────────────────────────────────────────────────
// Pump port (driven adapter: domain → GPIO)
// ───────────────────────────────────────────────────────────────

/// Pump relay control.
///
/// Operations must follow `enable → (on | off)* → disable`; anything out of
/// sequence fails with [`PumpError::Sequence`].
pub trait PumpPort {
    /// Claim the pin and drive it as an output.
    fn enable(&mut self) -> Result<(), PumpError>;

    /// Stop driving the pin and release it.
    fn disable(&mut self) -> Result<(), PumpError>;

    /// Start the pump.
    fn on(&mut self) -> Result<(), PumpError>;

    /// Stop the pump.
    fn off(&mut self) -> Result<(), PumpError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`MonitorEvent`](super::events::MonitorEvent)s through
/// this port.  Adapters decide where they go (log, message bus, ...).
/// Sinks swallow their own failures.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MonitorEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists monitor configuration.
///
/// Implementations MUST validate before persisting and reject invalid
/// ranges with [`ConfigError::ValidationFailed`], not clamp them.
pub trait ConfigPort {
    /// Load configuration.
    /// Returns [`MonitorConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<MonitorConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed to deserialize.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Corrupted => Self::Config("config corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
            ConfigError::IoError => Self::Config("config I/O error"),
        }
    }
}
