//! Unified error types for the soil monitor.
//!
//! Errors are layered the same way the read path is: a bus transfer fault
//! becomes a sensor fault, which becomes a device fault at the byte-oriented
//! read/write boundary.  The monitor loop funnels everything into [`Error`].
//! All variants are `Copy` so they can be logged and returned without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Bus transfer errors
// ---------------------------------------------------------------------------

/// One phase of the two-phase register transaction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    /// The 2-byte register address write failed or was short.
    Send,
    /// The 2-byte value read failed or was short.
    Recv,
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Send => write!(f, "register address send failed"),
            Self::Recv => write!(f, "register value receive failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The bus transaction itself failed.  Never retried.
    Transfer(TransferError),
    /// Every allotted attempt produced a value outside `[0, 4095]`.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer(e) => write!(f, "transfer: {e}"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<TransferError> for SensorError {
    fn from(e: TransferError) -> Self {
        Self::Transfer(e)
    }
}

// ---------------------------------------------------------------------------
// Device errors
// ---------------------------------------------------------------------------

/// Failure at the byte-oriented read/write boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// A real-mode read failed in the sensor chain.
    Sensor(SensorError),
    /// Bytes could not be moved between the caller's buffer and the device.
    CopyFault,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::CopyFault => write!(f, "buffer copy fault"),
        }
    }
}

impl From<SensorError> for DeviceError {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

impl From<TransferError> for DeviceError {
    fn from(e: TransferError) -> Self {
        Self::Sensor(SensorError::Transfer(e))
    }
}

// ---------------------------------------------------------------------------
// Pump errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpError {
    /// Operation called out of the enable → on/off → disable sequence.
    Sequence,
    /// The GPIO control surface rejected the write.
    Io,
}

impl fmt::Display for PumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence => write!(f, "pump operation out of sequence"),
            Self::Io => write!(f, "GPIO write failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation of the monitor loop funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Reading or commanding the moisture device failed.
    Device(DeviceError),
    /// Pump actuation failed.
    Pump(PumpError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(e) => write!(f, "device: {e}"),
            Self::Pump(e) => write!(f, "pump: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl From<DeviceError> for Error {
    fn from(e: DeviceError) -> Self {
        Self::Device(e)
    }
}

impl From<PumpError> for Error {
    fn from(e: PumpError) -> Self {
        Self::Pump(e)
    }
}

impl std::error::Error for TransferError {}
impl std::error::Error for SensorError {}
impl std::error::Error for DeviceError {}
impl std::error::Error for PumpError {}
impl std::error::Error for Error {}

/// Monitor-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
