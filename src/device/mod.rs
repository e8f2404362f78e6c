//! Byte-oriented soil moisture device.
//!
//! [`SoilDevice`] is the read/write contract external callers see:
//!
//! - `read` always yields exactly one byte: the simulated byte in
//!   simulation mode, otherwise a fresh normalized sensor reading.
//! - `write` of one byte sets the simulated byte (simulation mode only);
//!   any other length is matched as a [`Command`].  Every write reports the
//!   full length as consumed.
//!
//! Mode state and the sensor bus sit behind separate mutexes, so a write
//! arriving during a slow real-mode read is never blocked behind the bus,
//! and two readers can never interleave their two-phase transactions.

pub mod command;
pub mod state;

use std::sync::{Mutex, MutexGuard, PoisonError};

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::error::DeviceError;
use crate::sensors::{Moisture, MoistureReader, RawTransaction};

pub use command::{CMD_BUF_CAPACITY, Command, SIM_OFF_CMD, SIM_ON_CMD};
pub use state::{DeviceMode, DeviceState};

/// Source of real-mode readings behind the device.
///
/// Implemented by [`MoistureReader`]; tests substitute scripted sources.
pub trait MoistureSource {
    fn read_moisture(&mut self) -> Result<Moisture, DeviceError>;
}

impl<T: RawTransaction, D: DelayNs> MoistureSource for MoistureReader<T, D> {
    fn read_moisture(&mut self) -> Result<Moisture, DeviceError> {
        Ok(self.read()?)
    }
}

/// One soil moisture device instance.
pub struct SoilDevice<S> {
    state: Mutex<DeviceState>,
    source: Mutex<S>,
}

/// Both guarded values stay consistent even if a holder panicked: the
/// state is plain `Copy` data and the source holds no partial transaction.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: MoistureSource> SoilDevice<S> {
    /// Create a device in real mode.
    pub fn new(source: S) -> Self {
        Self {
            state: Mutex::new(DeviceState::new()),
            source: Mutex::new(source),
        }
    }

    /// Fill `buf[0]` with one moisture byte and return `Ok(1)`.
    ///
    /// An empty buffer cannot receive the byte and is a
    /// [`DeviceError::CopyFault`].
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        let Some(slot) = buf.first_mut() else {
            return Err(DeviceError::CopyFault);
        };

        let state = *lock(&self.state);
        *slot = if state.is_simulated() {
            state.sim_byte()
        } else {
            lock(&self.source).read_moisture()?
        };
        Ok(1)
    }

    /// Accept one write; always reports `buf.len()` bytes consumed.
    pub fn write(&self, buf: &[u8]) -> Result<usize, DeviceError> {
        let cmd = Command::parse(buf);
        let mut state = lock(&self.state);
        let before = state.mode();
        state.apply(&cmd);
        if state.mode() != before {
            debug!("device: mode {:?} -> {:?}", before, state.mode());
        }
        Ok(buf.len())
    }

    /// Convenience single-byte read.
    pub fn read_byte(&self) -> Result<Moisture, DeviceError> {
        let mut buf = [0u8; 1];
        self.read(&mut buf)?;
        Ok(buf[0])
    }

    pub fn mode(&self) -> DeviceMode {
        lock(&self.state).mode()
    }

    /// Snapshot of the full device state.
    pub fn snapshot(&self) -> DeviceState {
        *lock(&self.state)
    }

    pub fn into_source(self) -> S {
        self.source.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
