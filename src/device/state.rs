//! Simulation/real mode state machine.
//!
//! ```text
//!            sim-on               1-byte write
//!   ┌──────┐ ───────▶ ┌───────────┐ ◀──┐ (sim_byte = b)
//!   │ Real │          │ Simulated │ ───┘
//!   └──────┘ ◀─────── └───────────┘
//!            sim-off
//! ```
//!
//! In `Real`, 1-byte writes are accepted and discarded.  Unrecognized
//! commands never change anything in either mode.

use log::debug;

use super::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMode {
    /// Reads go to the sensor.
    Real,
    /// Reads return the last simulated byte.
    Simulated,
}

/// Mode flag plus the simulated reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    mode: DeviceMode,
    sim_byte: u8,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceState {
    pub const fn new() -> Self {
        Self {
            mode: DeviceMode::Real,
            sim_byte: 0,
        }
    }

    pub const fn mode(&self) -> DeviceMode {
        self.mode
    }

    pub const fn sim_byte(&self) -> u8 {
        self.sim_byte
    }

    pub const fn is_simulated(&self) -> bool {
        matches!(self.mode, DeviceMode::Simulated)
    }

    /// Apply one decoded write.
    pub fn apply(&mut self, cmd: &Command) {
        match (self.mode, cmd) {
            (_, Command::SimOn) => self.mode = DeviceMode::Simulated,
            (_, Command::SimOff) => self.mode = DeviceMode::Real,
            (DeviceMode::Simulated, Command::SetSimByte(b)) => self.sim_byte = *b,
            (DeviceMode::Real, Command::SetSimByte(b)) => {
                debug!("device: discarding data byte {:#04x} in real mode", b);
            }
            (_, Command::Unrecognized(bytes)) => {
                debug!("device: ignoring unrecognized command {:?}", bytes);
            }
        }
    }
}
