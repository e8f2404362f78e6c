//! Water pump relay driver.
//!
//! The pump is switched by one GPIO line.  Both drivers enforce the same
//! sequence so the relay is never driven from an unclaimed pin:
//!
//! ```text
//!   Disabled ──enable──▶ Off ◀──off── On
//!      ▲                  │ ──on──▶ ▲
//!      └────disable───────┴─────────┘
//! ```
//!
//! - [`SysfsPump`] drives the line through the Linux sysfs GPIO class
//!   (`export`, `gpioN/direction`, `gpioN/value`, `unexport`).
//! - [`PinPump`] drives any embedded-hal [`OutputPin`].

use std::fs;
use std::path::{Path, PathBuf};

use embedded_hal::digital::OutputPin;
use log::{debug, warn};

use crate::app::ports::PumpPort;
use crate::error::PumpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Disabled,
    Off,
    On,
}

impl PumpState {
    fn require_enabled(self) -> Result<(), PumpError> {
        if self == Self::Disabled {
            Err(PumpError::Sequence)
        } else {
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// sysfs GPIO
// ---------------------------------------------------------------------------

const DIRECTION_OUT: &str = "out";
const DIRECTION_IN: &str = "in";
const VALUE_HIGH: &str = "1";
const VALUE_LOW: &str = "0";

pub struct SysfsPump {
    root: PathBuf,
    pin: u32,
    state: PumpState,
}

impl SysfsPump {
    pub fn new(root: impl Into<PathBuf>, pin: u32) -> Self {
        Self {
            root: root.into(),
            pin,
            state: PumpState::Disabled,
        }
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    fn pin_dir(&self) -> PathBuf {
        self.root.join(format!("gpio{}", self.pin))
    }

    fn write(path: &Path, value: &str) -> Result<(), PumpError> {
        fs::write(path, value).map_err(|e| {
            warn!("gpio: write {:?} to {} failed: {}", value, path.display(), e);
            PumpError::Io
        })
    }
}

impl PumpPort for SysfsPump {
    fn enable(&mut self) -> Result<(), PumpError> {
        if self.state != PumpState::Disabled {
            return Err(PumpError::Sequence);
        }
        Self::write(&self.root.join("export"), &self.pin.to_string())?;
        Self::write(&self.pin_dir().join("direction"), DIRECTION_OUT)?;
        debug!("gpio{}: exported as output", self.pin);
        self.state = PumpState::Off;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), PumpError> {
        self.state.require_enabled()?;
        // Switching to input drops the drive regardless of the current level.
        Self::write(&self.pin_dir().join("direction"), DIRECTION_IN)?;
        Self::write(&self.root.join("unexport"), &self.pin.to_string())?;
        debug!("gpio{}: unexported", self.pin);
        self.state = PumpState::Disabled;
        Ok(())
    }

    fn on(&mut self) -> Result<(), PumpError> {
        self.state.require_enabled()?;
        Self::write(&self.pin_dir().join("value"), VALUE_HIGH)?;
        self.state = PumpState::On;
        Ok(())
    }

    fn off(&mut self) -> Result<(), PumpError> {
        self.state.require_enabled()?;
        Self::write(&self.pin_dir().join("value"), VALUE_LOW)?;
        self.state = PumpState::Off;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// embedded-hal output pin
// ---------------------------------------------------------------------------

pub struct PinPump<P> {
    pin: P,
    state: PumpState,
}

impl<P: OutputPin> PinPump<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            state: PumpState::Disabled,
        }
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn release(self) -> P {
        self.pin
    }

    fn drive(&mut self, high: bool) -> Result<(), PumpError> {
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|e| {
            warn!("pump pin: drive {} failed: {:?}", if high { "high" } else { "low" }, e);
            PumpError::Io
        })
    }
}

impl<P: OutputPin> PumpPort for PinPump<P> {
    fn enable(&mut self) -> Result<(), PumpError> {
        if self.state != PumpState::Disabled {
            return Err(PumpError::Sequence);
        }
        self.drive(false)?;
        self.state = PumpState::Off;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), PumpError> {
        self.state.require_enabled()?;
        self.drive(false)?;
        self.state = PumpState::Disabled;
        Ok(())
    }

    fn on(&mut self) -> Result<(), PumpError> {
        self.state.require_enabled()?;
        self.drive(true)?;
        self.state = PumpState::On;
        Ok(())
    }

    fn off(&mut self) -> Result<(), PumpError> {
        self.state.require_enabled()?;
        self.drive(false)?;
        self.state = PumpState::Off;
        Ok(())
    }
}
