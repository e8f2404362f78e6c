//! Soil monitor library.
//!
//! Reads a capacitive soil-moisture sensor over I2C, normalizes the reading
//! to a 0–255 scale, and exposes it through a byte-oriented device with a
//! software simulation mode.  The watering loop on top of it lives in
//! [`app`]; hardware is reached only through embedded-hal traits and the
//! adapters in [`adapters`] and [`drivers`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod device;
pub mod drivers;
pub mod error;
pub mod sensors;

pub use device::{Command, DeviceMode, DeviceState, SoilDevice};
pub use error::{DeviceError, Error, PumpError, SensorError, TransferError};
