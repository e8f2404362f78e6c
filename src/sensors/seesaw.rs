//! Capacitive soil sensor (Adafruit seesaw) register transaction.
//!
//! One reading is a two-phase exchange with the sensor at [`SENSOR_ADDR`]:
//!
//! ```text
//!   write [TOUCH_BASE, TOUCH_OFFSET]   (one 2-byte transfer)
//!   wait  SETTLE_DELAY_MS
//!   read  [hi, lo]                     (one 2-byte transfer)
//! ```
//!
//! Both phases must be single 2-byte transfers.  Splitting either into two
//! 1-byte transfers corrupts the value on real hardware.
//!
//! The sensor occasionally answers with a bogus value well above the 12-bit
//! range.  [`MoistureReader`] re-reads those, but never re-reads after a bus
//! fault.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, warn};

use super::moisture::{Moisture, normalize};
use crate::error::{SensorError, TransferError};

/// Fixed 7-bit bus address of the sensor.
pub const SENSOR_ADDR: u8 = 0x36;
/// Touch module base register.
pub const TOUCH_BASE: u8 = 0x0f;
/// Channel offset within the touch module.
pub const TOUCH_OFFSET: u8 = 0x10;
/// Settle time between the address write and the value read.  Shorter
/// delays produce spurious failures.
pub const SETTLE_DELAY_MS: u32 = 10;
/// Extra attempts after the first when a reading is out of bounds.
pub const MAX_REREADS: u8 = 4;

/// Raw touch value, combined big-endian from the two received bytes.
///
/// Only `[0, RawReading::MAX]` is a plausible sensor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RawReading(pub i32);

impl RawReading {
    /// Highest plausible raw value (12-bit).
    pub const MAX: i32 = 4095;

    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes) as i32)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    pub const fn in_bounds(self) -> bool {
        self.0 >= 0 && self.0 <= Self::MAX
    }
}

// ---------------------------------------------------------------------------
// RawTransaction
// ---------------------------------------------------------------------------

/// A single register write + delayed read cycle.
///
/// The settle delay is passed in so the caller owning the retry loop also
/// owns the clock.
pub trait RawTransaction {
    fn transact<D: DelayNs>(&mut self, delay: &mut D) -> Result<RawReading, TransferError>;
}

/// [`RawTransaction`] over an embedded-hal I2C bus.
pub struct SeesawTransport<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> SeesawTransport<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SENSOR_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RawTransaction for SeesawTransport<I2C> {
    fn transact<D: DelayNs>(&mut self, delay: &mut D) -> Result<RawReading, TransferError> {
        self.i2c
            .write(self.address, &[TOUCH_BASE, TOUCH_OFFSET])
            .map_err(|e| {
                debug!("seesaw: send to {:#04x} failed: {:?}", self.address, e);
                TransferError::Send
            })?;

        delay.delay_ms(SETTLE_DELAY_MS);

        let mut buf = [0u8; 2];
        self.i2c.read(self.address, &mut buf).map_err(|e| {
            debug!("seesaw: receive from {:#04x} failed: {:?}", self.address, e);
            TransferError::Recv
        })?;

        Ok(RawReading::from_be_bytes(buf))
    }
}

// ---------------------------------------------------------------------------
// BoundedReader
// ---------------------------------------------------------------------------

/// Wraps a [`RawTransaction`] with the out-of-range re-read policy.
pub struct MoistureReader<T, D> {
    transport: T,
    delay: D,
}

impl<T: RawTransaction, D: DelayNs> MoistureReader<T, D> {
    pub fn new(transport: T, delay: D) -> Self {
        Self { transport, delay }
    }

    /// Read one in-bounds raw value.
    ///
    /// Makes at most `1 + MAX_REREADS` transactions.  The settle delay
    /// inside each transaction is the only wait, so a read blocks for at
    /// most `(1 + MAX_REREADS) * SETTLE_DELAY_MS`.  A transfer error ends
    /// the read immediately.
    pub fn read_raw(&mut self) -> Result<RawReading, SensorError> {
        let attempts = 1 + u32::from(MAX_REREADS);
        for attempt in 1..=attempts {
            let raw = self.transport.transact(&mut self.delay)?;
            if raw.in_bounds() {
                return Ok(raw);
            }
            warn!(
                "seesaw: bogus reading {} (attempt {}/{})",
                raw.value(),
                attempt,
                attempts
            );
        }
        Err(SensorError::OutOfRange)
    }

    /// Read and map onto the 0–255 moisture scale.
    pub fn read(&mut self) -> Result<Moisture, SensorError> {
        self.read_raw().map(normalize)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }
}
