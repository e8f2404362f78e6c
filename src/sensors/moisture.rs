//! Raw-to-moisture mapping.
//!
//! The thresholds were calibrated against the driest and wettest readings
//! observed in potting soil.  The window between them is exactly 255
//! counts wide, so the mapping is a plain offset with no scaling.

use super::seesaw::RawReading;

/// Normalized moisture: 0 = driest representable, 255 = wettest.
pub type Moisture = u8;

/// Raw values below this read as fully dry.
pub const RAW_DRY: i32 = 0x2a0;
/// Raw values above this read as fully wet.
pub const RAW_WET: i32 = 0x39f;

/// Map a validated raw reading onto the 0–255 scale.
pub fn normalize(raw: RawReading) -> Moisture {
    let raw = raw.value();
    if raw < RAW_DRY {
        Moisture::MIN
    } else if raw > RAW_WET {
        Moisture::MAX
    } else {
        (raw - RAW_DRY) as Moisture
    }
}
