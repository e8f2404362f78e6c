//! Sensor subsystem: the seesaw register transaction, the bounded
//! re-read policy, and the raw-to-moisture mapping.

pub mod moisture;
pub mod seesaw;

pub use moisture::{Moisture, normalize};
pub use seesaw::{MoistureReader, RawReading, RawTransaction, SeesawTransport};
