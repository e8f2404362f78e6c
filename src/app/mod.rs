//! Application core: the watering loop, zero direct I/O.
//!
//! [`service::MonitorService`] reads moisture, decides whether to water,
//! and drives the pump.  All interaction with hardware happens through the
//! **port traits** defined in [`ports`], keeping this layer testable
//! without a sensor or a relay attached.

pub mod events;
pub mod ports;
pub mod service;
