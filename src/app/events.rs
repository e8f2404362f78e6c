//! Outbound monitor events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Each event renders to
//! the human-readable status line used on the telemetry side channel.

use core::fmt::Write;

use crate::error::Error;
use crate::sensors::Moisture;

/// Capacity of one rendered status line.
pub const STATUS_LINE_CAPACITY: usize = 100;

pub type StatusLine = heapless::String<STATUS_LINE_CAPACITY>;

/// Structured events emitted by the monitor loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Device mode set and pump enabled; the loop is about to run.
    Started { simulate: bool, target: Moisture },

    /// A fresh moisture reading.
    Moisture(Moisture),

    /// The pump was switched on for `runtime_secs`.
    PumpOn { runtime_secs: u32 },

    /// The pump was switched off.
    PumpOff,

    /// The loop is idle until the next reading.
    Sleeping { secs: u32 },

    /// The loop terminated on an error.
    Stopped(Error),
}

impl MonitorEvent {
    /// Render the status line.  Lines longer than the capacity are cut.
    pub fn status_line(&self) -> StatusLine {
        let mut line = StatusLine::new();
        let _ = match self {
            Self::Started { .. } => write!(line, "Init done, entering main loop"),
            Self::Moisture(m) => write!(line, "Current moisture={}", m),
            Self::PumpOn { runtime_secs } => write!(line, "Pump on, runtime={} sec", runtime_secs),
            Self::PumpOff => write!(line, "Pump off"),
            Self::Sleeping { secs } => write!(line, "Sleeping for {} sec", secs),
            Self::Stopped(e) => write!(line, "Stopping: {}", e),
        };
        line
    }
}
