//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each event's status line to the
//! `log` facade.  A message-bus publisher would implement the same trait
//! and send the same lines.

use log::{error, info};

use crate::app::events::MonitorEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`MonitorEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        let line = event.status_line();
        match event {
            MonitorEvent::Stopped(_) => error!("{}", line),
            _ => info!("{}", line),
        }
    }
}
