//! Mock hardware for integration tests.
//!
//! A scripted sensor transport, a delay that only counts, and recording
//! pump and event-sink adapters, so tests can assert on the full call
//! history without touching a bus or GPIO.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use soil_monitor::app::events::MonitorEvent;
use soil_monitor::app::ports::{EventSink, PumpPort};
use soil_monitor::error::{PumpError, TransferError};
use soil_monitor::sensors::seesaw::SETTLE_DELAY_MS;
use soil_monitor::sensors::{MoistureReader, RawReading, RawTransaction};
use soil_monitor::SoilDevice;

/// Raw value far above the 12-bit range.
pub const BOGUS: i32 = 5000;

// ── Scripted transport ────────────────────────────────────────

/// Yields one scripted outcome per transaction.  An exhausted script is a
/// receive failure.
pub struct ScriptedTransport {
    script: VecDeque<Result<i32, TransferError>>,
    pub calls: usize,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new(script: impl IntoIterator<Item = Result<i32, TransferError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            calls: 0,
        }
    }

    pub fn values(values: &[i32]) -> Self {
        Self::new(values.iter().copied().map(Ok))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RawTransaction for ScriptedTransport {
    fn transact<D: DelayNs>(&mut self, delay: &mut D) -> Result<RawReading, TransferError> {
        self.calls += 1;
        delay.delay_ms(SETTLE_DELAY_MS);
        self.script
            .pop_front()
            .unwrap_or(Err(TransferError::Recv))
            .map(RawReading)
    }
}

// ── Counting delay ────────────────────────────────────────────

/// Accumulates requested delay instead of sleeping.
#[derive(Debug, Default)]
pub struct CountingDelay {
    pub total_ns: u64,
    pub ms_calls: Vec<u32>,
}

#[allow(dead_code)]
impl CountingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ms_calls.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

/// Raises a stop flag once `stop_after_ms` of delay has been requested,
/// standing in for a signal arriving mid-run.
pub struct StoppingDelay {
    stop: Arc<AtomicBool>,
    stop_after_ms: u64,
    pub elapsed_ms: u64,
}

#[allow(dead_code)]
impl StoppingDelay {
    pub fn new(stop: Arc<AtomicBool>, stop_after_ms: u64) -> Self {
        Self {
            stop,
            stop_after_ms,
            elapsed_ms: 0,
        }
    }
}

impl DelayNs for StoppingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ms += u64::from(ms);
        if self.elapsed_ms >= self.stop_after_ms {
            self.stop.store(true, Ordering::Relaxed);
        }
    }
}

pub type ScriptedReader = MoistureReader<ScriptedTransport, CountingDelay>;

/// A real-mode device over a scripted transport.
#[allow(dead_code)]
pub fn scripted_device(values: &[i32]) -> SoilDevice<ScriptedReader> {
    SoilDevice::new(MoistureReader::new(
        ScriptedTransport::values(values),
        CountingDelay::new(),
    ))
}

// ── Recording pump ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpCall {
    Enable,
    Disable,
    On,
    Off,
}

/// Records every call; `fail_on` makes one operation fail with
/// [`PumpError::Io`].
#[derive(Debug, Default)]
pub struct RecordingPump {
    pub calls: Vec<PumpCall>,
    pub fail_on: Option<PumpCall>,
}

#[allow(dead_code)]
impl RecordingPump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(call: PumpCall) -> Self {
        Self {
            calls: Vec::new(),
            fail_on: Some(call),
        }
    }

    fn record(&mut self, call: PumpCall) -> Result<(), PumpError> {
        self.calls.push(call);
        if self.fail_on == Some(call) {
            Err(PumpError::Io)
        } else {
            Ok(())
        }
    }
}

impl PumpPort for RecordingPump {
    fn enable(&mut self) -> Result<(), PumpError> {
        self.record(PumpCall::Enable)
    }

    fn disable(&mut self) -> Result<(), PumpError> {
        self.record(PumpCall::Disable)
    }

    fn on(&mut self) -> Result<(), PumpError> {
        self.record(PumpCall::On)
    }

    fn off(&mut self) -> Result<(), PumpError> {
        self.record(PumpCall::Off)
    }
}

// ── Recording sink ────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<MonitorEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| e.status_line().as_str().to_owned())
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &MonitorEvent) {
        self.events.push(event.clone());
    }
}
