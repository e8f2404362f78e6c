//! Monitor service: the hexagonal core.
//!
//! [`MonitorService`] owns the configuration and the cycle bookkeeping.
//! All I/O flows through port traits passed in at call sites, so the whole
//! loop runs against mock adapters in tests.
//!
//! ```text
//!   SoilPort ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                │    MonitorService     │
//!   PumpPort ◀── │ read · compare · pump │
//!                └──────────────────────┘
//! ```
//!
//! Long waits are cut into [`WAIT_SLICE_MS`] slices so a stop request
//! (see [`MonitorService::stop_handle`]) ends watering and sleeping
//! promptly and the pump is released before the loop returns.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use log::{error, info, warn};

use crate::config::MonitorConfig;
use crate::device::Command;
use crate::error::{DeviceError, Result};
use crate::sensors::Moisture;

use super::events::MonitorEvent;
use super::ports::{EventSink, PumpPort, SoilPort};

/// Longest single blocking delay; a stop request is noticed within this.
pub const WAIT_SLICE_MS: u32 = 250;

/// Outcome of one monitor cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub moisture: Moisture,
    pub watered: bool,
}

/// The monitor service orchestrates read → compare → water.
pub struct MonitorService {
    config: MonitorConfig,
    cycles: u64,
    waterings: u64,
    last: Option<Moisture>,
    stop: Arc<AtomicBool>,
}

impl MonitorService {
    /// Construct the service.  Does **not** touch the device; call
    /// [`start`](Self::start) next.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            cycles: 0,
            waterings: 0,
            last: None,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that asks [`run`](Self::run) to switch the pump off, release
    /// it, and return.  Safe to set from a signal handler.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the device in a known mode and enable the pump.
    pub fn start(
        &mut self,
        soil: &mut impl SoilPort,
        pump: &mut impl PumpPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let cmd = Command::simulation(self.config.simulate).encode();
        let sent = soil.send(&cmd)?;
        if sent != cmd.len() {
            return Err(DeviceError::CopyFault.into());
        }

        pump.enable()?;

        info!(
            "Monitor started: simulation={} target={} sleep={}s pump={}s",
            self.config.simulate, self.config.target_moisture, self.config.sleep_secs, self.config.pump_secs
        );
        sink.emit(&MonitorEvent::Started {
            simulate: self.config.simulate,
            target: self.config.target_moisture,
        });
        Ok(())
    }

    /// Release the pump.  Errors are logged and otherwise ignored.
    pub fn shutdown(&mut self, pump: &mut impl PumpPort) {
        if let Err(e) = pump.disable() {
            warn!("Pump disable failed during shutdown: {}", e);
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// One reading, watering if it is below target.
    pub fn cycle(
        &mut self,
        soil: &mut impl SoilPort,
        pump: &mut impl PumpPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Result<CycleReport> {
        self.cycles += 1;

        let moisture = soil.read_moisture()?;
        self.last = Some(moisture);
        sink.emit(&MonitorEvent::Moisture(moisture));

        let watered = moisture < self.config.target_moisture;
        if watered {
            pump.on()?;
            sink.emit(&MonitorEvent::PumpOn {
                runtime_secs: self.config.pump_secs,
            });
            if !self.wait(delay, self.config.pump_ms()) {
                info!("Stop requested, cutting watering short");
            }
            pump.off()?;
            sink.emit(&MonitorEvent::PumpOff);
            self.waterings += 1;
        }

        sink.emit(&MonitorEvent::Sleeping {
            secs: self.config.sleep_secs,
        });
        Ok(CycleReport { moisture, watered })
    }

    /// Repeat [`cycle`](Self::cycle) and sleep, `max_cycles` times or forever.
    ///
    /// On the first failure the pump is disabled and the error returned;
    /// the loop never substitutes a guessed reading.  A stop request ends
    /// the loop with `Ok(())` after the pump is switched off and disabled.
    pub fn run(
        &mut self,
        soil: &mut impl SoilPort,
        pump: &mut impl PumpPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
        max_cycles: Option<u64>,
    ) -> Result<()> {
        let mut done = 0u64;
        while max_cycles.is_none_or(|max| done < max) && !self.stop_requested() {
            if let Err(e) = self.cycle(soil, pump, delay, sink) {
                error!("Monitor loop stopping: {}", e);
                sink.emit(&MonitorEvent::Stopped(e));
                self.shutdown(pump);
                return Err(e);
            }
            done += 1;
            self.wait(delay, self.config.sleep_ms());
        }

        if self.stop_requested() {
            info!("Stop requested after {} cycles, releasing pump", self.cycles);
            self.shutdown(pump);
        }
        Ok(())
    }

    /// Block for `ms` in slices, giving up early on a stop request.
    /// Returns `false` if the wait was cut short.
    fn wait(&self, delay: &mut impl DelayNs, ms: u32) -> bool {
        let mut left = ms;
        while left > 0 {
            if self.stop_requested() {
                return false;
            }
            let step = left.min(WAIT_SLICE_MS);
            delay.delay_ms(step);
            left -= step;
        }
        !self.stop_requested()
    }

    // ── Queries ───────────────────────────────────────────────

    /// Cycles attempted since construction.
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// Cycles that ran the pump.
    pub fn watering_count(&self) -> u64 {
        self.waterings
    }

    pub fn last_moisture(&self) -> Option<Moisture> {
        self.last
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
