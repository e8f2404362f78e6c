//! Soil monitor daemon main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  SoilDevice / DevNode   SysfsPump    LogEventSink            │
//! │  (SoilPort)             (PumpPort)   (EventSink)             │
//! │  JsonConfigFile (ConfigPort)                                 │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │           MonitorService (pure logic)                  │  │
//! │  │   read · compare with target · water · sleep           │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use linux_embedded_hal::{Delay, I2cdev};
use log::info;

use soil_monitor::adapters::config_file::JsonConfigFile;
use soil_monitor::adapters::dev_node::DevNode;
use soil_monitor::adapters::log_sink::LogEventSink;
use soil_monitor::app::ports::{ConfigPort, SoilPort};
use soil_monitor::app::service::MonitorService;
use soil_monitor::config::MonitorConfig;
use soil_monitor::drivers::pump::SysfsPump;
use soil_monitor::sensors::{MoistureReader, SeesawTransport};
use soil_monitor::SoilDevice;

const CONFIG_ENV: &str = "SOIL_MONITOR_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "/etc/soil-monitor.json";

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("soil-monitor v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let config = JsonConfigFile::new(&path)
        .load()
        .with_context(|| format!("loading config from {path}"))?;

    // ── 3. Device ─────────────────────────────────────────────
    match config.device_node.clone() {
        Some(node) => {
            let mut soil =
                DevNode::open(&node).with_context(|| format!("opening device node {node}"))?;
            monitor(config, &mut soil)
        }
        None => {
            let i2c = I2cdev::new(&config.i2c_bus)
                .with_context(|| format!("opening I2C bus {}", config.i2c_bus))?;
            let reader = MoistureReader::new(SeesawTransport::new(i2c), Delay);
            let device = SoilDevice::new(reader);
            info!("Soil device ready on {}", config.i2c_bus);
            monitor(config, &mut &device)
        }
    }
}

/// Pump, sink, and the service loop; runs until the first failure or
/// until SIGINT/SIGTERM, releasing the pump either way.
fn monitor(config: MonitorConfig, soil: &mut impl SoilPort) -> Result<()> {
    let mut pump = SysfsPump::new(config.gpio_root.as_str(), config.gpio_pin);
    let mut sink = LogEventSink::new();
    let mut delay = Delay;

    let mut service = MonitorService::new(config);

    // ── 4. Signals ────────────────────────────────────────────
    let stop = service.stop_handle();
    ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
        .context("installing signal handler")?;

    // ── 5. Main loop ──────────────────────────────────────────
    service.start(soil, &mut pump, &mut sink)?;
    service.run(soil, &mut pump, &mut delay, &mut sink, None)?;
    Ok(())
}
