//! End-to-end monitor loop: scripted sensor → device → service → pump/sink.

use soil_monitor::app::events::MonitorEvent;
use soil_monitor::app::service::{MonitorService, WAIT_SLICE_MS};
use soil_monitor::config::MonitorConfig;
use soil_monitor::error::{DeviceError, Error, PumpError, SensorError};
use soil_monitor::sensors::moisture::{RAW_DRY, RAW_WET};
use soil_monitor::DeviceMode;

use super::mock_hw::{
    BOGUS, CountingDelay, PumpCall, RecordingPump, RecordingSink, StoppingDelay, scripted_device,
};

fn config() -> MonitorConfig {
    MonitorConfig::default()
}

#[test]
fn dry_soil_gets_watered() {
    let mut dev = scripted_device(&[RAW_DRY + 16]);
    let mut pump = RecordingPump::new();
    let mut sink = RecordingSink::new();
    let mut delay = CountingDelay::new();

    let mut service = MonitorService::new(config());
    service.start(&mut dev, &mut pump, &mut sink).unwrap();
    let report = service.cycle(&mut dev, &mut pump, &mut delay, &mut sink).unwrap();

    assert_eq!(report.moisture, 16);
    assert!(report.watered);
    assert_eq!(pump.calls, vec![PumpCall::Enable, PumpCall::On, PumpCall::Off]);
    assert_eq!(delay.total_ms(), 5_000);
    assert!(delay.ms_calls.iter().all(|&ms| ms <= WAIT_SLICE_MS));
    assert_eq!(
        sink.lines(),
        vec![
            "Init done, entering main loop",
            "Current moisture=16",
            "Pump on, runtime=5 sec",
            "Pump off",
            "Sleeping for 3600 sec",
        ]
    );
}

#[test]
fn wet_soil_is_left_alone() {
    let mut dev = scripted_device(&[RAW_WET]);
    let mut pump = RecordingPump::new();
    let mut sink = RecordingSink::new();
    let mut delay = CountingDelay::new();

    let mut service = MonitorService::new(config());
    service.start(&mut dev, &mut pump, &mut sink).unwrap();
    let report = service.cycle(&mut dev, &mut pump, &mut delay, &mut sink).unwrap();

    assert_eq!(report.moisture, 255);
    assert!(!report.watered);
    assert_eq!(pump.calls, vec![PumpCall::Enable]);
    assert_eq!(service.watering_count(), 0);
    assert_eq!(service.last_moisture(), Some(255));
}

#[test]
fn reading_at_target_does_not_water() {
    let mut dev = scripted_device(&[RAW_DRY + 0x80]);
    let mut pump = RecordingPump::new();
    let mut sink = RecordingSink::new();
    let mut delay = CountingDelay::new();

    let mut service = MonitorService::new(config());
    service.start(&mut dev, &mut pump, &mut sink).unwrap();
    let report = service.cycle(&mut dev, &mut pump, &mut delay, &mut sink).unwrap();
    assert_eq!(report.moisture, 0x80);
    assert!(!report.watered);
}

#[test]
fn simulated_device_drives_the_loop() {
    let mut dev = scripted_device(&[]);
    let mut pump = RecordingPump::new();
    let mut sink = RecordingSink::new();
    let mut delay = CountingDelay::new();

    let cfg = MonitorConfig {
        simulate: true,
        sleep_secs: 60,
        ..config()
    };
    let mut service = MonitorService::new(cfg);
    service.start(&mut dev, &mut pump, &mut sink).unwrap();
    assert_eq!(dev.mode(), DeviceMode::Simulated);

    service
        .run(&mut dev, &mut pump, &mut delay, &mut sink, Some(2))
        .unwrap();

    // Sim byte defaults to 0, so every cycle waters.
    assert_eq!(service.cycle_count(), 2);
    assert_eq!(service.watering_count(), 2);
    assert_eq!(delay.total_ms(), 2 * (5_000 + 60_000));

    // The sensor was never touched.
    let (transport, _) = dev.into_source().release();
    assert_eq!(transport.calls, 0);
}

#[test]
fn start_forces_real_mode() {
    let mut dev = scripted_device(&[]);
    dev.write(b"sim-on").unwrap();

    let mut service = MonitorService::new(config());
    service
        .start(&mut dev, &mut RecordingPump::new(), &mut RecordingSink::new())
        .unwrap();
    assert_eq!(dev.mode(), DeviceMode::Real);
}

#[test]
fn sensor_failure_stops_the_loop_and_releases_the_pump() {
    let mut dev = scripted_device(&[RAW_WET, BOGUS, BOGUS, BOGUS, BOGUS, BOGUS]);
    let mut pump = RecordingPump::new();
    let mut sink = RecordingSink::new();
    let mut delay = CountingDelay::new();

    let mut service = MonitorService::new(config());
    service.start(&mut dev, &mut pump, &mut sink).unwrap();
    let err = service
        .run(&mut dev, &mut pump, &mut delay, &mut sink, None)
        .unwrap_err();

    let expected = Error::Device(DeviceError::Sensor(SensorError::OutOfRange));
    assert_eq!(err, expected);
    assert_eq!(service.cycle_count(), 2);
    assert_eq!(pump.calls, vec![PumpCall::Enable, PumpCall::Disable]);
    assert_eq!(sink.events.last(), Some(&MonitorEvent::Stopped(expected)));
    // The last good reading is kept; nothing was guessed for the failed one.
    assert_eq!(service.last_moisture(), Some(255));
}

#[test]
fn pump_failure_stops_the_loop() {
    let mut dev = scripted_device(&[RAW_DRY]);
    let mut pump = RecordingPump::failing(PumpCall::On);
    let mut sink = RecordingSink::new();
    let mut delay = CountingDelay::new();

    let mut service = MonitorService::new(config());
    service.start(&mut dev, &mut pump, &mut sink).unwrap();
    let err = service
        .run(&mut dev, &mut pump, &mut delay, &mut sink, Some(3))
        .unwrap_err();

    assert_eq!(err, Error::Pump(PumpError::Io));
    assert_eq!(
        pump.calls,
        vec![PumpCall::Enable, PumpCall::On, PumpCall::Disable]
    );
}

#[test]
fn shutdown_ignores_pump_errors() {
    let mut pump = RecordingPump::failing(PumpCall::Disable);
    let mut service = MonitorService::new(config());
    service.shutdown(&mut pump);
    assert_eq!(pump.calls, vec![PumpCall::Disable]);
}

#[test]
fn stop_request_mid_watering_releases_the_pump() {
    let mut dev = scripted_device(&[RAW_DRY, RAW_DRY]);
    let mut pump = RecordingPump::new();
    let mut sink = RecordingSink::new();

    let mut service = MonitorService::new(config());
    let mut delay = StoppingDelay::new(service.stop_handle(), 2_000);
    service.start(&mut dev, &mut pump, &mut sink).unwrap();
    service
        .run(&mut dev, &mut pump, &mut delay, &mut sink, None)
        .unwrap();

    assert_eq!(
        pump.calls,
        vec![PumpCall::Enable, PumpCall::On, PumpCall::Off, PumpCall::Disable]
    );
    assert_eq!(service.cycle_count(), 1);
    // Neither the rest of the pump run nor the hour of sleep was waited out.
    assert_eq!(delay.elapsed_ms, 2_000);
    assert!(!sink.events.iter().any(|e| matches!(e, MonitorEvent::Stopped(_))));
}
