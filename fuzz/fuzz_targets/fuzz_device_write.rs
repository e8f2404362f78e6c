//! Fuzz target: `SoilDevice::write` / `SoilDevice::read`
//!
//! Splits the input into writes (first byte of each chunk is its length)
//! and feeds them to one device, reading after every write.  Every write
//! must be consumed in full, and a simulated read must echo the last data
//! byte accepted in simulation mode.
//!
//! cargo fuzz run fuzz_device_write

#![no_main]

use libfuzzer_sys::fuzz_target;
use soil_monitor::device::{Command, DeviceMode, MoistureSource};
use soil_monitor::error::DeviceError;
use soil_monitor::sensors::Moisture;
use soil_monitor::SoilDevice;

/// Real-mode source with a fixed answer.
struct Fixed;

impl MoistureSource for Fixed {
    fn read_moisture(&mut self) -> Result<Moisture, DeviceError> {
        Ok(0x5a)
    }
}

fuzz_target!(|data: &[u8]| {
    let dev = SoilDevice::new(Fixed);
    let mut simulated = false;
    let mut sim_byte = 0u8;

    let mut rest = data;
    while let Some((&len, tail)) = rest.split_first() {
        let n = usize::from(len % 16).min(tail.len());
        let (chunk, next) = tail.split_at(n);
        rest = next;

        assert_eq!(dev.write(chunk), Ok(chunk.len()));

        match Command::parse(chunk) {
            Command::SimOn => simulated = true,
            Command::SimOff => simulated = false,
            Command::SetSimByte(b) if simulated => sim_byte = b,
            _ => {}
        }

        let expected = if simulated { sim_byte } else { 0x5a };
        assert_eq!(dev.read_byte(), Ok(expected));
        assert_eq!(dev.mode() == DeviceMode::Simulated, simulated);
    }
});
