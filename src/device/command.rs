//! In-band commands written to the device.
//!
//! Mode switches travel in the same byte stream as simulated data so the
//! device can be driven from a shell with `echo`/`dd`/`cat`.  A 1-byte write
//! is always data; anything else is matched as a command string.

use heapless::Vec;

/// Enables simulation mode.
pub const SIM_ON_CMD: &[u8] = b"sim-on";
/// Disables simulation mode.
pub const SIM_OFF_CMD: &[u8] = b"sim-off";
/// Bytes of a write that take part in command matching.
pub const CMD_BUF_CAPACITY: usize = 8;

/// Command bytes as seen by the matcher (truncated to capacity).
pub type CommandBuf = Vec<u8, CMD_BUF_CAPACITY>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SimOn,
    SimOff,
    SetSimByte(u8),
    /// A multi-byte write that matched no command; accepted and ignored.
    Unrecognized(CommandBuf),
}

impl Command {
    /// Interpret one write.
    ///
    /// Matching is case-sensitive and prefix-based over the first
    /// [`CMD_BUF_CAPACITY`] bytes, so trailing bytes such as a newline from
    /// `echo` or a NUL terminator do not defeat it.
    pub fn parse(bytes: &[u8]) -> Self {
        if let [byte] = bytes {
            return Self::SetSimByte(*byte);
        }

        let head = &bytes[..bytes.len().min(CMD_BUF_CAPACITY)];
        if head.starts_with(SIM_ON_CMD) {
            Self::SimOn
        } else if head.starts_with(SIM_OFF_CMD) {
            Self::SimOff
        } else {
            let mut buf = CommandBuf::new();
            // `head` never exceeds the buffer capacity.
            let _ = buf.extend_from_slice(head);
            Self::Unrecognized(buf)
        }
    }

    /// Wire form of the command, for callers driving the device.
    pub fn encode(&self) -> CommandBuf {
        let mut buf = CommandBuf::new();
        let _ = match self {
            Self::SimOn => buf.extend_from_slice(SIM_ON_CMD),
            Self::SimOff => buf.extend_from_slice(SIM_OFF_CMD),
            Self::SetSimByte(b) => buf.push(*b).map_err(|_| ()),
            Self::Unrecognized(bytes) => buf.extend_from_slice(bytes),
        };
        buf
    }

    /// The mode command for the given simulation setting.
    pub const fn simulation(on: bool) -> Self {
        if on { Self::SimOn } else { Self::SimOff }
    }
}
