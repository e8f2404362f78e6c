//! Character-device client adapter.
//!
//! Implements [`SoilPort`] against an already-registered soil moisture
//! driver node (e.g. `/dev/i2c-soil-drv`) that speaks the same byte
//! contract as [`SoilDevice`](crate::device::SoilDevice).  Any I/O failure
//! or short transfer on the node is a [`DeviceError::CopyFault`]; the node
//! does not say more than that.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::SoilPort;
use crate::error::DeviceError;
use crate::sensors::Moisture;

pub struct DevNode<F = File> {
    node: F,
    path: PathBuf,
}

impl DevNode<File> {
    /// Open the node read/write.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let node = OpenOptions::new().read(true).write(true).open(path)?;
        info!("Opened soil device node {}", path.display());
        Ok(Self::from_stream(node, path))
    }
}

impl<F: Read + Write> DevNode<F> {
    /// Wrap any byte stream that behaves like the device node.
    pub fn from_stream(node: F, path: impl Into<PathBuf>) -> Self {
        Self {
            node,
            path: path.into(),
        }
    }
}

impl<F: Read + Write> SoilPort for DevNode<F> {
    fn read_moisture(&mut self) -> Result<Moisture, DeviceError> {
        let mut buf = [0u8; 1];
        match self.node.read(&mut buf) {
            Ok(1) => Ok(buf[0]),
            Ok(n) => {
                warn!("{}: short read ({} bytes)", self.path.display(), n);
                Err(DeviceError::CopyFault)
            }
            Err(e) => {
                warn!("{}: read failed: {}", self.path.display(), e);
                Err(DeviceError::CopyFault)
            }
        }
    }

    fn send(&mut self, bytes: &[u8]) -> Result<usize, DeviceError> {
        match self.node.write(bytes) {
            Ok(n) if n == bytes.len() => Ok(n),
            Ok(n) => {
                warn!(
                    "{}: short write ({} of {} bytes)",
                    self.path.display(),
                    n,
                    bytes.len()
                );
                Err(DeviceError::CopyFault)
            }
            Err(e) => {
                warn!("{}: write failed: {}", self.path.display(), e);
                Err(DeviceError::CopyFault)
            }
        }
    }
}
