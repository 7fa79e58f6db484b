//! Serial port channel
//!
//! Thin adapter putting a serial port behind the [`Channel`] trait for
//! controllers exposed as a USB CDC serial device. Port discovery stays
//! with the caller; this module only opens a named port.

use crate::communication::Channel;
use picokit_core::TransportError;
use std::io::{Read, Write};
use std::time::Duration;

/// Byte channel over a local serial port
pub struct SerialChannel {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialChannel {
    /// Open a serial port channel
    ///
    /// `timeout` bounds each blocking read; a controller that stays silent
    /// surfaces as a timed-out I/O error rather than a hang.
    pub fn open(port_name: &str, baud_rate: u32, timeout: Duration) -> Result<Self, TransportError> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|e| TransportError::DeviceNotReady {
                reason: format!("failed to open {}: {}", port_name, e),
            })?;

        tracing::debug!(port = port_name, baud = baud_rate, "serial channel open");
        Ok(Self { port })
    }
}

impl Channel for SerialChannel {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }

    fn read(&mut self, max_len: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; max_len];
        let n = self.port.read(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }
}
