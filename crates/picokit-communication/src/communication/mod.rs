//! Byte channel abstraction
//!
//! The protocol layer talks to the controller through a [`Channel`]: a
//! blocking, exclusively-owned byte pipe. Locating the device, selecting a
//! configuration, and resolving endpoints all happen outside this crate;
//! by the time a channel reaches a controller it must be ready for
//! command/reply exchange. Callers typically confirm liveness with an
//! initial firmware-version query.

use picokit_core::TransportError;

#[cfg(feature = "serial")]
pub mod serial;

/// Blocking byte channel to one controller chain
///
/// Exclusively owned by its [`Controller`](crate::firmware::controller::Controller);
/// interleaving command/reply bytes from two logical calls would corrupt
/// both, so a multi-threaded host must serialize access externally.
pub trait Channel: Send {
    /// Write the full byte sequence to the device
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Read up to `max_len` bytes of reply
    fn read(&mut self, max_len: usize) -> Result<Vec<u8>, TransportError>;
}

/// Channel that accepts writes and returns empty reads
///
/// Useful for wiring a controller before a real transport is available.
#[derive(Debug, Default)]
pub struct NoOpChannel;

impl NoOpChannel {
    /// Create a new no-op channel
    pub fn new() -> Self {
        Self
    }
}

impl Channel for NoOpChannel {
    fn write(&mut self, _bytes: &[u8]) -> Result<(), TransportError> {
        Ok(())
    }

    fn read(&mut self, _max_len: usize) -> Result<Vec<u8>, TransportError> {
        Ok(Vec::new())
    }
}
