//! Error handling for the PicoKit driver
//!
//! Provides error types for all layers of the driver:
//! - Command errors (construction/validation)
//! - Reply errors (parsing controller responses)
//! - Transport errors (byte channel I/O)
//!
//! All error types use `thiserror` for ergonomic error handling. Every
//! validation error is raised before any bytes reach the channel, so a
//! failed call never leaves a partial protocol exchange behind.

use thiserror::Error;

/// Command construction error
///
/// Raised while building a command string, before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Mnemonic is not part of the firmware command table
    #[error("invalid command mnemonic: {mnemonic:?}")]
    InvalidCommand {
        /// The rejected mnemonic string.
        mnemonic: String,
    },

    /// Controller address outside the two-controller domain
    #[error("invalid controller address {address} (expected 1 or 2)")]
    InvalidAddress {
        /// The rejected address.
        address: u8,
    },

    /// Axis outside the four motor channels of a controller
    #[error("invalid axis {axis} (expected 1-4)")]
    InvalidAxis {
        /// The rejected axis.
        axis: u8,
    },

    /// Operation argument outside its numeric domain
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// Operation argument error
///
/// One variant per validated numeric domain, so callers can tell which
/// argument was rejected without string matching.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// Velocity outside 1..=2000 steps/s
    #[error("velocity {value} out of range (1-2000 steps/s)")]
    Velocity {
        /// The rejected velocity.
        value: u32,
    },

    /// Acceleration outside 1..=200000 steps/s^2
    #[error("acceleration {value} out of range (1-200000 steps/s^2)")]
    Acceleration {
        /// The rejected acceleration.
        value: u32,
    },

    /// Motor type code outside 0..=3
    #[error("motor type code {code} out of range (0-3)")]
    MotorType {
        /// The rejected code.
        code: u8,
    },

    /// New bus address outside 1..=31
    #[error("new address {address} out of range (1-31)")]
    NewAddress {
        /// The rejected address.
        address: u8,
    },

    /// Scan conflict-resolution mode outside 0..=2
    #[error("conflict resolution mode {mode} out of range (0-2)")]
    ConflictMode {
        /// The rejected mode.
        mode: u8,
    },
}

/// Reply parsing error
///
/// Raised while turning raw controller bytes into a typed value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    /// Reply too short to carry the two-character address echo
    #[error("malformed reply: {len} usable characters, need at least 2 for the address echo")]
    TooShort {
        /// Characters remaining after stripping terminators.
        len: usize,
    },

    /// Payload was not a number where a number was expected
    #[error("malformed reply: expected a number, got {payload:?}")]
    NotNumeric {
        /// The offending payload.
        payload: String,
    },

    /// Controller reported a motor type code outside the known set
    #[error("unknown motor type code {code}")]
    UnknownMotorType {
        /// The reported code.
        code: u8,
    },
}

/// Byte channel transport error
///
/// The driver never retries or swallows these; they propagate to the
/// caller unchanged.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Channel read/write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Setup-time failure: device or endpoints not found
    #[error("device not ready: {reason}")]
    DeviceNotReady {
        /// Why the channel could not be established.
        reason: String,
    },
}

/// Main error type for the PicoKit driver
///
/// A unified error that can represent any failure from command
/// construction through reply conversion. This is the error type of all
/// public controller operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Command construction/validation error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Reply parsing error
    #[error(transparent)]
    Reply(#[from] ReplyError),

    /// Byte channel error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A bounded poll exceeded its deadline
    ///
    /// Aborts local polling only; motion already commanded keeps running
    /// until the caller issues an explicit stop.
    #[error("{operation} still pending after {waited_ms}ms")]
    Timeout {
        /// What was being waited on.
        operation: &'static str,
        /// How long the poll ran before giving up.
        waited_ms: u64,
    },
}

impl Error {
    /// Check if this is a poll timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is a validation error raised before any bytes were sent
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Command(_))
    }
}

impl From<ArgumentError> for Error {
    fn from(err: ArgumentError) -> Self {
        Error::Command(CommandError::Argument(err))
    }
}

/// Result type using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
