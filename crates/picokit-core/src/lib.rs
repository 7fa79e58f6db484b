//! # PicoKit Core
//!
//! Core types and error taxonomy for the PicoKit driver.
//! Provides the shared data model (motor types, bus address maps,
//! scan conflict-resolution modes) and the error enums used by every
//! layer of the driver. No I/O lives in this crate.

pub mod error;
pub mod types;

pub use error::{ArgumentError, CommandError, Error, ReplyError, Result, TransportError};

pub use types::{
    AddressMap, ConflictResolution, Direction, MotorType, AXIS_COUNT, MASTER_ADDRESS,
    MAX_ACCELERATION, MAX_BUS_ADDRESS, MAX_VELOCITY, MIN_VELOCITY,
};
