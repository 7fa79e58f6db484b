//! # PicoKit Communication
//!
//! Byte channel abstraction and 8742 firmware protocol layer for PicoKit.
//! The `communication` module owns the transport seam (a blocking byte
//! channel plus the optional serial adapter); the `firmware` module owns
//! the vendor command table, command formatter, reply parser, and the
//! controller operations built on top of them.

pub mod communication;
pub mod firmware;

pub use communication::{Channel, NoOpChannel};

#[cfg(feature = "serial")]
pub use communication::serial::SerialChannel;

pub use firmware::{
    command_formatter::{format_command, validate_address, validate_axis},
    commands::Command,
    controller::{Controller, PollOptions, MAX_REPLY_LEN},
    reply_parser::parse_reply,
};
