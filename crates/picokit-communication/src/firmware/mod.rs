//! 8742 firmware protocol
//!
//! Implements the vendor ASCII command protocol:
//! - `commands`: the closed command table (operation -> mnemonic)
//! - `command_formatter`: validated command string construction
//! - `reply_parser`: echo/terminator stripping and typed payload helpers
//! - `controller`: one operation per controller capability, plus the
//!   motion-completion and bus-scan polling loops

pub mod command_formatter;
pub mod commands;
pub mod controller;
pub mod reply_parser;

pub use command_formatter::format_command;
pub use commands::Command;
pub use controller::{Controller, PollOptions};
pub use reply_parser::parse_reply;
