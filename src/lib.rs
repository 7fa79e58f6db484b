//! # PicoKit
//!
//! Host-side driver for New Focus/Newport 8742 "Picomotor" multi-axis
//! controllers, reachable over a USB-attached serial command link and
//! daisy-chained on an RS-485 bus.
//!
//! ## Architecture
//!
//! PicoKit is organized as a workspace:
//!
//! 1. **picokit-core** - Shared data model and error taxonomy
//! 2. **picokit-communication** - Byte channel and firmware protocol layer
//! 3. **picokit** - This crate: re-exports plus the console demo binary
//!
//! ## Quick start
//!
//! ```no_run
//! use picokit::{Controller, SerialChannel};
//! use std::time::Duration;
//!
//! # fn main() -> picokit::Result<()> {
//! let channel = SerialChannel::open("/dev/ttyUSB0", 19200, Duration::from_millis(500))?;
//! let mut controller = Controller::new(channel);
//! println!("{}", controller.firmware_version()?);
//! controller.move_to_target(1, 1, 500)?;
//! # Ok(())
//! # }
//! ```

pub use picokit_core::{
    AddressMap, ArgumentError, CommandError, ConflictResolution, Direction, Error, MotorType,
    ReplyError, Result, TransportError, AXIS_COUNT, MASTER_ADDRESS,
};

pub use picokit_communication::{
    format_command, parse_reply, Channel, Command, Controller, NoOpChannel, PollOptions,
    SerialChannel,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Console output on stderr with RUST_LOG environment variable support;
/// defaults to INFO when no directive is set.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
