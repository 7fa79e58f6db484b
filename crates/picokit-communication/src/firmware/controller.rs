//! 8742 controller operations
//!
//! One method per controller capability, built from the command formatter,
//! the owned byte channel, and the reply parser. Every operation is a
//! single blocking request/response round trip; no command is ever
//! retried, and no reply is cached.
//!
//! Moves and bus scans additionally block on a status poll loop governed
//! by [`PollOptions`]. The reference behavior is an unbounded busy-wait;
//! here the loop sleeps between status queries and can carry an optional
//! deadline. A deadline expiring aborts the local poll only — motion
//! already commanded keeps running until [`Controller::stop_motion`] is
//! sent.

use crate::communication::Channel;
use crate::firmware::command_formatter::{format_command, validate_address, validate_axis};
use crate::firmware::commands::Command;
use crate::firmware::reply_parser::{parse_number, parse_reply, trailing_digit, trailing_flag};
use picokit_core::{
    AddressMap, ArgumentError, ConflictResolution, Direction, Error, MotorType, ReplyError,
    Result, MASTER_ADDRESS, MAX_ACCELERATION, MAX_BUS_ADDRESS, MAX_VELOCITY, MIN_VELOCITY,
};
use std::time::{Duration, Instant};

/// Largest reply read per query, in bytes
pub const MAX_REPLY_LEN: usize = 100;

/// Pacing and deadline for the motion/scan status polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Sleep between consecutive status queries
    pub interval: Duration,
    /// Give up with [`Error::Timeout`] after this long; `None` blocks until done
    pub timeout: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(20),
            timeout: None,
        }
    }
}

/// Driver for one chain of 8742 controllers
///
/// Owns its byte channel exclusively: operations are strictly sequential
/// request/response exchanges and must never interleave. A multi-threaded
/// host serializes calls through a mutex or a single-owner task.
pub struct Controller<C: Channel> {
    channel: C,
    poll: PollOptions,
}

impl<C: Channel> Controller<C> {
    /// Create a controller over a ready byte channel
    ///
    /// The channel must already be set up for command/reply exchange; a
    /// [`firmware_version`](Self::firmware_version) call is the usual
    /// liveness check right after construction.
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            poll: PollOptions::default(),
        }
    }

    /// Create a controller with explicit poll pacing
    pub fn with_poll_options(channel: C, poll: PollOptions) -> Self {
        Self { channel, poll }
    }

    /// Current poll pacing
    pub fn poll_options(&self) -> PollOptions {
        self.poll
    }

    /// Replace the poll pacing
    pub fn set_poll_options(&mut self, poll: PollOptions) {
        self.poll = poll;
    }

    /// Give the channel back, consuming the controller
    pub fn into_channel(self) -> C {
        self.channel
    }

    fn send(&mut self, cmd: &str) -> Result<()> {
        tracing::trace!(command = cmd.trim_end(), "send");
        self.channel.write(cmd.as_bytes())?;
        Ok(())
    }

    fn query(&mut self, cmd: &str) -> Result<String> {
        self.send(cmd)?;
        let raw = self.channel.read(MAX_REPLY_LEN)?;
        let payload = parse_reply(&raw)?;
        tracing::trace!(reply = %payload, "recv");
        Ok(payload)
    }

    // --- identification -------------------------------------------------

    /// Instrument identification, "New_Focus XXXX vYYY mm/dd/yy, SNZZZZ"
    pub fn identification(&mut self, address: u8) -> Result<String> {
        let cmd = format_command(Command::IdString, address, None, None)?;
        self.query(&cmd)
    }

    /// Firmware version of the master controller, "XXXX Version Y.Y mm/dd/yy"
    pub fn firmware_version(&mut self) -> Result<String> {
        let cmd = format_command(Command::QueryFirmware, MASTER_ADDRESS, None, None)?;
        self.query(&cmd)
    }

    // --- velocity and acceleration ---------------------------------------

    /// Set the velocity of one axis, steps/s
    ///
    /// Does not affect a move already in progress.
    pub fn set_velocity(&mut self, address: u8, axis: u8, velocity: u32) -> Result<()> {
        if !(MIN_VELOCITY..=MAX_VELOCITY).contains(&velocity) {
            return Err(ArgumentError::Velocity { value: velocity }.into());
        }
        let cmd = format_command(
            Command::SetVelocity,
            address,
            Some(axis),
            Some(&velocity.to_string()),
        )?;
        self.send(&cmd)
    }

    /// Velocity of one axis, steps/s
    pub fn velocity(&mut self, address: u8, axis: u8) -> Result<u32> {
        let cmd = format_command(Command::QueryVelocity, address, Some(axis), None)?;
        let payload = self.query(&cmd)?;
        Ok(parse_number(&payload)?)
    }

    /// Set the acceleration of one axis, steps/s^2
    ///
    /// Does not affect a move already in progress.
    pub fn set_acceleration(&mut self, address: u8, axis: u8, acceleration: u32) -> Result<()> {
        if acceleration == 0 || acceleration > MAX_ACCELERATION {
            return Err(ArgumentError::Acceleration {
                value: acceleration,
            }
            .into());
        }
        let cmd = format_command(
            Command::SetAcceleration,
            address,
            Some(axis),
            Some(&acceleration.to_string()),
        )?;
        self.send(&cmd)
    }

    /// Acceleration of one axis, steps/s^2
    pub fn acceleration(&mut self, address: u8, axis: u8) -> Result<u32> {
        let cmd = format_command(Command::QueryAcceleration, address, Some(axis), None)?;
        let payload = self.query(&cmd)?;
        Ok(parse_number(&payload)?)
    }

    // --- position and home ------------------------------------------------

    /// Steps moved relative to power-on, reset, or the defined home
    pub fn position(&mut self, address: u8, axis: u8) -> Result<i32> {
        let cmd = format_command(Command::QueryPosition, address, Some(axis), None)?;
        let payload = self.query(&cmd)?;
        Ok(parse_number(&payload)?)
    }

    /// Define the home reference: how many steps the current position is
    /// away from home
    pub fn set_home(&mut self, address: u8, axis: u8, steps: i32) -> Result<()> {
        let cmd = format_command(
            Command::DefineHome,
            address,
            Some(axis),
            Some(&steps.to_string()),
        )?;
        self.send(&cmd)
    }

    /// The defined home reference of one axis, in steps
    pub fn home(&mut self, address: u8, axis: u8) -> Result<i32> {
        let cmd = format_command(Command::QueryHome, address, Some(axis), None)?;
        let payload = self.query(&cmd)?;
        Ok(parse_number(&payload)?)
    }

    // --- motion -----------------------------------------------------------

    /// Query whether the last move on an axis has finished
    pub fn finished_moving(&mut self, address: u8, axis: u8) -> Result<bool> {
        let cmd = format_command(Command::QueryMotionDone, address, Some(axis), None)?;
        let payload = self.query(&cmd)?;
        Ok(trailing_flag(&payload))
    }

    /// Jog an axis in one direction until [`stop_motion`](Self::stop_motion)
    pub fn move_indefinitely(
        &mut self,
        address: u8,
        axis: u8,
        direction: Direction,
    ) -> Result<()> {
        let value = direction.as_char().to_string();
        let cmd = format_command(Command::MoveIndefinitely, address, Some(axis), Some(&value))?;
        self.send(&cmd)
    }

    /// Move an axis to an absolute target position, in steps from home,
    /// and block until the controller reports motion done
    pub fn move_to_target(&mut self, address: u8, axis: u8, target: i32) -> Result<()> {
        let cmd = format_command(
            Command::MoveAbsolute,
            address,
            Some(axis),
            Some(&target.to_string()),
        )?;
        self.send(&cmd)?;
        self.wait_for_motion_done(address, axis)
    }

    /// Absolute target of the last commanded move, in steps
    pub fn target_position(&mut self, address: u8, axis: u8) -> Result<i32> {
        let cmd = format_command(Command::QueryTargetPosition, address, Some(axis), None)?;
        let payload = self.query(&cmd)?;
        Ok(parse_number(&payload)?)
    }

    /// Move an axis by a signed number of steps from its current position,
    /// and block until the controller reports motion done
    pub fn move_relative(&mut self, address: u8, axis: u8, steps: i32) -> Result<()> {
        let cmd = format_command(
            Command::MoveRelative,
            address,
            Some(axis),
            Some(&steps.to_string()),
        )?;
        self.send(&cmd)?;
        self.wait_for_motion_done(address, axis)
    }

    /// Relative target of the last commanded move, in steps
    pub fn relative_target(&mut self, address: u8, axis: u8) -> Result<i32> {
        let cmd = format_command(Command::QueryRelativeTarget, address, Some(axis), None)?;
        let payload = self.query(&cmd)?;
        Ok(parse_number(&payload)?)
    }

    /// Stop motion on one axis, decelerating at the configured rate
    pub fn stop_motion(&mut self, address: u8, axis: u8) -> Result<()> {
        let cmd = format_command(Command::StopMotion, address, Some(axis), None)?;
        self.send(&cmd)
    }

    /// Block until the controller reports motion done on an axis
    ///
    /// Paced by the controller's [`PollOptions`]. A deadline expiring
    /// fails with [`Error::Timeout`] without halting the physical move.
    pub fn wait_for_motion_done(&mut self, address: u8, axis: u8) -> Result<()> {
        validate_address(address)?;
        validate_axis(axis)?;
        self.poll_until("motion", |c| c.finished_moving(address, axis))
    }

    // --- motor management ---------------------------------------------------

    /// Auto-detect which motor is connected to each axis of a controller
    pub fn detect_motors(&mut self, address: u8) -> Result<()> {
        let cmd = format_command(Command::MotorCheck, address, None, None)?;
        self.send(&cmd)
    }

    /// Manually set the motor type of one axis
    pub fn set_motor_type(&mut self, address: u8, axis: u8, motor: MotorType) -> Result<()> {
        let cmd = format_command(
            Command::SetMotorType,
            address,
            Some(axis),
            Some(&motor.code().to_string()),
        )?;
        self.send(&cmd)
    }

    /// Motor type setting of one axis, as held in controller memory
    ///
    /// Reports the stored setting without re-checking the hardware; run
    /// [`detect_motors`](Self::detect_motors) first if motors may have
    /// been moved between axes.
    pub fn motor_type(&mut self, address: u8, axis: u8) -> Result<MotorType> {
        let cmd = format_command(Command::QueryMotorType, address, Some(axis), None)?;
        let payload = self.query(&cmd)?;
        let code = trailing_digit(&payload)?;
        MotorType::from_code(code)
            .ok_or_else(|| Error::Reply(ReplyError::UnknownMotorType { code }))
    }

    // --- bus addressing -----------------------------------------------------

    /// Assign a new bus address to a controller
    pub fn set_address(&mut self, address: u8, new_address: u8) -> Result<()> {
        if new_address == 0 || new_address > MAX_BUS_ADDRESS {
            return Err(ArgumentError::NewAddress {
                address: new_address,
            }
            .into());
        }
        let cmd = format_command(
            Command::SetAddress,
            address,
            None,
            Some(&new_address.to_string()),
        )?;
        self.send(&cmd)
    }

    /// Bus address a controller currently holds
    pub fn address(&mut self, address: u8) -> Result<u8> {
        let cmd = format_command(Command::QueryAddress, address, None, None)?;
        let payload = self.query(&cmd)?;
        Ok(parse_number(&payload)?)
    }

    // --- bus scan -------------------------------------------------------------

    /// Scan the RS-485 bus and block until the scan completes
    ///
    /// The mode decides what happens to conflicting addresses; see
    /// [`ConflictResolution`]. Raw modes outside 0-2 are rejected by
    /// `ConflictResolution::try_from` before anything is sent.
    pub fn scan(&mut self, resolution: ConflictResolution) -> Result<()> {
        let cmd = format_command(
            Command::ScanBus,
            MASTER_ADDRESS,
            None,
            Some(&resolution.code().to_string()),
        )?;
        tracing::debug!(mode = resolution.code(), "starting RS-485 scan");
        self.send(&cmd)?;
        self.poll_until("RS-485 scan", |c| c.is_scan_done())?;
        tracing::debug!("RS-485 scan complete");
        Ok(())
    }

    /// Query whether the last bus scan has completed
    pub fn is_scan_done(&mut self) -> Result<bool> {
        let cmd = format_command(Command::QueryScanStatus, MASTER_ADDRESS, None, None)?;
        let payload = self.query(&cmd)?;
        Ok(trailing_flag(&payload))
    }

    /// Occupancy map of the bus, derived from the scan result
    pub fn controller_address_map(&mut self) -> Result<AddressMap> {
        let cmd = format_command(Command::QueryAddressMap, MASTER_ADDRESS, None, None)?;
        let payload = self.query(&cmd)?;
        let mask: u32 = parse_number(&payload)?;
        Ok(AddressMap::from_mask(mask))
    }

    // --- settings and errors -----------------------------------------------

    /// Save motor types, velocities, and accelerations to non-volatile
    /// memory; reloaded automatically at reboot
    pub fn save_settings(&mut self) -> Result<()> {
        let cmd = format_command(Command::SaveSettings, MASTER_ADDRESS, None, None)?;
        self.send(&cmd)
    }

    /// Purge all settings held in non-volatile memory
    pub fn purge_all_settings(&mut self) -> Result<()> {
        let cmd = format_command(Command::PurgeSettings, MASTER_ADDRESS, None, None)?;
        self.send(&cmd)
    }

    /// Pop the latest entry from the error queue, "code, message"
    pub fn latest_error_message(&mut self) -> Result<String> {
        let cmd = format_command(Command::QueryErrorMessage, MASTER_ADDRESS, None, None)?;
        self.query(&cmd)
    }

    /// Pop the latest error code from the error queue
    pub fn latest_error_code(&mut self) -> Result<i32> {
        let cmd = format_command(Command::QueryErrorCode, MASTER_ADDRESS, None, None)?;
        let payload = self.query(&cmd)?;
        Ok(parse_number(&payload)?)
    }

    // --- polling ---------------------------------------------------------------

    fn poll_until(
        &mut self,
        operation: &'static str,
        mut done: impl FnMut(&mut Self) -> Result<bool>,
    ) -> Result<()> {
        let started = Instant::now();
        loop {
            if done(self)? {
                return Ok(());
            }
            if let Some(timeout) = self.poll.timeout {
                let waited = started.elapsed();
                if waited >= timeout {
                    return Err(Error::Timeout {
                        operation,
                        waited_ms: waited.as_millis() as u64,
                    });
                }
            }
            std::thread::sleep(self.poll.interval);
        }
    }
}
