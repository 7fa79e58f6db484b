//! Command string construction
//!
//! Builds validated command strings of the form
//! `"{address}>{axis?}{mnemonic}{value?}\r"`. Pure functions of their
//! inputs; nothing here touches the channel, so a validation failure
//! leaves no partial protocol state behind.

use crate::firmware::commands::Command;
use picokit_core::{CommandError, AXIS_COUNT};

/// Validate a controller address for axis-addressed calls
///
/// The wider 1-31 protocol range applies only to set-address values and
/// scan results, which are validated by their own operations.
pub fn validate_address(address: u8) -> Result<(), CommandError> {
    if address == 1 || address == 2 {
        Ok(())
    } else {
        Err(CommandError::InvalidAddress { address })
    }
}

/// Validate a motor channel number
pub fn validate_axis(axis: u8) -> Result<(), CommandError> {
    if (1..=AXIS_COUNT).contains(&axis) {
        Ok(())
    } else {
        Err(CommandError::InvalidAxis { axis })
    }
}

/// Build a command string for the wire
///
/// The axis digit, when present, sits directly between the address echo
/// and the mnemonic; the value, when present, follows the mnemonic with
/// no separator. A single carriage return terminates every command.
pub fn format_command(
    command: Command,
    address: u8,
    axis: Option<u8>,
    value: Option<&str>,
) -> Result<String, CommandError> {
    validate_address(address)?;

    let mut cmd = format!("{}>", address);
    if let Some(axis) = axis {
        validate_axis(axis)?;
        cmd.push((b'0' + axis) as char);
    }
    cmd.push_str(command.mnemonic());
    if let Some(value) = value {
        cmd.push_str(value);
    }
    cmd.push('\r');

    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_axis_command_with_value() {
        let cmd = format_command(Command::SetVelocity, 1, Some(1), Some("500")).unwrap();
        assert_eq!(cmd, "1>1VA500\r");
    }

    #[test]
    fn formats_query_without_axis_or_value() {
        let cmd = format_command(Command::QueryFirmware, 1, None, None).unwrap();
        assert_eq!(cmd, "1>VE?\r");
    }

    #[test]
    fn formats_axis_query_without_value() {
        let cmd = format_command(Command::QueryMotionDone, 2, Some(3), None).unwrap();
        assert_eq!(cmd, "2>3MD?\r");
    }

    #[test]
    fn formats_negative_value() {
        let cmd = format_command(Command::MoveAbsolute, 1, Some(4), Some("-1200")).unwrap();
        assert_eq!(cmd, "1>4PA-1200\r");
    }

    #[test]
    fn rejects_address_outside_domain() {
        for address in [0, 3, 31, 255] {
            assert_eq!(
                format_command(Command::QueryPosition, address, Some(1), None),
                Err(CommandError::InvalidAddress { address })
            );
        }
    }

    #[test]
    fn rejects_axis_outside_domain() {
        for axis in [0, 5, 10] {
            assert_eq!(
                format_command(Command::QueryPosition, 1, Some(axis), None),
                Err(CommandError::InvalidAxis { axis })
            );
        }
    }
}
