//! 8742 firmware command table
//!
//! Closed, static mapping from driver operation to the mnemonic the
//! firmware expects. The set is fixed for the life of the process; the
//! formatter never emits a mnemonic outside it, and string-driven callers
//! go through [`Command::from_mnemonic`], which rejects anything unknown.

use picokit_core::CommandError;

/// One firmware operation and its ASCII mnemonic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Identification string query (`*IDN?`)
    IdString,
    /// Firmware version query (`VE?`)
    QueryFirmware,
    /// Set per-axis velocity (`VA`)
    SetVelocity,
    /// Query per-axis velocity (`VA?`)
    QueryVelocity,
    /// Set per-axis acceleration (`AC`)
    SetAcceleration,
    /// Query per-axis acceleration (`AC?`)
    QueryAcceleration,
    /// Query actual position in steps (`TP?`)
    QueryPosition,
    /// Define the home reference point (`DH`)
    DefineHome,
    /// Query the home reference point (`DH?`)
    QueryHome,
    /// Query motion-done status (`MD?`)
    QueryMotionDone,
    /// Jog indefinitely in one direction (`MV`)
    MoveIndefinitely,
    /// Move to an absolute target position (`PA`)
    MoveAbsolute,
    /// Query the absolute target position (`PA?`)
    QueryTargetPosition,
    /// Move by a relative number of steps (`PR`)
    MoveRelative,
    /// Query the relative move target (`PR?`)
    QueryRelativeTarget,
    /// Auto-detect connected motors (`MC`)
    MotorCheck,
    /// Set per-axis motor type (`QM`)
    SetMotorType,
    /// Query per-axis motor type (`QM?`)
    QueryMotorType,
    /// Assign a new bus address (`SA`)
    SetAddress,
    /// Query the controller's bus address (`SA?`)
    QueryAddress,
    /// Start an RS-485 bus scan (`SC`)
    ScanBus,
    /// Query scan-done status (`SD?`)
    QueryScanStatus,
    /// Query the bus occupancy bitmask (`SC?`)
    QueryAddressMap,
    /// Save settings to non-volatile memory (`SM`)
    SaveSettings,
    /// Stop motion on one axis (`ST`)
    StopMotion,
    /// Pop the latest error code and message (`TB?`)
    QueryErrorMessage,
    /// Pop the latest error code (`TE?`)
    QueryErrorCode,
    /// Purge all saved settings (`XX`)
    PurgeSettings,
}

impl Command {
    /// Every command in the table, for iteration and tests
    pub const ALL: [Command; 28] = [
        Command::IdString,
        Command::QueryFirmware,
        Command::SetVelocity,
        Command::QueryVelocity,
        Command::SetAcceleration,
        Command::QueryAcceleration,
        Command::QueryPosition,
        Command::DefineHome,
        Command::QueryHome,
        Command::QueryMotionDone,
        Command::MoveIndefinitely,
        Command::MoveAbsolute,
        Command::QueryTargetPosition,
        Command::MoveRelative,
        Command::QueryRelativeTarget,
        Command::MotorCheck,
        Command::SetMotorType,
        Command::QueryMotorType,
        Command::SetAddress,
        Command::QueryAddress,
        Command::ScanBus,
        Command::QueryScanStatus,
        Command::QueryAddressMap,
        Command::SaveSettings,
        Command::StopMotion,
        Command::QueryErrorMessage,
        Command::QueryErrorCode,
        Command::PurgeSettings,
    ];

    /// The mnemonic string the firmware expects, exactly as documented
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::IdString => "*IDN?",
            Self::QueryFirmware => "VE?",
            Self::SetVelocity => "VA",
            Self::QueryVelocity => "VA?",
            Self::SetAcceleration => "AC",
            Self::QueryAcceleration => "AC?",
            Self::QueryPosition => "TP?",
            Self::DefineHome => "DH",
            Self::QueryHome => "DH?",
            Self::QueryMotionDone => "MD?",
            Self::MoveIndefinitely => "MV",
            Self::MoveAbsolute => "PA",
            Self::QueryTargetPosition => "PA?",
            Self::MoveRelative => "PR",
            Self::QueryRelativeTarget => "PR?",
            Self::MotorCheck => "MC",
            Self::SetMotorType => "QM",
            Self::QueryMotorType => "QM?",
            Self::SetAddress => "SA",
            Self::QueryAddress => "SA?",
            Self::ScanBus => "SC",
            Self::QueryScanStatus => "SD?",
            Self::QueryAddressMap => "SC?",
            Self::SaveSettings => "SM",
            Self::StopMotion => "ST",
            Self::QueryErrorMessage => "TB?",
            Self::QueryErrorCode => "TE?",
            Self::PurgeSettings => "XX",
        }
    }

    /// True for commands that expect a reply from the controller
    pub fn expects_reply(&self) -> bool {
        // Query mnemonics all carry a trailing '?'.
        self.mnemonic().ends_with('?')
    }

    /// Look up a command from its mnemonic
    ///
    /// Fails with [`CommandError::InvalidCommand`] for any string outside
    /// the table's value set.
    pub fn from_mnemonic(mnemonic: &str) -> Result<Self, CommandError> {
        Self::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.mnemonic() == mnemonic)
            .ok_or_else(|| CommandError::InvalidCommand {
                mnemonic: mnemonic.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn mnemonics_are_unique() {
        let set: HashSet<&str> = Command::ALL.iter().map(|c| c.mnemonic()).collect();
        assert_eq!(set.len(), Command::ALL.len());
    }

    #[test]
    fn from_mnemonic_round_trips_every_command() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_mnemonic(cmd.mnemonic()), Ok(cmd));
        }
    }

    #[test]
    fn from_mnemonic_rejects_unknown_strings() {
        for bad in ["ZZ", "va", "VA ?", "", "MD"] {
            assert_eq!(
                Command::from_mnemonic(bad),
                Err(CommandError::InvalidCommand {
                    mnemonic: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn queries_expect_replies_and_setters_do_not() {
        assert!(Command::QueryVelocity.expects_reply());
        assert!(Command::IdString.expects_reply());
        assert!(Command::QueryMotionDone.expects_reply());
        assert!(!Command::SetVelocity.expects_reply());
        assert!(!Command::ScanBus.expects_reply());
        assert!(!Command::PurgeSettings.expects_reply());
    }
}
