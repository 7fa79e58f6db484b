//! Shared data model for the 8742 controller protocol
//!
//! Addresses and axes are firmware-side state, so they stay plain `u8`
//! parameters validated at the call site; the types here cover the values
//! with fixed closed domains: motor types, scan conflict-resolution modes,
//! jog directions, and the RS-485 occupancy map.

use crate::error::ArgumentError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bus address of the master controller.
pub const MASTER_ADDRESS: u8 = 1;

/// Highest address assignable on the RS-485 bus.
pub const MAX_BUS_ADDRESS: u8 = 31;

/// Motor channels per controller.
pub const AXIS_COUNT: u8 = 4;

/// Lowest accepted velocity, steps/s.
pub const MIN_VELOCITY: u32 = 1;

/// Highest accepted velocity, steps/s.
pub const MAX_VELOCITY: u32 = 2000;

/// Highest accepted acceleration, steps/s^2.
pub const MAX_ACCELERATION: u32 = 200_000;

/// Motor type setting of one axis
///
/// Stored in controller firmware per (address, axis); this process only
/// queries and sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorType {
    /// No motor connected (code 0)
    NoMotor,
    /// Motor type unknown (code 1)
    Unknown,
    /// 'Tiny' motor (code 2)
    Tiny,
    /// 'Standard' motor (code 3)
    Standard,
}

impl MotorType {
    /// Firmware code for this motor type
    pub const fn code(&self) -> u8 {
        match self {
            Self::NoMotor => 0,
            Self::Unknown => 1,
            Self::Tiny => 2,
            Self::Standard => 3,
        }
    }

    /// Human-readable label, matching the vendor documentation
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoMotor => "No motor connected",
            Self::Unknown => "Motor Unknown",
            Self::Tiny => "'Tiny' Motor",
            Self::Standard => "'Standard' Motor",
        }
    }

    /// Look up a motor type from its firmware code
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NoMotor),
            1 => Some(Self::Unknown),
            2 => Some(Self::Tiny),
            3 => Some(Self::Standard),
            _ => None,
        }
    }
}

impl fmt::Display for MotorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Address conflict-resolution mode for an RS-485 bus scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictResolution {
    /// Scan only; conflicting addresses are left in place (mode 0)
    Ignore,
    /// Reassign only conflicting controllers to the lowest free address (mode 1)
    ReassignConflicts,
    /// Reassign all controllers ascending, master first at address 1 (mode 2)
    ReassignAll,
}

impl ConflictResolution {
    /// Firmware mode code carried by the scan command
    pub const fn code(&self) -> u8 {
        match self {
            Self::Ignore => 0,
            Self::ReassignConflicts => 1,
            Self::ReassignAll => 2,
        }
    }
}

impl TryFrom<u8> for ConflictResolution {
    type Error = ArgumentError;

    fn try_from(mode: u8) -> Result<Self, ArgumentError> {
        match mode {
            0 => Ok(Self::Ignore),
            1 => Ok(Self::ReassignConflicts),
            2 => Ok(Self::ReassignAll),
            _ => Err(ArgumentError::ConflictMode { mode }),
        }
    }
}

/// Direction of an open-ended jog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Toward increasing step counts
    Positive,
    /// Toward decreasing step counts
    Negative,
}

impl Direction {
    /// Sign character carried on the wire
    pub const fn as_char(&self) -> char {
        match self {
            Self::Positive => '+',
            Self::Negative => '-',
        }
    }
}

/// Occupancy map of the RS-485 bus
///
/// Derived fresh from the firmware's reported bitmask on every query.
/// Index 0 is the conflict flag; index i (i >= 1) means "address i is
/// occupied". The firmware reports the mask as a decimal integer whose
/// binary form is most-significant-bit first relative to high addresses,
/// so the bits are reversed here to make indexing address-aligned. Width
/// follows the reported value; it is never assumed fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressMap {
    bits: Vec<bool>,
}

impl AddressMap {
    /// Build the map from the firmware's occupancy bitmask
    pub fn from_mask(mask: u32) -> Self {
        if mask == 0 {
            // Matches the minimal binary rendering of zero: one clear bit.
            return Self { bits: vec![false] };
        }

        let width = 32 - mask.leading_zeros();
        let bits = (0..width).map(|i| mask & (1 << i) != 0).collect();
        Self { bits }
    }

    /// True if the scan detected an address conflict
    pub fn has_conflict(&self) -> bool {
        self.bits.first().copied().unwrap_or(false)
    }

    /// True if the given bus address is occupied
    ///
    /// Addresses beyond the reported mask width are unoccupied.
    pub fn is_occupied(&self, address: u8) -> bool {
        address >= 1 && self.bits.get(address as usize).copied().unwrap_or(false)
    }

    /// All occupied bus addresses, ascending
    pub fn occupied_addresses(&self) -> Vec<u8> {
        self.bits
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, &occupied)| occupied)
            .map(|(i, _)| i as u8)
            .collect()
    }

    /// The raw 0/1 flags, index-aligned with bus addresses
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }
}
