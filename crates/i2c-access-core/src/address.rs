//! 7-bit target addresses and claim modes

use core::fmt;

/// A 7-bit I2C target address in the usable range `0x04..=0x77`
///
/// Addresses below 0x04 and above 0x77 are reserved for special bus
/// functions (general call, CBUS, high-speed master codes, 10-bit prefixes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u8);

impl Address {
    /// Lowest usable address
    pub const MIN: u8 = 0x04;
    /// Highest usable address
    pub const MAX: u8 = 0x77;

    /// Create an address, returning `None` outside the usable range
    pub fn new(value: u64) -> Option<Self> {
        if (Self::MIN as u64..=Self::MAX as u64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    /// Raw 7-bit address value
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

/// How the target address is claimed on the opened bus handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimMode {
    /// Fail if a kernel driver already owns the address
    #[default]
    Normal,
    /// Claim the address even when a kernel driver is bound to it
    Forced,
}

impl ClaimMode {
    /// Map the `--force` flag onto a claim mode
    pub fn from_force(force: bool) -> Self {
        if force {
            Self::Forced
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for ClaimMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Forced => write!(f, "forced"),
        }
    }
}
