//! Error types for i2c-access-core
//!
//! Validation errors are raised before any bus I/O happens. Execution errors
//! carry the backend's own description of what went wrong.

use alloc::string::String;
use core::fmt;

use crate::address::Address;

/// Core error type - no_std compatible
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Argument errors
    /// A required positional argument was not supplied
    MissingArgument(&'static str),

    // Validation errors
    /// Device path does not name an I2C bus node
    InvalidDevicePath(String),
    /// Address token is not a number in the usable 7-bit range
    InvalidAddress(String),
    /// Data token is not a number that fits in a byte
    PayloadByteOutOfRange(String),
    /// More data bytes than a single message can carry
    PayloadTooLarge {
        /// Number of data tokens supplied
        len: usize,
    },
    /// Read length is negative, unparseable or too large
    InvalidReadLength(String),

    // Execution errors
    /// The bus device node could not be opened
    DeviceOpenFailed {
        /// Device path that was opened
        path: String,
        /// Backend description of the failure
        reason: String,
    },
    /// The target address could not be claimed on the bus
    AddressClaimFailed {
        /// Address that was claimed
        address: Address,
        /// Backend description of the failure
        reason: String,
    },
    /// The combined transaction was rejected or failed on the bus
    TransactionFailed(String),
}

impl Error {
    /// Returns true for errors raised before any bus I/O was attempted
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::DeviceOpenFailed { .. } | Self::AddressClaimFailed { .. } | Self::TransactionFailed(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument(what) => write!(f, "missing argument: {}", what),
            Self::InvalidDevicePath(path) => {
                write!(f, "incorrect i2c device {} (expecting /dev/i2c...)", path)
            }
            Self::InvalidAddress(token) => write!(
                f,
                "bad i2c device address {} (0x{:02x}-0x{:02x} valid)",
                token,
                Address::MIN,
                Address::MAX
            ),
            Self::PayloadByteOutOfRange(token) => {
                write!(f, "data byte too big {} (bytes only)", token)
            }
            Self::PayloadTooLarge { len } => write!(
                f,
                "too many data bytes: {} (at most {} per transaction)",
                len,
                crate::MAX_TRANSFER_LEN
            ),
            Self::InvalidReadLength(token) => write!(
                f,
                "bad read length {} (0-{} bytes valid)",
                token,
                crate::MAX_TRANSFER_LEN
            ),
            Self::DeviceOpenFailed { path, reason } => {
                write!(f, "unable to open i2c dev {}: {}", path, reason)
            }
            Self::AddressClaimFailed { address, reason } => write!(
                f,
                "could not set address to {} (address in use?): {}",
                address, reason
            ),
            Self::TransactionFailed(reason) => {
                write!(f, "i2c driver error - unable to perform transaction: {}", reason)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
