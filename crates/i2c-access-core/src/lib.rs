//! i2c-access-core - Transaction construction for single-shot I2C access
//!
//! This crate turns user-supplied tokens into a validated request against a
//! 7-bit I2C address, builds the combined write-then-read message list for
//! it, and drives that list through a bus backend as one atomic transaction.
//! It is `no_std` compatible (it needs `alloc` for error messages and the
//! device path).
//!
//! # Features
//!
//! - `std` - Implement `std::error::Error` for [`Error`]
//!
//! # Example
//!
//! ```ignore
//! use i2c_access_core::{execute, TransactionPlan, TransactionSpec};
//!
//! let spec = TransactionSpec::parse("/dev/i2c-0", "0x68", &["3"], Some("1"), false)?;
//! let plan = TransactionPlan::build(&spec);
//! let bytes = execute(LinuxI2c::open, spec.device_path(), spec.address(), spec.claim_mode(), plan)?;
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod address;
pub mod bus;
pub mod error;
pub mod executor;
pub mod number;
pub mod plan;
pub mod request;

pub use address::{Address, ClaimMode};
pub use bus::I2cBus;
pub use error::{Error, Result};
pub use executor::execute;
pub use plan::{Direction, ProtocolMessage, TransactionPlan};
pub use request::TransactionSpec;

/// Largest write payload or read length a single message can carry
pub const MAX_TRANSFER_LEN: usize = 255;

/// Owned, bounded byte buffer used for payloads and read results
pub type Buffer = heapless::Vec<u8, MAX_TRANSFER_LEN>;
