//! i2c-access-linux - Linux i2c-dev support
//!
//! This crate provides access to I2C buses through the Linux i2c-dev
//! character devices at `/dev/i2c-N`.
//!
//! # Overview
//!
//! A bus is opened read/write, the target address is claimed with
//! `I2C_SLAVE` (or `I2C_SLAVE_FORCE` when a kernel driver already owns the
//! address), and all messages are submitted in one `I2C_RDWR` call so the
//! write and the following read are separated by a repeated START instead
//! of a STOP.
//!
//! # Example
//!
//! ```no_run
//! use i2c_access_core::{execute, TransactionPlan, TransactionSpec};
//! use i2c_access_linux::LinuxI2c;
//!
//! // Write register pointer 0x03 to 0x68, then read one byte back
//! let spec = TransactionSpec::parse("/dev/i2c-0", "0x68", &["3"], Some("1"), false)?;
//! let plan = TransactionPlan::build(&spec);
//! let bytes = execute(
//!     LinuxI2c::open,
//!     spec.device_path(),
//!     spec.address(),
//!     spec.claim_mode(),
//!     plan,
//! )?;
//! println!("0x{:02X}", bytes[0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # System Requirements
//!
//! - Linux kernel with i2c-dev support (`CONFIG_I2C_CHARDEV`, or
//!   `modprobe i2c-dev`)
//! - Read/write access to `/dev/i2c-N` (usually the `i2c` group)
//! - Forced claims usually require root

pub mod device;
pub mod error;

// Re-exports
pub use device::{Functionality, LinuxI2c, MessageFlags, I2C_RDWR_IOCTL_MAX_MSGS};
pub use error::{LinuxI2cError, Result};
