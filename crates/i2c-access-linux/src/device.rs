//! Linux I2C device implementation
//!
//! This module provides the `LinuxI2c` struct that implements the `I2cBus`
//! trait using Linux's i2c-dev interface.

use crate::error::{LinuxI2cError, Result};

use i2c_access_core::{Address, ClaimMode, Direction, I2cBus, ProtocolMessage};

use bitflags::bitflags;
use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;

/// Maximum number of messages the kernel accepts in one I2C_RDWR call
pub const I2C_RDWR_IOCTL_MAX_MSGS: usize = 42;

/// Linux i2c-dev ioctl constants
mod ioctl {
    use nix::{ioctl_read_bad, ioctl_write_int_bad, ioctl_write_ptr_bad};

    /// Use this target address
    const I2C_SLAVE: u16 = 0x0703;
    /// Use this target address, even if it is already in use by a driver
    const I2C_SLAVE_FORCE: u16 = 0x0706;
    /// Get the adapter functionality mask
    const I2C_FUNCS: u16 = 0x0705;
    /// Combined read/write transfer (one STOP only)
    const I2C_RDWR: u16 = 0x0707;

    ioctl_write_int_bad!(i2c_slave, I2C_SLAVE);
    ioctl_write_int_bad!(i2c_slave_force, I2C_SLAVE_FORCE);
    ioctl_read_bad!(i2c_funcs, I2C_FUNCS, libc::c_ulong);
    ioctl_write_ptr_bad!(i2c_rdwr, I2C_RDWR, super::I2cRdwrIoctlData);
}

bitflags! {
    /// Flags of a kernel `struct i2c_msg`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MessageFlags: u16 {
        /// Read data, from target to controller
        const READ      = 0x0001;
        /// This is a ten bit chip address
        const TEN_BIT   = 0x0010;
        /// Don't send a repeated START
        const NO_START  = 0x4000;
    }
}

bitflags! {
    /// Adapter functionality reported by I2C_FUNCS
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Functionality: u64 {
        /// Plain I2C transfers (I2C_RDWR)
        const I2C                = 0x0000_0001;
        /// 10-bit addressing
        const TEN_BIT_ADDR       = 0x0000_0002;
        /// Protocol mangling flags in messages
        const PROTOCOL_MANGLING  = 0x0000_0004;
        /// SMBus packet error checking
        const SMBUS_PEC          = 0x0000_0008;
        /// Messages without repeated START
        const NOSTART            = 0x0000_0010;
        /// Target (slave) mode
        const SLAVE              = 0x0000_0020;
        /// SMBus quick command
        const SMBUS_QUICK        = 0x0001_0000;
        /// SMBus receive byte
        const SMBUS_READ_BYTE    = 0x0002_0000;
        /// SMBus send byte
        const SMBUS_WRITE_BYTE   = 0x0004_0000;
    }
}

/// I2C message structure for ioctl
/// This must match the kernel's struct i2c_msg layout
#[repr(C)]
#[derive(Debug)]
struct I2cMsg {
    addr: u16,     // __u16 addr
    flags: u16,    // __u16 flags
    len: u16,      // __u16 len
    buf: *mut u8,  // __u8 *buf
}

impl I2cMsg {
    fn from_message(msg: &mut ProtocolMessage) -> Self {
        let flags = match msg.direction() {
            Direction::Write => MessageFlags::empty(),
            Direction::Read => MessageFlags::READ,
        };
        Self {
            addr: msg.address().value() as u16,
            flags: flags.bits(),
            len: msg.len() as u16,
            buf: msg.buffer_mut().as_mut_ptr(),
        }
    }
}

/// Argument of the I2C_RDWR ioctl
/// This must match the kernel's struct i2c_rdwr_ioctl_data layout
#[repr(C)]
#[derive(Debug)]
pub(crate) struct I2cRdwrIoctlData {
    msgs: *mut I2cMsg, // struct i2c_msg *msgs
    nmsgs: u32,        // __u32 nmsgs
}

/// Linux I2C bus using the i2c-dev interface
///
/// The device node is closed when the value is dropped.
pub struct LinuxI2c {
    /// File handle for the i2c-dev node
    file: File,
    /// Device path, for log messages
    path: String,
    /// Adapter capabilities
    functionality: Functionality,
}

impl LinuxI2c {
    /// Open a Linux I2C bus device node (e.g. `/dev/i2c-1`)
    pub fn open(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(LinuxI2cError::InvalidParameter(
                "No device specified".into(),
            ));
        }

        log::debug!("linux_i2c: Opening device {}", path);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| LinuxI2cError::OpenFailed {
                path: path.to_string(),
                source: e,
            })?;

        let functionality = match query_functionality(&file) {
            Ok(funcs) => funcs,
            Err(e) => {
                log::debug!("linux_i2c: {}", e);
                Functionality::empty()
            }
        };

        log::debug!("linux_i2c: Adapter functionality: {:?}", functionality);
        if !functionality.contains(Functionality::I2C) {
            log::warn!(
                "linux_i2c: Adapter behind {} does not report plain I2C transfers",
                path
            );
        }

        log::info!("linux_i2c: Opened {}", path);

        Ok(Self {
            file,
            path: path.to_string(),
            functionality,
        })
    }

    /// Adapter functionality reported when the device was opened
    pub fn functionality(&self) -> Functionality {
        self.functionality
    }

    /// Device path this bus was opened from
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl I2cBus for LinuxI2c {
    type Error = LinuxI2cError;

    fn claim(&mut self, address: Address, mode: ClaimMode) -> Result<()> {
        let fd = self.file.as_raw_fd();
        let addr = address.value() as libc::c_int;

        // The address given here only gates access; I2C_RDWR messages carry
        // their own address.
        let res = unsafe {
            match mode {
                ClaimMode::Normal => ioctl::i2c_slave(fd, addr),
                ClaimMode::Forced => ioctl::i2c_slave_force(fd, addr),
            }
        };
        res.map_err(|e| LinuxI2cError::SetAddressFailed {
            address: address.value(),
            source: std::io::Error::from_raw_os_error(e as i32),
        })?;

        log::debug!("linux_i2c: Claimed {} on {} ({})", address, self.path, mode);
        Ok(())
    }

    fn transfer(&mut self, messages: &mut [ProtocolMessage]) -> Result<()> {
        if messages.is_empty() {
            return Err(LinuxI2cError::InvalidParameter(
                "No messages to transfer".into(),
            ));
        }
        if messages.len() > I2C_RDWR_IOCTL_MAX_MSGS {
            return Err(LinuxI2cError::InvalidParameter(format!(
                "Too many messages: {} (max {})",
                messages.len(),
                I2C_RDWR_IOCTL_MAX_MSGS
            )));
        }

        let fd = self.file.as_raw_fd();
        let mut msgs: Vec<I2cMsg> = messages.iter_mut().map(I2cMsg::from_message).collect();
        let data = I2cRdwrIoctlData {
            msgs: msgs.as_mut_ptr(),
            nmsgs: msgs.len() as u32,
        };

        for msg in &msgs {
            log::trace!(
                "linux_i2c: msg addr=0x{:02x} flags=0x{:04x} len={}",
                msg.addr,
                msg.flags,
                msg.len
            );
        }

        // The kernel writes read data through the buffer pointers in `msgs`,
        // which point into `messages` and stay valid for the whole call.
        let done = unsafe { ioctl::i2c_rdwr(fd, &data) }.map_err(|e| {
            LinuxI2cError::TransferFailed(std::io::Error::from_raw_os_error(e as i32))
        })?;

        let done = done as usize;
        if done != msgs.len() {
            return Err(LinuxI2cError::IncompleteTransfer {
                done,
                total: msgs.len(),
            });
        }

        log::debug!("linux_i2c: Transferred {} message(s)", done);
        Ok(())
    }
}

impl Drop for LinuxI2c {
    fn drop(&mut self) {
        log::debug!("linux_i2c: Closing {}", self.path);
    }
}

/// Query the adapter functionality mask
fn query_functionality(file: &File) -> Result<Functionality> {
    let mut funcs: libc::c_ulong = 0;
    unsafe { ioctl::i2c_funcs(file.as_raw_fd(), &mut funcs) }.map_err(|e| {
        LinuxI2cError::FunctionalityFailed(std::io::Error::from_raw_os_error(e as i32))
    })?;
    Ok(Functionality::from_bits_truncate(funcs as u64))
}
