//! Validated transaction requests
//!
//! A [`TransactionSpec`] is built once from the raw command-line tokens.
//! Validation is fail-fast: the first rule violated is reported and nothing
//! is constructed.

use alloc::string::{String, ToString};

use crate::address::{Address, ClaimMode};
use crate::error::{Error, Result};
use crate::number::parse_number;
use crate::{Buffer, MAX_TRANSFER_LEN};

/// Prefix every I2C bus device node must start with
pub const DEVICE_PREFIX: &str = "/dev/i2c";

/// A validated, immutable description of one requested operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSpec {
    device_path: String,
    address: Address,
    write_payload: Buffer,
    read_length: Option<u8>,
    force: bool,
}

impl TransactionSpec {
    /// Validate raw tokens into a transaction request
    ///
    /// Rules are applied in order: device path, address, data bytes, read
    /// length. `read` is the raw `--read` value, if one was given.
    pub fn parse<S: AsRef<str>>(
        device: &str,
        address: &str,
        data: &[S],
        read: Option<&str>,
        force: bool,
    ) -> Result<Self> {
        if !device.starts_with(DEVICE_PREFIX) {
            return Err(Error::InvalidDevicePath(device.to_string()));
        }

        let address = parse_number(address)
            .within(u64::MAX)
            .and_then(Address::new)
            .ok_or_else(|| Error::InvalidAddress(address.to_string()))?;

        let mut write_payload = Buffer::new();
        for token in data {
            let token = token.as_ref();
            let byte = parse_number(token)
                .within(u8::MAX as u64)
                .ok_or_else(|| Error::PayloadByteOutOfRange(token.to_string()))?;
            write_payload
                .push(byte as u8)
                .map_err(|_| Error::PayloadTooLarge { len: data.len() })?;
        }

        let read_length = read
            .map(|token| {
                parse_number(token)
                    .within(MAX_TRANSFER_LEN as u64)
                    .map(|len| len as u8)
                    .ok_or_else(|| Error::InvalidReadLength(token.to_string()))
            })
            .transpose()?;

        Ok(Self {
            device_path: device.to_string(),
            address,
            write_payload,
            read_length,
            force,
        })
    }

    /// Bus device node path
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Target address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Bytes to write (empty means no write message)
    pub fn write_payload(&self) -> &[u8] {
        &self.write_payload
    }

    /// Number of bytes to read (`None` means no read message)
    pub fn read_length(&self) -> Option<u8> {
        self.read_length
    }

    /// Whether to claim the address over an existing driver
    pub fn force(&self) -> bool {
        self.force
    }

    /// Claim mode matching the force flag
    pub fn claim_mode(&self) -> ClaimMode {
        ClaimMode::from_force(self.force)
    }

    /// True when neither a write nor a read was requested
    pub fn is_empty(&self) -> bool {
        self.write_payload.is_empty() && self.read_length.is_none()
    }
}
