//! i2c-access-dummy - In-memory I2C bus emulator for testing
//!
//! This crate provides a dummy I2C bus populated with register-based target
//! devices. It's useful for testing and development without real hardware.
//!
//! Each device has 256 registers and a register pointer. The first byte of
//! a write sets the pointer, following bytes are stored with
//! auto-increment. A read returns registers starting at the pointer, also
//! auto-incrementing.

use std::collections::BTreeMap;

use i2c_access_core::{Address, ClaimMode, Direction, I2cBus, ProtocolMessage};
use thiserror::Error;

/// Errors reported by the dummy bus
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DummyError {
    /// Address is bound to a driver and the claim was not forced
    #[error("Device or resource busy (address 0x{0:02x} bound to a driver)")]
    Busy(u8),
    /// Transfer attempted before any address was claimed
    #[error("No target address claimed")]
    NotClaimed,
    /// No device acknowledged the address
    #[error("No acknowledge from address 0x{0:02x}")]
    Nack(u8),
    /// The bus node could not be opened
    #[error("No such device: {0}")]
    NoSuchBus(String),
}

/// An emulated register-based target device
#[derive(Debug, Clone)]
pub struct DummyDevice {
    registers: [u8; 256],
    pointer: u8,
    driver_bound: bool,
}

impl Default for DummyDevice {
    fn default() -> Self {
        Self {
            registers: [0; 256],
            pointer: 0,
            driver_bound: false,
        }
    }
}

impl DummyDevice {
    /// Create a device with all registers zeroed
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload registers starting at `start`
    pub fn with_registers(mut self, start: u8, values: &[u8]) -> Self {
        let mut reg = start;
        for &value in values {
            self.registers[reg as usize] = value;
            reg = reg.wrapping_add(1);
        }
        self
    }

    /// Mark the device as owned by a kernel driver
    pub fn bound_to_driver(mut self) -> Self {
        self.driver_bound = true;
        self
    }

    /// Current value of a register
    pub fn register(&self, reg: u8) -> u8 {
        self.registers[reg as usize]
    }

    /// Current register pointer
    pub fn pointer(&self) -> u8 {
        self.pointer
    }

    fn write(&mut self, data: &[u8]) {
        let Some((&pointer, values)) = data.split_first() else {
            return;
        };
        self.pointer = pointer;
        for &value in values {
            self.registers[self.pointer as usize] = value;
            self.pointer = self.pointer.wrapping_add(1);
        }
    }

    fn read(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            *byte = self.registers[self.pointer as usize];
            self.pointer = self.pointer.wrapping_add(1);
        }
    }
}

/// Dummy I2C bus
///
/// Emulates a bus with devices at fixed addresses for testing purposes.
#[derive(Debug, Clone, Default)]
pub struct DummyBus {
    devices: BTreeMap<u8, DummyDevice>,
    claimed: Option<Address>,
    claims: usize,
    transfers: usize,
}

impl DummyBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a device at `address`
    pub fn with_device(mut self, address: u8, device: DummyDevice) -> Self {
        self.devices.insert(address, device);
        self
    }

    /// Device attached at `address`, if any
    pub fn device(&self, address: u8) -> Option<&DummyDevice> {
        self.devices.get(&address)
    }

    /// Currently claimed address
    pub fn claimed(&self) -> Option<Address> {
        self.claimed
    }

    /// Number of successful claims
    pub fn claims(&self) -> usize {
        self.claims
    }

    /// Number of combined transactions submitted
    pub fn transfers(&self) -> usize {
        self.transfers
    }
}

impl I2cBus for DummyBus {
    type Error = DummyError;

    fn claim(&mut self, address: Address, mode: ClaimMode) -> Result<(), DummyError> {
        let bound = self
            .devices
            .get(&address.value())
            .is_some_and(|d| d.driver_bound);
        if bound && mode == ClaimMode::Normal {
            return Err(DummyError::Busy(address.value()));
        }

        log::debug!("dummy_i2c: Claimed {} ({})", address, mode);
        self.claimed = Some(address);
        self.claims += 1;
        Ok(())
    }

    fn transfer(&mut self, messages: &mut [ProtocolMessage]) -> Result<(), DummyError> {
        if self.claimed.is_none() {
            return Err(DummyError::NotClaimed);
        }
        self.transfers += 1;

        // All targets must acknowledge before anything is applied
        for msg in messages.iter() {
            let addr = msg.address().value();
            if !self.devices.contains_key(&addr) {
                return Err(DummyError::Nack(addr));
            }
        }

        for msg in messages.iter_mut() {
            let addr = msg.address().value();
            let Some(device) = self.devices.get_mut(&addr) else {
                return Err(DummyError::Nack(addr));
            };
            match msg.direction() {
                Direction::Write => {
                    log::trace!("dummy_i2c: Write {:02X?} to 0x{:02x}", msg.buffer(), addr);
                    device.write(msg.buffer());
                }
                Direction::Read => {
                    device.read(msg.buffer_mut());
                    log::trace!("dummy_i2c: Read {:02X?} from 0x{:02x}", msg.buffer(), addr);
                }
            }
        }

        Ok(())
    }
}
