//! Bus backend trait
//!
//! The bus driver (address claiming, clocking, arbitration, NACK handling)
//! lives outside this crate. Backends expose it through [`I2cBus`].

use core::fmt::Display;

use crate::address::{Address, ClaimMode};
use crate::plan::ProtocolMessage;

/// An opened I2C bus handle
///
/// The handle is released when the value is dropped.
pub trait I2cBus {
    /// Backend error, reported to the user through its `Display` text
    type Error: Display;

    /// Associate the handle with `address`
    ///
    /// With [`ClaimMode::Forced`] the claim succeeds even if a kernel driver
    /// is already bound to the address.
    fn claim(&mut self, address: Address, mode: ClaimMode) -> Result<(), Self::Error>;

    /// Submit all messages as one combined transaction
    ///
    /// Messages are transferred in order, separated by repeated starts.
    /// Read messages have their buffers filled in. Partial completion is a
    /// failure.
    fn transfer(&mut self, messages: &mut [ProtocolMessage]) -> Result<(), Self::Error>;
}

// Lets callers keep ownership of a bus while the executor drives it
impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    type Error = B::Error;

    fn claim(&mut self, address: Address, mode: ClaimMode) -> Result<(), Self::Error> {
        (**self).claim(address, mode)
    }

    fn transfer(&mut self, messages: &mut [ProtocolMessage]) -> Result<(), Self::Error> {
        (**self).transfer(messages)
    }
}
