//! Protocol message lists
//!
//! A [`TransactionPlan`] holds the messages submitted to the bus as a single
//! combined transaction: an optional write followed by an optional read.
//! Zero-length writes are dropped; zero-length reads are kept.

use crate::address::Address;
use crate::request::TransactionSpec;
use crate::Buffer;

/// Transfer direction of a single message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Controller to target
    Write,
    /// Target to controller
    Read,
}

/// One segment of a combined I2C transaction
///
/// Write messages own a copy of the payload. Read messages own a buffer of
/// the requested length that the bus backend fills in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolMessage {
    address: Address,
    direction: Direction,
    buffer: Buffer,
}

impl ProtocolMessage {
    /// Create a write message carrying `payload`
    pub fn write(address: Address, payload: &[u8]) -> Option<Self> {
        Some(Self {
            address,
            direction: Direction::Write,
            buffer: Buffer::from_slice(payload).ok()?,
        })
    }

    /// Create a read message with room for `len` bytes
    pub fn read(address: Address, len: u8) -> Self {
        let mut buffer = Buffer::new();
        // len <= u8::MAX == capacity, resize cannot fail
        let _ = buffer.resize(len as usize, 0);
        Self {
            address,
            direction: Direction::Read,
            buffer,
        }
    }

    /// Target address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Transfer direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of bytes transferred
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True for zero-length messages
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Message data (payload for writes, received bytes for reads)
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Mutable message data, for backends filling in a read
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    fn into_buffer(self) -> Buffer {
        self.buffer
    }
}

/// Ordered list of at most two messages: write first, then read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPlan {
    messages: heapless::Vec<ProtocolMessage, 2>,
}

impl TransactionPlan {
    /// Build the message list for a validated request
    pub fn build(spec: &TransactionSpec) -> Self {
        let mut messages = heapless::Vec::new();

        if !spec.write_payload().is_empty() {
            if let Some(msg) = ProtocolMessage::write(spec.address(), spec.write_payload()) {
                let _ = messages.push(msg);
            }
        }

        if let Some(len) = spec.read_length() {
            let _ = messages.push(ProtocolMessage::read(spec.address(), len));
        }

        Self { messages }
    }

    /// Messages in submission order
    pub fn messages(&self) -> &[ProtocolMessage] {
        &self.messages
    }

    /// Mutable messages, handed to the bus backend
    pub fn messages_mut(&mut self) -> &mut [ProtocolMessage] {
        &mut self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when the plan performs no bus transaction
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The write message, if any
    pub fn write_message(&self) -> Option<&ProtocolMessage> {
        self.messages
            .iter()
            .find(|m| m.direction() == Direction::Write)
    }

    /// The read message, if any
    pub fn read_message(&self) -> Option<&ProtocolMessage> {
        self.messages
            .iter()
            .find(|m| m.direction() == Direction::Read)
    }

    /// Consume the plan, returning the read buffer (empty without a read)
    pub fn into_read_bytes(self) -> Buffer {
        self.messages
            .into_iter()
            .find(|m| m.direction() == Direction::Read)
            .map(ProtocolMessage::into_buffer)
            .unwrap_or_default()
    }
}
