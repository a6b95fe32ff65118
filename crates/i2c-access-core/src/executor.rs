//! Transaction execution
//!
//! Drives one plan through a bus backend: open, claim, transfer. Each step's
//! failure is terminal and the bus handle is dropped (closed) on every exit
//! path.

use alloc::string::{String, ToString};

use crate::address::{Address, ClaimMode};
use crate::bus::I2cBus;
use crate::error::{Error, Result};
use crate::plan::TransactionPlan;
use crate::Buffer;

/// Execute `plan` against the bus at `device_path`
///
/// `open` opens the bus node and returns a handle for it. On success the
/// bytes filled into the read message are returned: empty when the plan
/// has no read, exactly the requested length otherwise. An empty plan
/// performs no bus I/O at all.
pub fn execute<B, E, F>(
    open: F,
    device_path: &str,
    address: Address,
    mode: ClaimMode,
    mut plan: TransactionPlan,
) -> Result<Buffer>
where
    B: I2cBus,
    E: core::fmt::Display,
    F: FnOnce(&str) -> core::result::Result<B, E>,
{
    if plan.is_empty() {
        log::debug!("executor: empty plan, skipping bus access");
        return Ok(Buffer::new());
    }

    let mut bus = open(device_path).map_err(|e| Error::DeviceOpenFailed {
        path: device_path.to_string(),
        reason: e.to_string(),
    })?;
    log::debug!("executor: opened {}", device_path);

    bus.claim(address, mode)
        .map_err(|e| Error::AddressClaimFailed {
            address,
            reason: e.to_string(),
        })?;
    log::debug!("executor: claimed {} ({})", address, mode);

    log::debug!(
        "executor: submitting {} message(s) to {}",
        plan.len(),
        address
    );
    bus.transfer(plan.messages_mut())
        .map_err(|e| Error::TransactionFailed(e.to_string()))?;

    drop(bus);
    log::debug!("executor: transaction complete, {} released", device_path);

    Ok(plan.into_read_bytes())
}

/// Human readable summary of a plan, for log output
pub fn describe(plan: &TransactionPlan) -> String {
    use core::fmt::Write;

    let mut out = String::new();
    for (i, msg) in plan.messages().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{:?} {} byte(s) @ {}", msg.direction(), msg.len(), msg.address());
    }
    if out.is_empty() {
        out.push_str("no messages");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Direction, ProtocolMessage};
    use crate::request::TransactionSpec;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::vec::Vec;

    /// Step a mock bus should fail at
    #[derive(Clone, Copy, PartialEq)]
    enum FailAt {
        Nothing,
        Claim,
        Transfer,
    }

    struct MockBus {
        fail_at: FailAt,
        claims: Vec<(Address, ClaimMode)>,
        transfers: Vec<Vec<(Direction, usize)>>,
        reply: &'static [u8],
        released: Rc<Cell<bool>>,
    }

    impl MockBus {
        fn new(fail_at: FailAt, released: Rc<Cell<bool>>) -> Self {
            Self {
                fail_at,
                claims: Vec::new(),
                transfers: Vec::new(),
                reply: &[0x01, 0xA3, 0x5A],
                released,
            }
        }
    }

    impl Drop for MockBus {
        fn drop(&mut self) {
            self.released.set(true);
        }
    }

    impl I2cBus for MockBus {
        type Error = &'static str;

        fn claim(&mut self, address: Address, mode: ClaimMode) -> core::result::Result<(), Self::Error> {
            self.claims.push((address, mode));
            if self.fail_at == FailAt::Claim {
                return Err("device or resource busy");
            }
            Ok(())
        }

        fn transfer(&mut self, messages: &mut [ProtocolMessage]) -> core::result::Result<(), Self::Error> {
            self.transfers
                .push(messages.iter().map(|m| (m.direction(), m.len())).collect());
            if self.fail_at == FailAt::Transfer {
                return Err("remote I/O error");
            }
            for msg in messages.iter_mut() {
                if msg.direction() == Direction::Read {
                    let len = msg.len();
                    msg.buffer_mut().copy_from_slice(&self.reply[..len]);
                }
            }
            Ok(())
        }
    }

    fn plan_for(data: &[&str], read: Option<&str>, force: bool) -> (TransactionSpec, TransactionPlan) {
        let spec = TransactionSpec::parse("/dev/i2c-0", "0x68", data, read, force).unwrap();
        let plan = TransactionPlan::build(&spec);
        (spec, plan)
    }

    #[test]
    fn test_write_then_read_forced() {
        let released = Rc::new(Cell::new(false));
        let mut bus = MockBus::new(FailAt::Nothing, released.clone());
        let (spec, plan) = plan_for(&["3"], Some("2"), true);

        let bytes = execute(
            |path: &str| {
                assert_eq!(path, "/dev/i2c-0");
                Ok::<_, &str>(&mut bus)
            },
            spec.device_path(),
            spec.address(),
            spec.claim_mode(),
            plan,
        )
        .unwrap();

        assert_eq!(&bytes[..], &[0x01, 0xA3]);
        assert_eq!(bus.claims, [(spec.address(), ClaimMode::Forced)]);
        assert_eq!(
            bus.transfers,
            [[(Direction::Write, 1), (Direction::Read, 2)]]
        );
    }

    #[test]
    fn test_write_only_returns_no_bytes() {
        let released = Rc::new(Cell::new(false));
        let bus = MockBus::new(FailAt::Nothing, released.clone());
        let (spec, plan) = plan_for(&["1", "184", "255"], None, false);

        let bytes = execute(
            |_: &str| Ok::<_, &str>(bus),
            spec.device_path(),
            spec.address(),
            spec.claim_mode(),
            plan,
        )
        .unwrap();

        assert!(bytes.is_empty());
        assert!(released.get());
    }

    #[test]
    fn test_zero_length_read() {
        let released = Rc::new(Cell::new(false));
        let mut bus = MockBus::new(FailAt::Nothing, released);
        let (spec, plan) = plan_for(&[], Some("0"), false);

        let bytes = execute(
            |_: &str| Ok::<_, &str>(&mut bus),
            spec.device_path(),
            spec.address(),
            spec.claim_mode(),
            plan,
        )
        .unwrap();

        assert!(bytes.is_empty());
        assert_eq!(bus.transfers, [[(Direction::Read, 0)]]);
    }

    #[test]
    fn test_open_failure() {
        let (spec, plan) = plan_for(&["1"], None, false);

        let err = execute(
            |_: &str| Err::<MockBus, _>("No such file or directory"),
            spec.device_path(),
            spec.address(),
            spec.claim_mode(),
            plan,
        )
        .unwrap_err();

        assert_eq!(
            err,
            Error::DeviceOpenFailed {
                path: "/dev/i2c-0".into(),
                reason: "No such file or directory".into(),
            }
        );
        assert!(!err.is_validation());
    }

    #[test]
    fn test_claim_failure_skips_transfer_and_releases() {
        let released = Rc::new(Cell::new(false));
        let bus = MockBus::new(FailAt::Claim, released.clone());
        let (spec, plan) = plan_for(&["1"], Some("1"), false);

        let err = execute(
            |_: &str| Ok::<_, &str>(bus),
            spec.device_path(),
            spec.address(),
            spec.claim_mode(),
            plan,
        )
        .unwrap_err();

        assert!(matches!(err, Error::AddressClaimFailed { address, .. } if address == spec.address()));
        assert!(released.get());
    }

    #[test]
    fn test_transfer_failure_releases() {
        let released = Rc::new(Cell::new(false));
        let bus = MockBus::new(FailAt::Transfer, released.clone());
        let (spec, plan) = plan_for(&["1"], Some("1"), false);

        let err = execute(
            |_: &str| Ok::<_, &str>(bus),
            spec.device_path(),
            spec.address(),
            spec.claim_mode(),
            plan,
        )
        .unwrap_err();

        assert_eq!(err, Error::TransactionFailed("remote I/O error".into()));
        assert!(released.get());
    }

    #[test]
    fn test_empty_plan_never_opens() {
        let (spec, plan) = plan_for(&[], None, false);
        let opened = Cell::new(false);

        let bytes = execute(
            |_: &str| {
                opened.set(true);
                Err::<MockBus, _>("should not open")
            },
            spec.device_path(),
            spec.address(),
            spec.claim_mode(),
            plan,
        )
        .unwrap();

        assert!(bytes.is_empty());
        assert!(!opened.get());
    }

    #[test]
    fn test_describe() {
        let (_, plan) = plan_for(&["3"], Some("1"), false);
        assert_eq!(describe(&plan), "Write 1 byte(s) @ 0x68, Read 1 byte(s) @ 0x68");
        assert_eq!(describe(&TransactionPlan::default()), "no messages");
    }
}
