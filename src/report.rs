//! User-facing output
//!
//! Results go to stdout, notices to stderr.

use i2c_access_core::TransactionSpec;

/// Printed when neither a write nor a read was requested
pub const EMPTY_NOTICE: &str =
    "no read requested, and no bytes to write - so no i2c transaction performed";

/// Printed instead of executing in dry-run mode
pub const DRY_RUN_NOTICE: &str = "Dry-run - no i2c transactions performed";

/// Format bytes as space-separated `0xNN` values
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lines describing the planned transaction
pub fn plan_lines(spec: &TransactionSpec) -> Vec<String> {
    let mut lines = Vec::new();

    if !spec.write_payload().is_empty() {
        lines.push(format!(
            "Performing i2c write to address {} on bus {}",
            spec.address(),
            spec.device_path()
        ));
        lines.push(format_bytes(spec.write_payload()));
    }

    if let Some(len) = spec.read_length() {
        lines.push(format!(
            "Performing i2c read of {} bytes from address {} on bus {}",
            len,
            spec.address(),
            spec.device_path()
        ));
    }

    lines
}

/// Echo the planned transaction (verbose mode)
pub fn print_plan(spec: &TransactionSpec) {
    for line in plan_lines(spec) {
        println!("{}", line);
    }
}

/// Print the bytes returned by the read, if there are any
pub fn print_read(bytes: &[u8]) {
    if !bytes.is_empty() {
        println!("{}", format_bytes(bytes));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(&[0x01, 0xA3]), "0x01 0xA3");
        assert_eq!(format_bytes(&[0x00]), "0x00");
        assert_eq!(format_bytes(&[]), "");
    }

    #[test]
    fn test_plan_lines_write_and_read() {
        let spec = TransactionSpec::parse("/dev/i2c-0", "0x68", &["3"], Some("1"), true).unwrap();
        assert_eq!(
            plan_lines(&spec),
            [
                "Performing i2c write to address 0x68 on bus /dev/i2c-0",
                "0x03",
                "Performing i2c read of 1 bytes from address 0x68 on bus /dev/i2c-0",
            ]
        );
    }

    #[test]
    fn test_plan_lines_read_only() {
        let spec =
            TransactionSpec::parse("/dev/i2c-1", "0x29", &[] as &[&str], Some("0"), false).unwrap();
        assert_eq!(
            plan_lines(&spec),
            ["Performing i2c read of 0 bytes from address 0x29 on bus /dev/i2c-1"]
        );
    }

    #[test]
    fn test_plan_lines_empty() {
        let spec =
            TransactionSpec::parse("/dev/i2c-1", "0x29", &[] as &[&str], None, false).unwrap();
        assert!(plan_lines(&spec).is_empty());
    }
}
