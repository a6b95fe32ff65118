//! CLI argument parsing

use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  i2c-access /dev/i2c-0 0x2b 1 184 255     # i2c write of 1 184 255 to 0x2b on /dev/i2c-0
  i2c-access /dev/i2c-0 0x68 3 -r 1 -f     # i2c write of 3 to 0x68, followed by 1 byte read, forced
  i2c-access /dev/i2c-0 0x29 -r 2          # i2c read of 2 bytes from 0x29";

#[derive(Parser, Debug)]
#[command(name = "i2c-access")]
#[command(
    author,
    version,
    about = "Performs simple reads and writes to 7bit i2c addresses",
    long_about = None,
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Verbosity level (-v prints what is happening, -vv, -vvv for debug logs)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Validate and show the transaction, but don't execute it
    #[arg(long)]
    pub dry_run: bool,

    /// Perform an i2c read of this many bytes (0-255) after any write
    #[arg(short, long, value_name = "BYTES", allow_negative_numbers = true)]
    pub read: Option<String>,

    /// Access i2c devices controlled by a kernel driver
    #[arg(short, long)]
    pub force: bool,

    /// I2C bus device node (e.g. /dev/i2c-0)
    #[arg(value_name = "I2C_DEV")]
    pub device: Option<String>,

    /// 7-bit target address (0x04-0x77)
    #[arg(value_name = "ADDR", allow_negative_numbers = true)]
    pub address: Option<String>,

    /// Bytes to write, in order (decimal, 0x hex or 0 octal)
    #[arg(value_name = "BYTE", allow_negative_numbers = true)]
    pub data: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_only() {
        let cli = Cli::try_parse_from(["i2c-access", "/dev/i2c-0", "0x2b", "1", "184", "255"])
            .unwrap();
        assert_eq!(cli.device.as_deref(), Some("/dev/i2c-0"));
        assert_eq!(cli.address.as_deref(), Some("0x2b"));
        assert_eq!(cli.data, ["1", "184", "255"]);
        assert_eq!(cli.read, None);
        assert!(!cli.force);
        assert!(!cli.dry_run);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_options_after_data() {
        let cli =
            Cli::try_parse_from(["i2c-access", "/dev/i2c-0", "0x68", "3", "-r", "1", "-f"]).unwrap();
        assert_eq!(cli.data, ["3"]);
        assert_eq!(cli.read.as_deref(), Some("1"));
        assert!(cli.force);
    }

    #[test]
    fn test_long_options() {
        let cli = Cli::try_parse_from([
            "i2c-access",
            "--read",
            "2",
            "--dry-run",
            "--force",
            "-vv",
            "/dev/i2c-0",
            "0x29",
        ])
        .unwrap();
        assert!(cli.data.is_empty());
        assert_eq!(cli.read.as_deref(), Some("2"));
        assert!(cli.dry_run);
        assert!(cli.force);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let cli = Cli::try_parse_from(["i2c-access", "/dev/i2c-0", "0x50", "-1", "-r", "-2"])
            .unwrap();
        assert_eq!(cli.data, ["-1"]);
        assert_eq!(cli.read.as_deref(), Some("-2"));
    }

    #[test]
    fn test_missing_positionals_parse() {
        let cli = Cli::try_parse_from(["i2c-access"]).unwrap();
        assert!(cli.device.is_none());
        assert!(cli.address.is_none());
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["i2c-access", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
