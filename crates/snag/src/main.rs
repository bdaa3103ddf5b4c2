use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use snag_core::config::BuildConfig;
use snag_core::debugger::{self, NativeHost};
use snag_core::error::{SnagError, SnagResult};
use snag_core::report::{self, CaptureBuffer, Reporter};
use snag_core::types::{Merged16, Merged32, Merged8};
use snag_core::{check_eq, check_ge, check_gt, check_le, check_lt, check_ne, check_within, check_within_float};
use snag_utils::{debug, info, init_logging, init_logging_in_dir, init_logging_with_level, LogFormat, LogLevel};

/// Debug-build checks that break into an attached debugger.
#[derive(Parser, Debug)]
#[command(name = "snag")]
#[command(version)]
#[command(about = "Inspect snag's build configuration, debugger attachment and merged value views", long_about = None)]
struct Cli
{
    /// Log level (error, warn, info, debug, trace); defaults to RUST_LOG or info
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    /// Write logs to a dated file in this directory instead of the console
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Show the compiled check configuration and debugger attachment
    Info,
    /// Print whether a debugger is attached to this process
    Attached,
    /// Show every view of a merged value
    Merged
    {
        /// Value to decompose (decimal or 0x hex, may be negative)
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Width of the merged value in bits (8, 16 or 32)
        #[arg(short, long, default_value_t = 32)]
        width: u32,
    },
    /// Run one check on command-line operands
    Check
    {
        /// Relation to check
        relation: RelationArg,
        /// Left operand
        #[arg(allow_hyphen_values = true)]
        left: String,
        /// Right operand
        #[arg(allow_hyphen_values = true)]
        right: String,
        /// Tolerance for the within relations
        #[arg(short, long, allow_hyphen_values = true)]
        tolerance: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum RelationArg
{
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Within,
    WithinFloat,
}

fn main()
{
    let cli = Cli::parse();

    let logging = match (&cli.log_dir, cli.log_level) {
        (Some(dir), level) => init_logging_in_dir(dir, level).map(|path| debug!("logging to {}", path.display())),
        (None, Some(level)) => init_logging_with_level(level, LogFormat::Pretty),
        (None, None) => init_logging(),
    };
    if let Err(e) = logging {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    match run_command(cli.command) {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when a check ran and failed
fn run_command(command: Commands) -> SnagResult<bool>
{
    match command {
        Commands::Info => {
            let config = BuildConfig::current();
            info!(%config, "build configuration");
            println!("{}", describe_config(&config));
            println!("debugger: {}", describe_attachment(debugger::is_attached()));
            Ok(true)
        }
        Commands::Attached => {
            println!("{}", describe_attachment(debugger::is_attached()));
            Ok(true)
        }
        Commands::Merged { value, width } => {
            let value = parse_value(&value)?;
            let bits = to_bits(value, width)?;
            info!(value, width, "decomposing merged value");
            let text = match width {
                8 => describe_merged8(Merged8::new(bits as u8)),
                16 => describe_merged16(Merged16::new(bits as u16)),
                _ => describe_merged32(Merged32::new(bits)),
            };
            print!("{text}");
            Ok(true)
        }
        Commands::Check {
            relation,
            left,
            right,
            tolerance,
        } => {
            if !BuildConfig::current().checks {
                println!("checks are compiled out of this build; nothing evaluated");
                return Ok(true);
            }

            let buffer = CaptureBuffer::new();
            let reporter = Reporter::new(buffer.clone(), NativeHost);
            report::scoped(reporter, || run_check(relation, &left, &right, tolerance.as_deref()))?;

            if buffer.is_empty() {
                println!("check passed");
                Ok(true)
            } else {
                eprint!("{}", buffer.contents());
                Ok(false)
            }
        }
    }
}

fn run_check(relation: RelationArg, left: &str, right: &str, tolerance: Option<&str>) -> SnagResult<()>
{
    if relation == RelationArg::WithinFloat {
        let tolerance = tolerance.ok_or_else(|| SnagError::InvalidArgument("within-float needs --tolerance".to_string()))?;
        let (left, right, tolerance) = (parse_float(left)?, parse_float(right)?, parse_float(tolerance)?);
        check_within_float!(left, right, tolerance, "from the command line");
        return Ok(());
    }

    let (left, right) = (parse_value(left)?, parse_value(right)?);
    match relation {
        RelationArg::Eq => check_eq!(left, right, "from the command line"),
        RelationArg::Ne => check_ne!(left, right, "from the command line"),
        RelationArg::Lt => check_lt!(left, right, "from the command line"),
        RelationArg::Gt => check_gt!(left, right, "from the command line"),
        RelationArg::Le => check_le!(left, right, "from the command line"),
        RelationArg::Ge => check_ge!(left, right, "from the command line"),
        RelationArg::Within | RelationArg::WithinFloat => {
            let tolerance = tolerance.ok_or_else(|| SnagError::InvalidArgument("within needs --tolerance".to_string()))?;
            let tolerance = parse_value(tolerance)?;
            check_within!(left, right, tolerance, "from the command line");
        }
    }
    Ok(())
}

/// Parse a decimal or `0x`-prefixed hex integer, optionally negative
fn parse_value(text: &str) -> SnagResult<i64>
{
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let magnitude = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)
    } else {
        digits.parse::<i64>()
    }
    .map_err(|e| SnagError::InvalidArgument(format!("{text:?} is not an integer: {e}")))?;

    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_float(text: &str) -> SnagResult<f64>
{
    text.trim()
        .parse::<f64>()
        .map_err(|e| SnagError::InvalidArgument(format!("{text:?} is not a number: {e}")))
}

/// Bit pattern of `value` in `width` bits
///
/// Accepts anything representable as either the signed or the unsigned
/// integer of that width.
fn to_bits(value: i64, width: u32) -> SnagResult<u32>
{
    if !matches!(width, 8 | 16 | 32) {
        return Err(SnagError::InvalidArgument(format!("width must be 8, 16 or 32, got {width}")));
    }

    let min = -(1i64 << (width - 1));
    let max = (1i64 << width) - 1;
    if value < min || value > max {
        return Err(SnagError::InvalidArgument(format!("{value} does not fit in {width} bits")));
    }

    let mask = if width == 32 { u32::MAX } else { (1u32 << width) - 1 };
    Ok(value as u32 & mask)
}

fn describe_config(config: &BuildConfig) -> String
{
    format!(
        "profile: {}\nchecks: {}\nbreakpoints: {}\nplatform: {}\npointer width: {}",
        config.profile(),
        if config.checks { "enabled" } else { "compiled out" },
        if config.breakpoints { "enabled" } else { "disabled" },
        config.platform,
        config.pointer_width
    )
}

fn describe_attachment(attached: SnagResult<bool>) -> String
{
    match attached {
        Ok(true) => "attached".to_string(),
        Ok(false) => "detached".to_string(),
        Err(e) => format!("unknown ({e})"),
    }
}

fn describe_merged32(merged: Merged32) -> String
{
    format!(
        "u32   {merged} ({})\ns32   {}\nu16   BA={:#06x} DC={:#06x}\ns16   BA={} DC={}\nu8    A={:#04x} B={:#04x} C={:#04x} D={:#04x}\ns8    A={} B={} C={} D={}\nnative bytes {:02x?}\n",
        merged.u32(),
        merged.s32(),
        merged.u16_ba(),
        merged.u16_dc(),
        merged.s16_ba(),
        merged.s16_dc(),
        merged.u8_a(),
        merged.u8_b(),
        merged.u8_c(),
        merged.u8_d(),
        merged.s8_a(),
        merged.s8_b(),
        merged.s8_c(),
        merged.s8_d(),
        merged.to_ne_bytes()
    )
}

fn describe_merged16(merged: Merged16) -> String
{
    format!(
        "u16   {merged} ({})\ns16   {}\nu8    A={:#04x} B={:#04x}\ns8    A={} B={}\nnative bytes {:02x?}\n",
        merged.u16(),
        merged.s16(),
        merged.u8_a(),
        merged.u8_b(),
        merged.s8_a(),
        merged.s8_b(),
        merged.to_ne_bytes()
    )
}

fn describe_merged8(merged: Merged8) -> String
{
    format!("u8    {merged} ({})\ns8    {}\n", merged.u8(), merged.s8())
}

#[cfg(test)]
mod tests
{
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition()
    {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_value()
    {
        assert_eq!(parse_value("42").unwrap(), 42);
        assert_eq!(parse_value("0x11223344").unwrap(), 0x1122_3344);
        assert_eq!(parse_value("0XfF").unwrap(), 255);
        assert_eq!(parse_value("-0x80").unwrap(), -128);
        assert_eq!(parse_value(" -7 ").unwrap(), -7);
        assert!(matches!(parse_value("0xzz"), Err(SnagError::InvalidArgument(_))));
        assert!(parse_value("twelve").is_err());
    }

    #[test]
    fn test_to_bits()
    {
        assert_eq!(to_bits(0x1234, 16).unwrap(), 0x1234);
        assert_eq!(to_bits(-1, 8).unwrap(), 0xff);
        assert_eq!(to_bits(-1, 32).unwrap(), u32::MAX);
        assert_eq!(to_bits(0xffff_ffff, 32).unwrap(), u32::MAX);
        assert!(to_bits(256, 8).is_err());
        assert!(to_bits(-129, 8).is_err());
        assert!(to_bits(1, 24).is_err());
    }

    #[test]
    fn test_describe_merged32()
    {
        let text = describe_merged32(Merged32::new(0x1122_3344));
        assert!(text.starts_with("u32   0x11223344 (287454020)\n"));
        assert!(text.contains("u16   BA=0x1122 DC=0x3344\n"));
        assert!(text.contains("u8    A=0x11 B=0x22 C=0x33 D=0x44\n"));
    }

    #[test]
    fn test_describe_merged16_and_8()
    {
        let text = describe_merged16(Merged16::new(0x1234));
        assert!(text.contains("u8    A=0x12 B=0x34\n"));
        assert_eq!(describe_merged8(Merged8::new(0xff)), "u8    0xff (255)\ns8    -1\n");
    }

    #[test]
    fn test_describe_attachment()
    {
        assert_eq!(describe_attachment(Ok(true)), "attached");
        assert_eq!(describe_attachment(Ok(false)), "detached");
        assert!(describe_attachment(Err(SnagError::Unsupported("x"))).starts_with("unknown"));
    }

    #[test]
    fn test_run_check_requires_tolerance()
    {
        let result = run_check(RelationArg::Within, "5", "10", None);
        assert!(matches!(result, Err(SnagError::InvalidArgument(_))));
        let result = run_check(RelationArg::WithinFloat, "5", "10", None);
        assert!(matches!(result, Err(SnagError::InvalidArgument(_))));
    }

    #[test]
    fn test_run_check_reports_failure()
    {
        let buffer = CaptureBuffer::new();
        let reporter = Reporter::new(buffer.clone(), NativeHost).with_breakpoints(false);
        report::scoped(reporter, || run_check(RelationArg::Within, "5", "10", Some("4"))).unwrap();
        assert_eq!(!buffer.is_empty(), BuildConfig::current().checks);

        buffer.clear();
        let reporter = Reporter::new(buffer.clone(), NativeHost).with_breakpoints(false);
        report::scoped(reporter, || run_check(RelationArg::Eq, "0x10", "16", None)).unwrap();
        assert!(buffer.is_empty());
    }
}
