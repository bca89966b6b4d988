//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wealthscope_dataset::Preset;
use wealthscope_domain::{DisplayMode, UnboundedBinPolicy};

/// Wealthscope - Re-bracket the global wealth distribution.
#[derive(Debug, Parser)]
#[command(name = "wealthscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset document (JSON); defaults to the built-in reference brackets
    #[arg(short, long, global = true, env = "WEALTHSCOPE_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Show shares or absolute figures
    #[arg(short, long, value_enum, global = true)]
    pub mode: Option<ModeArg>,

    /// Attribution rule for the open-ended bin
    #[arg(long, value_enum, global = true)]
    pub policy: Option<PolicyArg>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the bracket breakdown for a set of thresholds
    Breakdown(BreakdownArgs),

    /// Show the loaded dataset and its consistency report
    Dataset,

    /// Enter interactive threshold editing mode
    Repl,
}

/// Arguments for the breakdown command.
#[derive(Debug, Parser)]
pub struct BreakdownArgs {
    /// Threshold values (e.g. 0 10k 1.5m)
    #[arg(value_parser = parse_amount, allow_negative_numbers = true)]
    pub thresholds: Vec<f64>,

    /// Add a named threshold preset
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,
}

/// Display mode argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Shares of the global totals
    Percentage,
    /// Absolute counts and amounts
    Absolute,
}

/// Unbounded bin policy argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PolicyArg {
    /// Every bracket starting inside the open tail receives it
    StartWithinBin,
    /// Only the lowest such bracket receives it
    LowestBracketOnly,
}

/// Threshold preset argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Published brackets: 0, 10k, 100k, 1M
    Reference,
    /// Dataset percentile cut-offs
    Percentiles,
}

/// Parse a wealth amount such as `10000`, `10,000`, `10k`, `1.5m` or `2b`.
///
/// Negative values parse successfully so the engine can reject them with a
/// proper threshold error.
pub fn parse_amount(s: &str) -> Result<f64, String> {
    let cleaned: String = s.trim().trim_start_matches('$').chars().filter(|&c| c != ',' && c != '_').collect();
    let lower = cleaned.to_lowercase();

    let (number, multiplier) = match lower.chars().last() {
        Some('k') => (&lower[..lower.len() - 1], 1e3),
        Some('m') => (&lower[..lower.len() - 1], 1e6),
        Some('b') => (&lower[..lower.len() - 1], 1e9),
        Some('t') => (&lower[..lower.len() - 1], 1e12),
        _ => (lower.as_str(), 1.0),
    };

    let value: f64 = number
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    Ok(value * multiplier)
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<ModeArg> for DisplayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Percentage => DisplayMode::Percentage,
            ModeArg::Absolute => DisplayMode::Absolute,
        }
    }
}

impl From<PolicyArg> for UnboundedBinPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::StartWithinBin => UnboundedBinPolicy::StartWithinBin,
            PolicyArg::LowestBracketOnly => UnboundedBinPolicy::LowestBracketOnly,
        }
    }
}

impl From<PresetArg> for Preset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Reference => Preset::Reference,
            PresetArg::Percentiles => Preset::Percentiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_defaults_to_repl() {
        let cli = Cli::parse_from(["wealthscope"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_breakdown_command() {
        let cli = Cli::parse_from(["wealthscope", "breakdown", "0", "10k", "1.5m", "--preset", "reference"]);
        match cli.command {
            Some(Command::Breakdown(args)) => {
                assert_eq!(args.thresholds, vec![0.0, 10_000.0, 1_500_000.0]);
                assert!(matches!(args.preset, Some(PresetArg::Reference)));
            }
            _ => panic!("Expected Breakdown command"),
        }
    }

    #[test]
    fn test_negative_threshold_reaches_engine() {
        let cli = Cli::parse_from(["wealthscope", "breakdown", "-5"]);
        match cli.command {
            Some(Command::Breakdown(args)) => assert_eq!(args.thresholds, vec![-5.0]),
            _ => panic!("Expected Breakdown command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "wealthscope",
            "dataset",
            "--mode",
            "absolute",
            "--policy",
            "lowest-bracket-only",
            "--format",
            "json",
        ]);
        assert!(matches!(cli.command, Some(Command::Dataset)));
        assert!(matches!(cli.mode, Some(ModeArg::Absolute)));
        assert!(matches!(cli.policy, Some(PolicyArg::LowestBracketOnly)));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("10000"), Ok(10_000.0));
        assert_eq!(parse_amount("10,000"), Ok(10_000.0));
        assert_eq!(parse_amount("$2.5K"), Ok(2_500.0));
        assert_eq!(parse_amount("1.5m"), Ok(1_500_000.0));
        assert_eq!(parse_amount("2b"), Ok(2_000_000_000.0));
        assert_eq!(parse_amount("-3"), Ok(-3.0));
        assert!(parse_amount("lots").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_mode_conversion() {
        let mode: DisplayMode = ModeArg::Absolute.into();
        assert_eq!(mode, DisplayMode::Absolute);
    }
}
