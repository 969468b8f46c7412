//! CLI argument definitions for the ECMO calculator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ecmo_model::{EcmoMode, Sex};

#[derive(Parser)]
#[command(
    name = "ecmo",
    version,
    about = "ECMO candidacy, pre-cannulation timeout and initiation calculator",
    long_about = "Score a patient's suitability for ECMO and plan initiation.\n\n\
                  Computes SAVE (VA) or RESP (VV), SOFA and the candidacy decision,\n\
                  checks the pre-cannulation timeout and sizes the cannulas."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include patient identifiers in log output.
    ///
    /// Off by default: names are logged as "[REDACTED]".
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full assessment for a JSON case file.
    Assess(AssessArgs),

    /// Compute BMI, BSA and ideal body weight.
    Anthropometrics(AnthropometricsArgs),

    /// Recommend drainage and return cannulas for a target flow.
    Cannula(CannulaArgs),

    /// Print the cannula flow reference guide.
    Reference,
}

#[derive(Parser)]
pub struct AssessArgs {
    /// Path to the case file (JSON).
    #[arg(value_name = "CASE")]
    pub case: PathBuf,

    /// Engine configuration file (TOML). Missing keys use defaults.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use the older rule set (tiered timeout, flat 2.4 L/min/m² target).
    #[arg(long = "legacy", conflicts_with = "config")]
    pub legacy: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Also print a SOAP note.
    #[arg(long = "note")]
    pub note: bool,

    /// Print the patient name in the note instead of redacting it.
    #[arg(long = "show-name", requires = "note")]
    pub show_name: bool,
}

#[derive(Parser)]
pub struct AnthropometricsArgs {
    /// Weight in kilograms.
    #[arg(long = "weight", value_name = "KG")]
    pub weight: f64,

    /// Height in centimeters.
    #[arg(long = "height", value_name = "CM")]
    pub height: f64,

    /// Male or Female.
    #[arg(long = "sex")]
    pub sex: Sex,
}

#[derive(Parser)]
pub struct CannulaArgs {
    /// Target blood flow in L/min.
    #[arg(long = "target-flow", value_name = "L_MIN")]
    pub target_flow: f64,

    /// Body surface area in m².
    #[arg(long = "bsa", value_name = "M2")]
    pub bsa: f64,

    /// VV or VA.
    #[arg(long = "mode")]
    pub mode: EcmoMode,

    /// Engine configuration file (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
