use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Fred P. Davis",
    version,
    about = "kdcontacts - Finds all pairs of ATOM records within a distance cutoff using a k-d tree.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub contacts: ContactsArgs,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors, and hide the progress bar
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used for the contact search.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report whether a structure uses alternate locations or insertion codes (prints 1 or 0).
    Scan(ScanArgs),
}

/// Arguments of the default contact search.
#[derive(Args, Debug, Clone, Default)]
pub struct ContactsArgs {
    /// Contact distance cutoff in Angstroms [default: 5.0, or the config file value]
    #[arg(value_name = "RADIUS", allow_negative_numbers = true)]
    pub radius: Option<f64>,

    /// Input PDB file. Reads standard input when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output file for the contact table. Writes standard output when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Warn about and skip malformed ATOM records instead of aborting.
    #[arg(long)]
    pub skip_malformed: bool,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// The label column to look for.
    #[arg(value_enum)]
    pub flag: ScanFlag,

    /// Input PDB file. Reads standard input when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFlag {
    /// Alternate location indicator (column 17).
    Altloc,
    /// Residue insertion code (column 27).
    Inscode,
}
