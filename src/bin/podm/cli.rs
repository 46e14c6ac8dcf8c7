use std::path::PathBuf;

use clap::{Args, Parser};

use pod_modes::Channel;

#[derive(Parser)]
#[command(
    name = "podm",
    about = "Proper orthogonal decomposition of unstructured-mesh velocity snapshots",
    version,
    author,
    before_help = crate::display::banner_for_help()
)]
pub struct Cli {
    #[command(flatten)]
    pub sources: SourceOptions,

    #[command(flatten)]
    pub decomposition: DecompositionOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    /// Run configuration (TOML); command-line flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Where the timestep sources come from.
///
/// Explicit inputs win over a manifest, which wins over a time-series scan.
/// With none of them given, `--root` defaults to the current directory.
#[derive(Args)]
#[command(next_help_heading = "Sources")]
pub struct SourceOptions {
    /// Snapshot file, repeatable (timestep order follows argument order)
    #[arg(short, long, value_name = "FILE", action = clap::ArgAction::Append)]
    pub input: Vec<PathBuf>,

    /// Text file listing one snapshot path per line (`#` starts a comment)
    #[arg(long, value_name = "FILE", conflicts_with = "input")]
    pub manifest: Option<PathBuf>,

    /// Directory containing `time_{i}/time_{i}_0_0.vtu` folders
    #[arg(long, value_name = "DIR", conflicts_with_all = ["input", "manifest"])]
    pub root: Option<PathBuf>,

    /// Number of timesteps to scan under --root
    #[arg(long, value_name = "N", default_value_t = 1441)]
    pub steps: usize,

    /// Index of the first timestep to scan under --root
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub first: usize,

    /// Name of the point-centered vector field
    #[arg(long, value_name = "NAME")]
    pub field: Option<String>,
}

#[derive(Args)]
#[command(next_help_heading = "Decomposition")]
pub struct DecompositionOptions {
    /// Velocity component to analyze (0/u, 1/v, 2/w); prompted if omitted
    #[arg(short = 'c', long, value_name = "COMPONENT")]
    pub component: Option<Channel>,

    /// Number of spatial modes to export; prompted if omitted
    #[arg(short = 'k', long = "modes", value_name = "K")]
    pub mode_count: Option<usize>,
}

#[derive(Args)]
#[command(next_help_heading = "Output")]
pub struct OutputOptions {
    /// Directory receiving modes.vtu, U.csv, S.csv and VT.csv
    #[arg(short, long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
