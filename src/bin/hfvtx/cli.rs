use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hf_vertex::Species;

#[derive(Parser)]
#[command(
    name = "hfvtx",
    about = "Heavy-flavour decay-vertex candidates from charged tracks",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build three-track decay candidates
    #[command(visible_alias = "t")]
    Triplets(TripletArgs),

    /// Build two-track close pairs
    #[command(visible_alias = "p")]
    Pairs(PairArgs),
}

/// I/O options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// TOML event file (stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Tab-separated candidate table (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Closest-approach and solver options shared by all commands.
#[derive(Args)]
#[command(next_help_heading = "Topology Options")]
pub struct TopologyOptions {
    /// Trajectories used for the (1,2) closest-approach solve
    #[arg(
        long = "closest-approach",
        value_name = "MODE",
        default_value = "straight-line"
    )]
    pub closest_approach: ApproachMode,

    /// Convergence tolerance of helix solves (cm)
    #[arg(long = "solver-tolerance", value_name = "CM", default_value = "1e-6")]
    pub tolerance: f64,

    /// Iteration cap of helix solves
    #[arg(long = "solver-max-iter", value_name = "N", default_value = "100")]
    pub max_iterations: u32,
}

#[derive(Args)]
pub struct TripletArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Mass hypotheses of the three daughters, in role order
    #[arg(
        short,
        long,
        value_name = "SPECIES",
        value_delimiter = ',',
        default_values_t = [Species::Kaon, Species::Pion, Species::Pion]
    )]
    pub masses: Vec<Species>,

    #[command(flatten)]
    pub topology: TopologyOptions,
}

#[derive(Args)]
pub struct PairArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Mass hypotheses of the two daughters, in role order
    #[arg(
        short,
        long,
        value_name = "SPECIES",
        value_delimiter = ',',
        default_values_t = [Species::Kaon, Species::Pion]
    )]
    pub masses: Vec<Species>,

    #[command(flatten)]
    pub topology: TopologyOptions,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum ApproachMode {
    /// Tangent lines at each track's point nearest the primary vertex
    #[default]
    StraightLine,
    /// Exact helices
    Helix,
}

pub fn parse() -> Cli {
    Cli::parse()
}
