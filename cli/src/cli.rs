use std::path::PathBuf;

/// County-level districting feasibility CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "countymander", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Check whether a state's counties admit a balanced, contiguous districting plan
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// County adjacency graph (networkx JSON, adjacency or node-link layout)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub graph: PathBuf,

    /// Number of districts
    #[arg(short = 'k', long)]
    pub districts: u32,

    /// Minimum district population (inclusive)
    #[arg(short = 'L', long)]
    pub lower: u64,

    /// Maximum district population (inclusive)
    #[arg(short = 'U', long)]
    pub upper: u64,

    /// Headerless population CSV (state code, county long name, population)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath, requires = "state")]
    pub populations: Option<PathBuf>,

    /// Two-letter state code used to filter the population CSV, e.g. NE
    #[arg(short, long)]
    pub state: Option<String>,

    /// Output district labels CSV (geo_id,district)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Output JSON district report
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub report: Option<PathBuf>,

    /// Solver settings (JSON); flags below override individual fields
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub solver_config: Option<PathBuf>,

    /// Wall-clock limit for the solver, in seconds
    #[arg(long)]
    pub time_limit: Option<f64>,

    /// Solver worker threads
    #[arg(long)]
    pub threads: Option<u32>,

    /// Allow districts centered at a county smaller than one of its members
    #[arg(long)]
    pub no_symmetry_breaking: bool,

    /// Node attribute holding the county GEOID
    #[arg(long, default_value = "GEOID10")]
    pub geo_id_key: String,

    /// Node attribute holding the county short name
    #[arg(long, default_value = "NAME10")]
    pub name_key: String,

    /// Node attribute holding the county long name (matched against the population CSV)
    #[arg(long, default_value = "NAMELSAD10")]
    pub long_name_key: String,

    /// Node attribute holding the county population
    #[arg(long, default_value = "POP20")]
    pub population_key: String,
}
