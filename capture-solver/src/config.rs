//! Command-line configuration for the deal loop.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "solver", version, about = "Deals random capture puzzles and checks each one for a solution", long_about = None)]
pub struct Args {
    /// Search every position in full, without the king-neighbourhood cutoff
    #[arg(long)]
    pub no_prune: bool,

    /// Also solve each deal in the other mode and report disagreements
    #[arg(long)]
    pub verify_prune: bool,

    /// Seed for the deal shuffler (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many deals (runs until Ctrl-C if omitted)
    #[arg(long)]
    pub max_deals: Option<u64>,

    /// Print a "Solved N out of M" line every N deals (0 disables)
    #[arg(long, default_value_t = 100_000)]
    pub report_every: u64,

    /// Seconds between progress lines
    #[arg(long, default_value_t = 5)]
    pub log_interval: u64,

    /// Print unsolved deals as JSON lines
    #[arg(long)]
    pub json: bool,
}
