//! Solve a single position given in board notation.
//!
//! Usage:
//!   cargo run --release --bin solve_fen -- "rbQn/qBBb/nNRK/kRNr w"
//!   cargo run --release --bin solve_fen -- bBrN/Knbn/NrkR/BRQq --no-prune
//!
//! Prints the verdict, the search counters and, when solvable, the winning
//! line in algebraic notation.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use capture_core::{Puzzle, Solver, Tables};

#[derive(Parser, Debug)]
#[command(name = "solve_fen", version, about = "Solve one capture puzzle position", long_about = None)]
struct Args {
    /// Board ranks separated by '/', optionally followed by the side to move
    #[arg(required = true, num_args = 1..=2)]
    fen: Vec<String>,

    /// Search without the king-neighbourhood cutoff
    #[arg(long)]
    no_prune: bool,

    /// Print the result as a single JSON object
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let text = args.fen.join(" ");
    let mut puzzle =
        Puzzle::from_fen(&text).with_context(|| format!("could not parse position {:?}", text))?;

    let mut solver = Solver::new(Tables::shared()).with_pruning(!args.no_prune);
    let start = Instant::now();
    let solution = solver.solve_with_line(&mut puzzle);
    let elapsed = start.elapsed();

    if args.json {
        let value = serde_json::json!({
            "fen": puzzle.to_fen(),
            "solvable": solution.is_some(),
            "line": solution.as_ref().map(|s| s.to_string()),
            "solution": solution,
            "stats": solver.stats,
        });
        println!("{}", serde_json::to_string(&value)?);
        return Ok(());
    }

    println!("Position: {}", puzzle.to_fen());
    match &solution {
        Some(line) if line.is_empty() => println!("Result: already solved"),
        Some(line) => println!("Result: solvable in {} captures", line.len()),
        None => println!("Result: not solvable"),
    }
    println!(
        "Nodes: {} (cut off {}, max depth {})",
        solver.stats.nodes, solver.stats.pruned, solver.stats.max_depth
    );
    println!("Time: {:.2?}", elapsed);

    if let Some(line) = solution {
        for (i, mov) in line.into_iter().enumerate() {
            println!("{:>3}. {}", i + 1, mov);
        }
    }
    Ok(())
}
