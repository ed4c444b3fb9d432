//! Capture Puzzle Solver
//!
//! Deals shuffled 4x4 boards and checks each one for a sequence of captures
//! that leaves the White king alone. Runs until `--max-deals` or Ctrl-C.

mod config;
mod deal;
mod report;
mod stats;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use capture_core::{Solver, Tables};

use crate::config::Args;
use crate::deal::Dealer;
use crate::report::Reporter;
use crate::stats::RunStats;

fn mode_name(prune: bool) -> &'static str {
    if prune {
        "King-neighbourhood cutoff"
    } else {
        "Full search (no cutoff)"
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let prune = !args.no_prune;

    println!("Capture Puzzle Solver");
    println!("=====================");
    println!("Mode: {}", mode_name(prune));
    if args.verify_prune {
        println!("Verifying against: {}", mode_name(!prune));
    }
    match args.seed {
        Some(seed) => println!("Seed: {}", seed),
        None => println!("Seed: random"),
    }
    if let Some(max) = args.max_deals {
        println!("Max deals: {}", max);
    }
    println!("Log interval: {}s\n", args.log_interval);

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, finishing current deal...");
        r.store(false, Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    let tables = Tables::shared();
    let mut solver = Solver::new(tables).with_pruning(prune);
    let mut checker = args
        .verify_prune
        .then(|| Solver::new(tables).with_pruning(!prune));
    let mut dealer = Dealer::new(args.seed);
    let reporter = Reporter::new(args.json);
    let mut stats = RunStats::new();

    while running.load(Ordering::SeqCst) {
        if args.max_deals.is_some_and(|max| stats.deals >= max) {
            break;
        }

        let mut puzzle = dealer.deal();
        solver.reset_stats();
        let solved = solver.solve(&mut puzzle);
        stats.record(solved, &solver.stats);

        if !solved {
            reporter.unsolved(stats.deals, &puzzle, &solver.stats);
        }

        if let Some(checker) = checker.as_mut() {
            let other = checker.solve(&mut puzzle);
            if other != solved {
                stats.mismatches += 1;
                let (pruned, full) = if prune { (solved, other) } else { (other, solved) };
                reporter.mismatch(stats.deals, &puzzle, pruned, full);
            }
        }

        if args.report_every > 0 && stats.deals % args.report_every == 0 {
            println!("{}", stats.report_line());
        }
        if stats.should_log(args.log_interval) {
            stats.log_progress();
        }
    }

    println!("\n=====================");
    if running.load(Ordering::SeqCst) {
        println!("Run complete!");
    } else {
        println!("Run interrupted.");
    }
    println!("=====================");
    println!("{}", stats.report_line());
    println!();
    stats.print_summary();

    if stats.mismatches > 0 {
        bail!(
            "cutoff changed the verdict on {} of {} deals",
            stats.mismatches,
            stats.deals
        );
    }
    Ok(())
}
