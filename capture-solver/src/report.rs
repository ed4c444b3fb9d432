//! Console output for deals the solver could not finish and for cutoff checks.

use capture_core::{Puzzle, SearchStats};
use serde::Serialize;

#[derive(Serialize)]
struct UnsolvedRecord<'a> {
    deal: u64,
    fen: &'a str,
    nodes: u64,
}

#[derive(Serialize)]
struct MismatchRecord<'a> {
    deal: u64,
    fen: &'a str,
    pruned: bool,
    full: bool,
}

/// Writes per-deal findings as plain text or JSON lines.
pub struct Reporter {
    json: bool,
}

impl Reporter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Line for a deal with no winning sequence.
    pub fn format_unsolved(&self, deal: u64, puzzle: &Puzzle, stats: &SearchStats) -> String {
        let fen = puzzle.describe();
        if self.json {
            to_json(&UnsolvedRecord {
                deal,
                fen: &fen,
                nodes: stats.nodes,
            })
        } else {
            format!("Unsolvable:  {}", fen)
        }
    }

    /// Line for a deal where the cutoff changed the verdict.
    pub fn format_mismatch(&self, deal: u64, puzzle: &Puzzle, pruned: bool, full: bool) -> String {
        let fen = puzzle.describe();
        if self.json {
            to_json(&MismatchRecord {
                deal,
                fen: &fen,
                pruned,
                full,
            })
        } else {
            format!(
                "Cutoff mismatch on deal {}: {} (pruned={}, full={})",
                deal, fen, pruned, full
            )
        }
    }

    pub fn unsolved(&self, deal: u64, puzzle: &Puzzle, stats: &SearchStats) {
        println!("{}", self.format_unsolved(deal, puzzle, stats));
    }

    pub fn mismatch(&self, deal: u64, puzzle: &Puzzle, pruned: bool, full: bool) {
        eprintln!("{}", self.format_mismatch(deal, puzzle, pruned, full));
    }
}

fn to_json<T: Serialize>(record: &T) -> String {
    match serde_json::to_string(record) {
        Ok(line) => line,
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}
