//! Exhaustive backtracking search with an optional king-neighbourhood cutoff.
//!
//! The search applies a capture, recurses, and undoes the capture before
//! trying the next one, so the live [`Puzzle`] always reflects the path from
//! the root to the current frame. Every capture removes a piece, so the depth
//! never exceeds 15 and no cycle detection is needed.

use std::fmt;

use serde::Serialize;

use crate::{Move, PieceKind, Puzzle, Tables};

/// True when no piece of either color stands next to the White king.
///
/// Captures only ever land on occupied squares, so an empty neighbourhood
/// stays empty and the king can never make the final capture.
#[inline]
pub fn can_prune(tables: &Tables, puzzle: &Puzzle) -> bool {
    (tables.destinations(PieceKind::King, puzzle.white_king()) & puzzle.occupied()).is_empty()
}

/// Counters collected during solving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Positions entered, root included
    pub nodes: u64,
    /// Positions cut off by [`can_prune`]
    pub pruned: u64,
    /// Deepest ply reached below the root
    pub max_depth: u32,
}

impl SearchStats {
    /// Fold another run's counters into this one.
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.pruned += other.pruned;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// Winning line found by [`Solver::solve_with_line`].
///
/// Replaying the moves in order from the solved position's starting state
/// leaves the White king alone on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Solution {
    moves: Vec<Move>,
}

impl Solution {
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// First move of the line, if the position is not already solved.
    pub fn first(&self) -> Option<Move> {
        self.moves.first().copied()
    }
}

impl IntoIterator for Solution {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mov) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", mov)?;
        }
        Ok(())
    }
}

/// Depth-first solver over a borrowed set of tables.
pub struct Solver<'t> {
    tables: &'t Tables,
    prune: bool,
    /// Solver statistics, accumulated across calls until [`Solver::reset_stats`]
    pub stats: SearchStats,
    /// Moves on the path from the root to the current frame
    path: Vec<Move>,
}

impl<'t> Solver<'t> {
    /// Solver with the king-neighbourhood cutoff enabled.
    pub fn new(tables: &'t Tables) -> Self {
        Self {
            tables,
            prune: true,
            stats: SearchStats::default(),
            path: Vec::with_capacity(16),
        }
    }

    /// Enable or disable the king-neighbourhood cutoff.
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    pub fn pruning(&self) -> bool {
        self.prune
    }

    pub fn tables(&self) -> &'t Tables {
        self.tables
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Decide whether the puzzle can be reduced to the lone White king.
    ///
    /// The puzzle is mutated during the search and restored before return.
    pub fn solve(&mut self, puzzle: &mut Puzzle) -> bool {
        self.path.clear();
        let solved = self.search(puzzle, 0);
        self.path.clear();
        solved
    }

    /// Like [`Solver::solve`], but also returns the first winning line found.
    pub fn solve_with_line(&mut self, puzzle: &mut Puzzle) -> Option<Solution> {
        self.path.clear();
        if self.search(puzzle, 0) {
            Some(Solution {
                moves: std::mem::take(&mut self.path),
            })
        } else {
            self.path.clear();
            None
        }
    }

    /// Returns true if a winning line exists below this node. On success the
    /// line is left in `self.path`.
    fn search(&mut self, puzzle: &mut Puzzle, depth: u32) -> bool {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if puzzle.is_solved() {
            return true;
        }

        if self.prune && can_prune(self.tables, puzzle) {
            self.stats.pruned += 1;
            return false;
        }

        let moves = puzzle.legal_moves(self.tables);
        for mov in moves.iter() {
            let undo = puzzle.apply(mov);
            self.path.push(mov);

            let found = self.search(puzzle, depth + 1);

            puzzle.undo(undo);
            if found {
                return true;
            }
            self.path.pop();
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Piece, Square};

    fn puzzle(pieces: &[(u8, Color, PieceKind)], turn: Color) -> Puzzle {
        let mut position = [None; 16];
        for &(sq, color, kind) in pieces {
            position[sq as usize] = Some(Piece::new(color, kind));
        }
        Puzzle::from_position(position, turn).unwrap()
    }

    #[test]
    fn test_king_takes_last_knight() {
        let tables = Tables::new();
        let mut p = puzzle(
            &[(0, Color::White, PieceKind::King), (5, Color::Black, PieceKind::Knight)],
            Color::White,
        );
        let before = p.clone();
        let mut solver = Solver::new(&tables);

        let line = solver.solve_with_line(&mut p).expect("should be solvable");
        assert_eq!(line.moves(), &[Move::new(Square(0), Square(5))]);
        assert_eq!(p, before);

        p.apply(line.first().unwrap());
        assert!(p.is_solved());
    }

    #[test]
    fn test_rook_cannot_take_white_king() {
        let tables = Tables::new();
        let mut p = puzzle(
            &[(0, Color::White, PieceKind::King), (3, Color::Black, PieceKind::Rook)],
            Color::Black,
        );
        assert!(p.legal_moves(&tables).is_empty());
        assert!(can_prune(&tables, &p));

        let mut solver = Solver::new(&tables);
        assert!(!solver.solve(&mut p));
        assert_eq!(solver.stats.nodes, 1);
        assert_eq!(solver.stats.pruned, 1);

        let mut unpruned = Solver::new(&tables).with_pruning(false);
        assert!(!unpruned.solve(&mut p));
        assert_eq!(unpruned.stats.pruned, 0);
    }

    #[test]
    fn test_already_solved() {
        let tables = Tables::new();
        let mut p = puzzle(&[(9, Color::White, PieceKind::King)], Color::Black);
        let mut solver = Solver::new(&tables);
        let line = solver.solve_with_line(&mut p).unwrap();
        assert!(line.is_empty());
        assert_eq!(solver.stats.nodes, 1);
    }

    #[test]
    fn test_mover_without_captures_is_lost() {
        // The rook on b4 has nothing to take and shields the king, so the
        // cutoff does not fire and the search expands the root only.
        let tables = Tables::new();
        let mut p = puzzle(
            &[
                (0, Color::White, PieceKind::King),
                (1, Color::White, PieceKind::Rook),
                (10, Color::Black, PieceKind::Knight),
                (15, Color::Black, PieceKind::Knight),
            ],
            Color::White,
        );
        assert!(!can_prune(&tables, &p));
        let mut solver = Solver::new(&tables);
        assert!(!solver.solve(&mut p));
        assert_eq!(solver.stats.nodes, 1);
        assert_eq!(solver.stats.pruned, 0);
    }

    #[test]
    fn test_backtracks_out_of_king_first_captures() {
        // Both king captures leave Black stuck. The rook has to go first so
        // the black rook recaptures next to the king.
        let tables = Tables::new();
        let mut p = puzzle(
            &[
                (10, Color::White, PieceKind::King),
                (12, Color::White, PieceKind::Rook),
                (13, Color::Black, PieceKind::Bishop),
                (9, Color::Black, PieceKind::Rook),
            ],
            Color::White,
        );
        let before = p.clone();
        let mut solver = Solver::new(&tables);
        let line = solver.solve_with_line(&mut p).unwrap();
        assert_eq!(
            line.moves(),
            &[
                Move::new(Square(12), Square(13)),
                Move::new(Square(9), Square(13)),
                Move::new(Square(10), Square(13)),
            ]
        );
        assert_eq!(line.to_string(), "a1xb1 b2xb1 c2xb1");
        assert_eq!(p, before);
        assert_eq!(solver.stats.nodes, 6);
        assert_eq!(solver.stats.max_depth, 3);
    }

    #[test]
    fn test_solution_display_and_iter() {
        let solution = Solution {
            moves: vec![Move::new(Square(7), Square(4)), Move::new(Square(0), Square(4))],
        };
        assert_eq!(solution.to_string(), "d3xa3 a4xa3");
        assert_eq!(solution.first(), Some(Move::new(Square(7), Square(4))));
        let collected: Vec<Move> = solution.into_iter().collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn test_stats_merge() {
        let mut a = SearchStats { nodes: 3, pruned: 1, max_depth: 2 };
        let b = SearchStats { nodes: 5, pruned: 0, max_depth: 7 };
        a.merge(&b);
        assert_eq!(a, SearchStats { nodes: 8, pruned: 1, max_depth: 7 });
    }
}
