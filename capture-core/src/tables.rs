//! Precomputed geometry for the 4×4 board.
//!
//! Two tables are built once and only read afterwards:
//! - `destinations[kind][square]`: squares a piece of `kind` reaches from
//!   `square` on an empty board.
//! - `between[a][b]`: squares strictly between `a` and `b` when they share a
//!   rank, file or diagonal; empty for every other pair.
//!
//! Legality of a slider capture is then `destinations & enemy` followed by a
//! single `between & occupied` test per target.

use lazy_static::lazy_static;

use crate::{Bitboard, PieceKind, Square};

lazy_static! {
    static ref SHARED: Tables = Tables::new();
}

/// Move-destination and line-of-sight lookup tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tables {
    destinations: [[Bitboard; 16]; PieceKind::COUNT],
    between: [[Bitboard; 16]; 16],
}

impl Tables {
    /// Build both tables.
    pub fn new() -> Tables {
        Tables {
            destinations: build_destinations(),
            between: build_between(),
        }
    }

    /// Process-wide instance, built on first use.
    pub fn shared() -> &'static Tables {
        &SHARED
    }

    /// Empty-board destinations for `kind` standing on `from`.
    #[inline]
    pub fn destinations(&self, kind: PieceKind, from: Square) -> Bitboard {
        self.destinations[kind.index()][from.index()]
    }

    /// Squares strictly between `a` and `b`, empty unless they are collinear.
    #[inline]
    pub fn between(&self, a: Square, b: Square) -> Bitboard {
        self.between[a.index()][b.index()]
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}

fn build_destinations() -> [[Bitboard; 16]; PieceKind::COUNT] {
    let mut table = [[Bitboard::EMPTY; 16]; PieceKind::COUNT];

    for from in Square::all() {
        for to in Square::all() {
            if to == from {
                continue;
            }
            let dx = from.x().abs_diff(to.x());
            let dy = from.y().abs_diff(to.y());

            let mut reach = |kind: PieceKind| table[kind.index()][from.index()] |= to.bit();
            if dx <= 1 && dy <= 1 {
                reach(PieceKind::King);
            }
            if (dx == 2 && dy == 1) || (dx == 1 && dy == 2) {
                reach(PieceKind::Knight);
            }
            if dx == dy {
                reach(PieceKind::Bishop);
                reach(PieceKind::Queen);
            }
            if dx == 0 || dy == 0 {
                reach(PieceKind::Rook);
                reach(PieceKind::Queen);
            }
        }
    }

    table
}

fn build_between() -> [[Bitboard; 16]; 16] {
    let mut table = [[Bitboard::EMPTY; 16]; 16];

    for a in Square::all() {
        for b in Square::all() {
            table[a.index()][b.index()] = ray_between(a, b);
        }
    }

    table
}

/// Walk from `a` towards `b` one step at a time, collecting inner squares.
fn ray_between(a: Square, b: Square) -> Bitboard {
    let dx = b.x() as i8 - a.x() as i8;
    let dy = b.y() as i8 - a.y() as i8;
    if a == b || !(dx == 0 || dy == 0 || dx.abs() == dy.abs()) {
        return Bitboard::EMPTY;
    }

    let (sx, sy) = (dx.signum(), dy.signum());
    let mut x = a.x() as i8 + sx;
    let mut y = a.y() as i8 + sy;
    let mut squares = Bitboard::EMPTY;
    while (x, y) != (b.x() as i8, b.y() as i8) {
        squares |= Square::from_xy(x as u8, y as u8).bit();
        x += sx;
        y += sy;
    }
    squares
}
