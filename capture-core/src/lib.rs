//! Capture-only chess puzzle on a 4×4 board.
//!
//! Sixteen pieces (2 knights, 2 bishops, 2 rooks, a queen and a king per
//! color) are dealt onto the sixteen squares. White and Black alternate, and
//! every move must capture an enemy piece. The puzzle is solved when the
//! White king is the only piece left. The White king itself can never be
//! captured.
//!
//! # Board Encoding
//!
//! ```text
//! Squares (index = y * 4 + x):
//!    0  1  2  3
//!    4  5  6  7
//!    8  9 10 11
//!   12 13 14 15
//!
//! Occupancy: one u16 per color, bit i set iff square i holds a piece of
//! that color. The two masks never overlap.
//! ```
//!
//! The search itself lives in [`search`]; the precomputed move and
//! line-of-sight tables live in [`tables`].

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod fen;
pub mod search;
pub mod tables;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use fen::FenError;
pub use search::{can_prune, SearchStats, Solution, Solver};
pub use tables::Tables;

/// Piece color.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Get the other color.
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-color arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Kind of piece. All movement patterns are symmetric.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
    King = 4,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 5;

    /// All kinds in index order.
    pub const ALL: [PieceKind; 5] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Index into per-kind arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the piece slides along rays (and can therefore be blocked).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Lowercase letter used in the text rendering.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a letter (either case).
    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece. Empty squares are `None` wherever a square is read.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const WHITE_KING: Piece = Piece::new(Color::White, PieceKind::King);

    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece { color, kind }
    }

    /// Letter for the text rendering: uppercase White, lowercase Black.
    pub fn letter(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a rendering letter back into a piece.
    pub fn from_letter(c: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Piece::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The sixteen pieces every deal is a permutation of.
pub const DEAL: [Piece; 16] = [
    Piece::new(Color::White, PieceKind::Knight),
    Piece::new(Color::White, PieceKind::Knight),
    Piece::new(Color::Black, PieceKind::Knight),
    Piece::new(Color::Black, PieceKind::Knight),
    Piece::new(Color::White, PieceKind::Bishop),
    Piece::new(Color::White, PieceKind::Bishop),
    Piece::new(Color::Black, PieceKind::Bishop),
    Piece::new(Color::Black, PieceKind::Bishop),
    Piece::new(Color::White, PieceKind::Rook),
    Piece::new(Color::White, PieceKind::Rook),
    Piece::new(Color::Black, PieceKind::Rook),
    Piece::new(Color::Black, PieceKind::Rook),
    Piece::new(Color::White, PieceKind::Queen),
    Piece::new(Color::Black, PieceKind::Queen),
    Piece::new(Color::White, PieceKind::King),
    Piece::new(Color::Black, PieceKind::King),
];

/// Square on the 4×4 board (0-15).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square(pub u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 16;

    /// Create a square from its column and row (0-3 each).
    #[inline]
    pub const fn from_xy(x: u8, y: u8) -> Square {
        debug_assert!(x < 4 && y < 4);
        Square(y * 4 + x)
    }

    /// Column (0-3).
    #[inline]
    pub const fn x(self) -> u8 {
        self.0 % 4
    }

    /// Row (0-3), row 0 being the first group in the text rendering.
    #[inline]
    pub const fn y(self) -> u8 {
        self.0 / 4
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 < 16
    }

    /// Single-bit mask for this square.
    #[inline]
    pub const fn bit(self) -> Bitboard {
        Bitboard(1 << self.0)
    }

    /// Iterate over all 16 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..16).map(Square)
    }
}

/// Squares print as file letter and rank digit, rank 4 being row 0.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.x()) as char;
        let rank = 4 - self.y();
        write!(f, "{}{}", file, rank)
    }
}

/// Set of squares, bit i for square i.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bitboard(pub u16);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u16::MAX);

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & (1 << sq.0) != 0
    }

    /// Number of squares in the set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over squares in ascending index order.
    #[inline]
    pub fn squares(self) -> Squares {
        Squares(self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::with_capacity(19);
        for sq in Square::all() {
            if sq.0 != 0 && sq.x() == 0 {
                s.push('/');
            }
            s.push(if self.contains(sq) { '1' } else { '.' });
        }
        write!(f, "Bitboard({})", s)
    }
}

/// Ascending iterator over the squares of a [`Bitboard`].
pub struct Squares(u16);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let sq = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Square(sq))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

/// A capture: the piece on `from` takes the piece on `to`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.from, self.to)
    }
}

/// Undo information for backtracking during search.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Undo {
    /// The move that was applied.
    pub mov: Move,
    /// The piece that stood on `mov.to` before the capture.
    pub captured: Piece,
}

/// Upper bound on captures available in one position.
/// Eight movers, and no piece on a 4×4 board has more than eight targets.
pub const MAX_MOVES: usize = 64;

/// A fixed-size move list that avoids heap allocation.
#[derive(Clone, Copy)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: u8,
}

impl MoveList {
    /// Create an empty move list.
    #[inline]
    pub const fn new() -> MoveList {
        MoveList {
            moves: [Move::new(Square(0), Square(0)); MAX_MOVES],
            len: 0,
        }
    }

    /// Add a move to the list.
    #[inline]
    pub fn push(&mut self, mov: Move) {
        debug_assert!((self.len as usize) < MAX_MOVES);
        self.moves[self.len as usize] = mov;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn get(&self, idx: usize) -> Move {
        self.moves[idx]
    }

    pub fn contains(&self, mov: Move) -> bool {
        self.iter().any(|m| m == mov)
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves[..self.len as usize].iter().copied()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Rejected deal or position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("a deal has 16 pieces, got {0}")]
    DealSize(usize),
    #[error("deal holds {found} of '{piece}', expected {expected}")]
    PieceCount { piece: Piece, expected: usize, found: usize },
    #[error("position needs exactly one White king, found {0}")]
    WhiteKingCount(usize),
}

/// Full puzzle state, mutated in place by the search.
///
/// `occupancy` is kept in lockstep with `position`, and `white_king` always
/// points at the White king. [`Puzzle::apply`] and [`Puzzle::undo`] are exact
/// inverses.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Puzzle {
    position: [Option<Piece>; 16],
    occupancy: [Bitboard; 2],
    white_king: Square,
    turn: Color,
    ply: u32,
}

impl Puzzle {
    /// Build the starting state from a shuffled deal. White moves first.
    ///
    /// Panics if `pieces` is not a permutation of [`DEAL`]; that is a bug in
    /// the caller. Use [`Puzzle::try_from_deal`] to get the error instead.
    pub fn from_deal(pieces: &[Piece]) -> Puzzle {
        match Puzzle::try_from_deal(pieces) {
            Ok(puzzle) => puzzle,
            Err(e) => panic!("invalid deal: {}", e),
        }
    }

    /// Build the starting state from a shuffled deal, checking the multiset.
    pub fn try_from_deal(pieces: &[Piece]) -> Result<Puzzle, PuzzleError> {
        if pieces.len() != Square::COUNT {
            return Err(PuzzleError::DealSize(pieces.len()));
        }
        for expected_piece in DEAL {
            let expected = DEAL.iter().filter(|&&p| p == expected_piece).count();
            let found = pieces.iter().filter(|&&p| p == expected_piece).count();
            if found != expected {
                return Err(PuzzleError::PieceCount {
                    piece: expected_piece,
                    expected,
                    found,
                });
            }
        }

        let mut position = [None; 16];
        for (slot, &piece) in position.iter_mut().zip(pieces) {
            *slot = Some(piece);
        }
        Puzzle::from_position(position, Color::White)
    }

    /// Build a state from an arbitrary (possibly sparse) position.
    ///
    /// Only requires exactly one White king; any other material is allowed.
    pub fn from_position(position: [Option<Piece>; 16], turn: Color) -> Result<Puzzle, PuzzleError> {
        let mut occupancy = [Bitboard::EMPTY; 2];
        let mut kings = Vec::new();
        for sq in Square::all() {
            if let Some(piece) = position[sq.index()] {
                occupancy[piece.color.index()] |= sq.bit();
                if piece == Piece::WHITE_KING {
                    kings.push(sq);
                }
            }
        }
        if kings.len() != 1 {
            return Err(PuzzleError::WhiteKingCount(kings.len()));
        }

        Ok(Puzzle {
            position,
            occupancy,
            white_king: kings[0],
            turn,
            ply: 0,
        })
    }

    /// Piece on a square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.position[sq.index()]
    }

    /// The whole board, indexed by square.
    #[inline]
    pub fn position(&self) -> &[Option<Piece>; 16] {
        &self.position
    }

    /// Squares held by one color.
    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy[color.index()]
    }

    /// Squares held by either color.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupancy[0] | self.occupancy[1]
    }

    #[inline]
    pub fn white_king(&self) -> Square {
        self.white_king
    }

    /// Side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Half-moves applied since construction.
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Pieces left on the board.
    #[inline]
    pub fn piece_count(&self) -> u32 {
        self.occupied().count()
    }

    /// True when the White king is the only piece left.
    #[inline]
    pub fn is_solved(&self) -> bool {
        (self.occupancy(Color::White) & !self.white_king.bit()).is_empty()
            && self.occupancy(Color::Black).is_empty()
    }

    /// Squares the piece on `from` may capture on.
    ///
    /// Empty for an empty square and for pieces of the side not to move. The
    /// White king's square is never a target, and sliders need a clear line.
    pub fn legal_destinations(&self, tables: &Tables, from: Square) -> Bitboard {
        let piece = match self.piece_at(from) {
            Some(piece) if piece.color == self.turn => piece,
            _ => return Bitboard::EMPTY,
        };

        let targets = tables.destinations(piece.kind, from)
            & self.occupancy(self.turn.opposite())
            & !self.white_king.bit();
        if !piece.kind.is_slider() {
            return targets;
        }

        let occupied = self.occupied();
        let mut legal = Bitboard::EMPTY;
        for to in targets.squares() {
            if (tables.between(from, to) & occupied).is_empty() {
                legal |= to.bit();
            }
        }
        legal
    }

    /// All legal captures for the side to move, ordered by source then target.
    pub fn legal_moves(&self, tables: &Tables) -> MoveList {
        let mut moves = MoveList::new();
        for from in self.occupancy(self.turn).squares() {
            for to in self.legal_destinations(tables, from).squares() {
                moves.push(Move::new(from, to));
            }
        }
        moves
    }

    /// Apply a capture in place, returning undo information.
    ///
    /// Does NOT validate legality - the caller must pass a move produced by
    /// [`Puzzle::legal_destinations`] or [`Puzzle::legal_moves`].
    pub fn apply(&mut self, mov: Move) -> Undo {
        let moved = self.position[mov.from.index()].expect("No piece at source");
        let captured = self.position[mov.to.index()].expect("No piece at destination");
        debug_assert_eq!(moved.color, self.turn);
        debug_assert_ne!(captured.color, moved.color);

        self.occupancy[moved.color.index()] ^= mov.from.bit() | mov.to.bit();
        self.occupancy[captured.color.index()] ^= mov.to.bit();
        self.position[mov.to.index()] = Some(moved);
        self.position[mov.from.index()] = None;

        if moved == Piece::WHITE_KING {
            self.white_king = mov.to;
        }
        self.turn = self.turn.opposite();
        self.ply += 1;

        Undo { mov, captured }
    }

    /// Undo a capture, restoring the state to exactly what it was.
    ///
    /// This is the inverse of [`Puzzle::apply`].
    pub fn undo(&mut self, undo: Undo) {
        let mov = undo.mov;
        let moved = self.position[mov.to.index()].expect("No piece at destination");

        self.position[mov.from.index()] = Some(moved);
        self.position[mov.to.index()] = Some(undo.captured);
        self.occupancy[undo.captured.color.index()] ^= mov.to.bit();
        self.occupancy[moved.color.index()] ^= mov.from.bit() | mov.to.bit();

        if moved == Piece::WHITE_KING {
            self.white_king = mov.from;
        }
        self.turn = self.turn.opposite();
        self.ply -= 1;
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(kind: PieceKind) -> Option<Piece> {
        Some(Piece::new(Color::White, kind))
    }

    fn b(kind: PieceKind) -> Option<Piece> {
        Some(Piece::new(Color::Black, kind))
    }

    #[test]
    fn test_color_opposite() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
        assert_eq!(Color::White.opposite().opposite(), Color::White);
    }

    #[test]
    fn test_square_xy() {
        assert_eq!(Square::from_xy(0, 0), Square(0));
        assert_eq!(Square::from_xy(3, 0), Square(3));
        assert_eq!(Square::from_xy(1, 2), Square(9));
        assert_eq!(Square(14).x(), 2);
        assert_eq!(Square(14).y(), 3);
    }

    #[test]
    fn test_square_display() {
        assert_eq!(Square(0).to_string(), "a4");
        assert_eq!(Square(3).to_string(), "d4");
        assert_eq!(Square(12).to_string(), "a1");
        assert_eq!(Square(15).to_string(), "d1");
        assert_eq!(Move::new(Square(0), Square(5)).to_string(), "a4xb3");
    }

    #[test]
    fn test_bitboard_squares_ascending() {
        let bb = Square(9).bit() | Square(2).bit() | Square(15).bit();
        let squares: Vec<Square> = bb.squares().collect();
        assert_eq!(squares, vec![Square(2), Square(9), Square(15)]);
        assert_eq!(bb.count(), 3);
        assert!(bb.contains(Square(9)));
        assert!(!bb.contains(Square(3)));
        assert_eq!(Bitboard::EMPTY.squares().count(), 0);
    }

    #[test]
    fn test_piece_letters() {
        assert_eq!(Piece::WHITE_KING.letter(), 'K');
        assert_eq!(Piece::new(Color::Black, PieceKind::Knight).letter(), 'n');
        for piece in DEAL {
            assert_eq!(Piece::from_letter(piece.letter()), Some(piece));
        }
        assert_eq!(Piece::from_letter('p'), None);
    }

    #[test]
    fn test_from_deal_initial_state() {
        let puzzle = Puzzle::from_deal(&DEAL);
        assert_eq!(puzzle.turn(), Color::White);
        assert_eq!(puzzle.ply(), 0);
        assert_eq!(puzzle.piece_count(), 16);
        assert_eq!(puzzle.occupied(), Bitboard::FULL);
        assert!((puzzle.occupancy(Color::White) & puzzle.occupancy(Color::Black)).is_empty());
        assert_eq!(puzzle.white_king(), Square(14));
        assert_eq!(puzzle.piece_at(Square(14)), Some(Piece::WHITE_KING));
    }

    #[test]
    fn test_from_deal_rejects_wrong_multiset() {
        let mut pieces = DEAL;
        pieces[0] = Piece::new(Color::White, PieceKind::Queen);
        let err = Puzzle::try_from_deal(&pieces).unwrap_err();
        assert!(matches!(err, PuzzleError::PieceCount { .. }));

        let err = Puzzle::try_from_deal(&DEAL[..15]).unwrap_err();
        assert_eq!(err, PuzzleError::DealSize(15));
    }

    #[test]
    #[should_panic(expected = "invalid deal")]
    fn test_from_deal_panics_on_contract_violation() {
        let mut pieces = DEAL;
        pieces[14] = Piece::new(Color::Black, PieceKind::King);
        Puzzle::from_deal(&pieces);
    }

    #[test]
    fn test_from_position_requires_one_white_king() {
        let empty = [None; 16];
        assert_eq!(
            Puzzle::from_position(empty, Color::White).unwrap_err(),
            PuzzleError::WhiteKingCount(0)
        );

        let mut two = [None; 16];
        two[0] = w(PieceKind::King);
        two[5] = w(PieceKind::King);
        assert_eq!(
            Puzzle::from_position(two, Color::White).unwrap_err(),
            PuzzleError::WhiteKingCount(2)
        );
    }

    #[test]
    fn test_is_solved() {
        let mut position = [None; 16];
        position[7] = w(PieceKind::King);
        let puzzle = Puzzle::from_position(position, Color::Black).unwrap();
        assert!(puzzle.is_solved());

        position[3] = b(PieceKind::King);
        let puzzle = Puzzle::from_position(position, Color::White).unwrap();
        assert!(!puzzle.is_solved());

        position[3] = w(PieceKind::Rook);
        let puzzle = Puzzle::from_position(position, Color::White).unwrap();
        assert!(!puzzle.is_solved());
    }

    #[test]
    fn test_legal_destinations_empty_square() {
        let tables = Tables::new();
        let mut position = [None; 16];
        position[0] = w(PieceKind::King);
        position[5] = b(PieceKind::Knight);
        let puzzle = Puzzle::from_position(position, Color::White).unwrap();
        assert_eq!(puzzle.legal_destinations(&tables, Square(10)), Bitboard::EMPTY);
    }

    #[test]
    fn test_legal_destinations_wrong_side() {
        let tables = Tables::new();
        let mut position = [None; 16];
        position[0] = w(PieceKind::King);
        position[5] = b(PieceKind::Knight);
        position[1] = w(PieceKind::Rook);
        let puzzle = Puzzle::from_position(position, Color::White).unwrap();
        // Black's knight cannot move on White's turn.
        assert_eq!(puzzle.legal_destinations(&tables, Square(5)), Bitboard::EMPTY);
    }

    #[test]
    fn test_rook_blocked_by_either_color() {
        let tables = Tables::new();
        let mut position = [None; 16];
        position[0] = w(PieceKind::Rook);
        position[1] = w(PieceKind::King);
        position[3] = b(PieceKind::Knight);
        position[12] = b(PieceKind::Bishop);
        position[4] = b(PieceKind::Knight);
        let puzzle = Puzzle::from_position(position, Color::White).unwrap();

        // Along the rank the king blocks d4; down the file the knight on 4 is
        // the first piece, so 12 is shadowed.
        let dests = puzzle.legal_destinations(&tables, Square(0));
        assert_eq!(dests, Square(4).bit());
    }

    #[test]
    fn test_white_king_never_a_target() {
        let tables = Tables::new();
        let mut position = [None; 16];
        position[0] = w(PieceKind::King);
        position[3] = b(PieceKind::Rook);
        let puzzle = Puzzle::from_position(position, Color::Black).unwrap();
        assert_eq!(puzzle.legal_destinations(&tables, Square(3)), Bitboard::EMPTY);
        assert!(puzzle.legal_moves(&tables).is_empty());
    }

    #[test]
    fn test_black_king_can_be_captured() {
        let tables = Tables::new();
        let mut position = [None; 16];
        position[0] = w(PieceKind::King);
        position[1] = b(PieceKind::King);
        let puzzle = Puzzle::from_position(position, Color::White).unwrap();
        assert_eq!(puzzle.legal_destinations(&tables, Square(0)), Square(1).bit());
    }

    #[test]
    fn test_legal_moves_order() {
        let tables = Tables::new();
        let mut position = [None; 16];
        position[5] = w(PieceKind::King);
        position[0] = b(PieceKind::Knight);
        position[10] = b(PieceKind::Rook);
        position[15] = w(PieceKind::Queen);
        position[6] = b(PieceKind::Bishop);
        let puzzle = Puzzle::from_position(position, Color::White).unwrap();

        let moves: Vec<Move> = puzzle.legal_moves(&tables).iter().collect();
        assert_eq!(
            moves,
            vec![
                Move::new(Square(5), Square(0)),
                Move::new(Square(5), Square(6)),
                Move::new(Square(5), Square(10)),
                Move::new(Square(15), Square(10)),
            ]
        );
    }

    #[test]
    fn test_apply_undo_roundtrip() {
        let tables = Tables::new();
        let puzzle = Puzzle::from_deal(&DEAL);

        for mov in puzzle.legal_moves(&tables).iter() {
            let mut working = puzzle.clone();
            let undo = working.apply(mov);
            assert_ne!(working, puzzle);
            assert_eq!(working.piece_count(), 15);
            assert_eq!(working.turn(), Color::Black);
            assert_eq!(working.ply(), 1);
            working.undo(undo);
            assert_eq!(working, puzzle);
        }
    }

    #[test]
    fn test_apply_tracks_white_king() {
        let mut position = [None; 16];
        position[0] = w(PieceKind::King);
        position[5] = b(PieceKind::Knight);
        let mut puzzle = Puzzle::from_position(position, Color::White).unwrap();

        let undo = puzzle.apply(Move::new(Square(0), Square(5)));
        assert_eq!(undo.captured, Piece::new(Color::Black, PieceKind::Knight));
        assert_eq!(puzzle.white_king(), Square(5));
        assert_eq!(puzzle.piece_at(Square(0)), None);
        assert!(puzzle.is_solved());

        puzzle.undo(undo);
        assert_eq!(puzzle.white_king(), Square(0));
        assert_eq!(puzzle.piece_at(Square(5)), b(PieceKind::Knight));
        assert!(!puzzle.is_solved());
    }

    #[test]
    fn test_move_list() {
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(Move::new(Square(1), Square(2)));
        list.push(Move::new(Square(3), Square(4)));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1), Move::new(Square(3), Square(4)));
        assert!(list.contains(Move::new(Square(1), Square(2))));
        assert!(!list.contains(Move::new(Square(2), Square(1))));
    }
}
