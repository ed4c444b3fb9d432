//! Text rendering and parsing of puzzle positions.
//!
//! ```text
//! rbQn/qBBb/nNRK/kRNr w
//! ```
//!
//! Four ranks of four squares, row 0 first, separated by `/`. Uppercase is
//! White, lowercase Black, letters `k q r b n`. [`Puzzle::describe`] writes
//! `1` for each empty square; the parser also accepts digits as runs of empty
//! squares. The side to move is optional when parsing: without it, equal
//! material means White to move and anything else Black.

use thiserror::Error;

use crate::{Color, Piece, Puzzle, PuzzleError, Square};

/// Rejected FEN text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 4 ranks separated by '/', found {0}")]
    RankCount(usize),
    #[error("rank {rank} covers {width} squares, expected 4")]
    RankWidth { rank: usize, width: usize },
    #[error("unexpected character '{0}'")]
    BadChar(char),
    #[error("side to move must be 'w' or 'b', got '{0}'")]
    BadTurn(String),
    #[error("unexpected trailing field '{0}'")]
    Trailing(String),
    #[error(transparent)]
    Position(#[from] PuzzleError),
}

impl Puzzle {
    /// Fixed-width rendering of the 16 squares, `1` for empty.
    pub fn describe(&self) -> String {
        let mut out = String::with_capacity(19);
        for sq in Square::all() {
            if sq.0 != 0 && sq.x() == 0 {
                out.push('/');
            }
            out.push(self.piece_at(sq).map_or('1', Piece::letter));
        }
        out
    }

    /// [`Puzzle::describe`] followed by the side to move.
    pub fn to_fen(&self) -> String {
        let turn = match self.turn() {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{} {}", self.describe(), turn)
    }

    /// Parse a position written by [`Puzzle::to_fen`] or [`Puzzle::describe`].
    pub fn from_fen(text: &str) -> Result<Puzzle, FenError> {
        let mut fields = text.split_whitespace();
        let board = fields.next().unwrap_or("");

        let ranks: Vec<&str> = board.split('/').collect();
        if ranks.len() != 4 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut position = [None; 16];
        for (y, rank) in ranks.iter().enumerate() {
            let mut x = 0usize;
            for c in rank.chars() {
                if let Some(run) = c.to_digit(10) {
                    if run == 0 {
                        return Err(FenError::BadChar(c));
                    }
                    x += run as usize;
                } else {
                    let piece = Piece::from_letter(c).ok_or(FenError::BadChar(c))?;
                    if x < 4 {
                        position[y * 4 + x] = Some(piece);
                    }
                    x += 1;
                }
            }
            if x != 4 {
                return Err(FenError::RankWidth { rank: y, width: x });
            }
        }

        let turn = match fields.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::BadTurn(other.to_string())),
            None => infer_turn(&position),
        };
        if let Some(extra) = fields.next() {
            return Err(FenError::Trailing(extra.to_string()));
        }

        Ok(Puzzle::from_position(position, turn)?)
    }
}

/// White moves when material is level; each capture shifts the balance by one.
fn infer_turn(position: &[Option<Piece>; 16]) -> Color {
    let count = |color: Color| position.iter().flatten().filter(|p| p.color == color).count();
    if count(Color::White) == count(Color::Black) {
        Color::White
    } else {
        Color::Black
    }
}
