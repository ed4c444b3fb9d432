//! WASM bindings for capture-core
//!
//! Provides a JavaScript-friendly API for a browser front end: load a deal,
//! make and take back captures, and ask the solver for a hint or a full line.

use wasm_bindgen::prelude::*;

use crate::{Color, Move, Piece, Puzzle, Solver, Square, Tables, Undo};

/// WASM-friendly wrapper around Puzzle, with a take-back history.
#[wasm_bindgen]
pub struct WasmPuzzle {
    inner: Puzzle,
    history: Vec<Undo>,
}

#[wasm_bindgen]
impl WasmPuzzle {
    /// Create a puzzle from 16 piece letters in square order, e.g.
    /// "rbQnqBBbnNRKkRNr". The letters must be a permutation of the deal.
    #[wasm_bindgen(js_name = fromDeal)]
    pub fn from_deal(letters: &str) -> Result<WasmPuzzle, JsError> {
        let pieces: Vec<Piece> = letters
            .chars()
            .map(|c| Piece::from_letter(c).ok_or_else(|| JsError::new(&format!("bad piece letter '{}'", c))))
            .collect::<Result<_, _>>()?;
        let inner = Puzzle::try_from_deal(&pieces)?;
        Ok(WasmPuzzle { inner, history: Vec::new() })
    }

    /// Create a puzzle from FEN text
    #[wasm_bindgen(js_name = fromFen)]
    pub fn from_fen(text: &str) -> Result<WasmPuzzle, JsError> {
        let inner = Puzzle::from_fen(text)?;
        Ok(WasmPuzzle { inner, history: Vec::new() })
    }

    /// FEN including side to move
    pub fn fen(&self) -> String {
        self.inner.to_fen()
    }

    /// Side to move: "w" or "b"
    pub fn turn(&self) -> String {
        match self.inner.turn() {
            Color::White => "w".to_string(),
            Color::Black => "b".to_string(),
        }
    }

    /// Check whether only the White king is left
    #[wasm_bindgen(js_name = isSolved)]
    pub fn is_solved(&self) -> bool {
        self.inner.is_solved()
    }

    /// Get legal moves as JSON array of { from, to } square indices
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> JsValue {
        let moves: Vec<Move> = self.inner.legal_moves(Tables::shared()).iter().collect();
        serde_wasm_bindgen::to_value(&moves).unwrap_or(JsValue::NULL)
    }

    /// Apply a capture. Returns false (and changes nothing) if it is illegal.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, from: u8, to: u8) -> bool {
        let from = Square(from);
        if !from.is_valid() || !Square(to).is_valid() {
            return false;
        }
        if !self.inner.legal_destinations(Tables::shared(), from).contains(Square(to)) {
            return false;
        }
        let undo = self.inner.apply(Move::new(from, Square(to)));
        self.history.push(undo);
        true
    }

    /// Take back the last capture. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(undo) => {
                self.inner.undo(undo);
                true
            }
            None => false,
        }
    }

    /// Full winning line from the current position, or null if none exists
    pub fn solve(&mut self) -> JsValue {
        let mut solver = Solver::new(Tables::shared());
        match solver.solve_with_line(&mut self.inner) {
            Some(line) => serde_wasm_bindgen::to_value(line.moves()).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// Next move of a winning line, or null if none exists or already solved
    pub fn hint(&mut self) -> JsValue {
        let mut solver = Solver::new(Tables::shared());
        match solver.solve_with_line(&mut self.inner).and_then(|line| line.first()) {
            Some(mov) => serde_wasm_bindgen::to_value(&mov).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }
}
