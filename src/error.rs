//! Error types for the rules engine.
//!
//! Every operation that can be refused returns one of these variants and
//! leaves the game state untouched. Nothing here is fatal; the caller
//! decides how to surface a rejection.

use thiserror::Error;

use crate::piece::{Color, PieceType};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The requested move is not in the legal set for its origin square.
    /// Covers self-check, castling through attack, wrong-turn pieces and
    /// unreachable destinations alike.
    #[error("illegal move from {from:?} to {to:?}")]
    IllegalMove {
        from: (usize, usize),
        to: (usize, usize),
    },

    /// No king of the given color on the board. A board like this is not
    /// reachable through legal play; surfacing it beats scanning again.
    #[error("no {0:?} king on the board")]
    KingNotFound(Color),

    /// Undo requested with an empty move history.
    #[error("no moves to undo")]
    NoHistory,

    /// Promotion to something other than queen, rook, bishop or knight.
    #[error("cannot promote a pawn to {0:?}")]
    InvalidPromotionChoice(PieceType),
}

pub type EngineResult<T> = Result<T, EngineError>;
