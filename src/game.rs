//! The game session value: placement plus side to move, castling rights,
//! en passant target and move history. Every engine operation takes and
//! returns state through here; there is no shared or global state.

use serde::{Deserialize, Serialize};

use crate::board::{Board, CastlingRights};
use crate::error::{EngineError, EngineResult};
use crate::movegen::{castling_moves, pseudo_legal_moves};
use crate::moves::{Move, MoveRecord};
use crate::piece::{Color, Piece, PieceType};

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum GameStatus {
    Normal,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// Result of `GameState::evaluate` for the side to move. Check with legal
/// moves remaining is reported through `in_check` alongside a `Normal`
/// status.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Evaluation {
    pub in_check: bool,
    pub status: GameStatus,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<(usize, usize)>,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh game from the standard starting position.
    pub fn new() -> Self {
        GameState {
            board: Board::initial(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::initial(),
            en_passant_target: None,
            history: Vec::new(),
        }
    }

    /// Legal moves for the piece on `square`, for highlighting. Empty when
    /// the square is empty or holds a piece of the side not to move; only
    /// `execute` turns that into an error.
    pub fn legal_moves(&self, square: (usize, usize)) -> EngineResult<Vec<Move>> {
        match self.board.get(square) {
            Some(p) if p.color == self.side_to_move => self.legal_moves_for(p.color, square),
            _ => Ok(Vec::new()),
        }
    }

    /// Every legal move for `color`, in square-scan order.
    pub fn all_legal_moves(&self, color: Color) -> EngineResult<Vec<Move>> {
        let mut moves = Vec::new();
        for r in 0..8 {
            for c in 0..8 {
                if let Some(p) = self.board.get((r, c)) {
                    if p.color == color {
                        moves.extend(self.legal_moves_for(color, (r, c))?);
                    }
                }
            }
        }
        Ok(moves)
    }

    fn legal_moves_for(&self, color: Color, square: (usize, usize)) -> EngineResult<Vec<Move>> {
        let piece = match self.board.get(square) {
            Some(p) if p.color == color => p,
            _ => return Ok(Vec::new()),
        };

        let mut candidates = pseudo_legal_moves(&self.board, self.en_passant_target, square);
        if piece.piece_type == PieceType::King {
            candidates.extend(castling_moves(&self.board, &self.castling_rights, color));
        }

        // Speculate each candidate on a copy; the live board is never
        // touched by a rejected move.
        let mut legal = Vec::new();
        for m in candidates {
            let mut probe = self.board.clone();
            apply_placement(&mut probe, &m);
            let (kr, kc) = probe.find_king(color)?;
            if !probe.is_square_attacked_by(kr, kc, color.opposite()) {
                legal.push(m);
            }
        }
        Ok(legal)
    }

    /// Whether `color`'s king is currently attacked.
    pub fn in_check(&self, color: Color) -> EngineResult<bool> {
        let (kr, kc) = self.board.find_king(color)?;
        Ok(self.board.is_square_attacked_by(kr, kc, color.opposite()))
    }

    pub fn has_any_legal_move(&self, color: Color) -> EngineResult<bool> {
        for r in 0..8 {
            for c in 0..8 {
                if let Some(p) = self.board.get((r, c)) {
                    if p.color == color && !self.legal_moves_for(color, (r, c))?.is_empty() {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    /// Game status for the side to move.
    pub fn evaluate(&self) -> EngineResult<Evaluation> {
        let defender = self.side_to_move;
        let in_check = self.in_check(defender)?;
        let has_moves = self.has_any_legal_move(defender)?;
        let status = match (in_check, has_moves) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            _ => GameStatus::Normal,
        };
        Ok(Evaluation { in_check, status })
    }

    /// Execute a move. The move is identified by origin, destination and
    /// promotion choice against the legal set; its special-move flags are
    /// taken from the generated candidate, so callers may pass parsed or
    /// hand-built moves. Nothing is mutated on any error path.
    pub fn execute(&mut self, mv: &Move) -> EngineResult<()> {
        if let Some(kind) = mv.promotion {
            if !kind.is_valid_promotion() {
                return Err(EngineError::InvalidPromotionChoice(kind));
            }
        }

        let illegal = EngineError::IllegalMove {
            from: mv.from,
            to: mv.to,
        };
        let m = *self
            .legal_moves(mv.from)?
            .iter()
            .find(|c| c.from == mv.from && c.to == mv.to && c.promotion == mv.promotion)
            .ok_or(illegal)?;
        let moved = self.board.get(m.from).ok_or(illegal)?;

        // Record what gets captured and where, before touching the board.
        let (captured, captured_square) = if m.is_en_passant {
            let sq = (m.from.0, m.to.1);
            (self.board.get(sq), Some(sq))
        } else {
            (self.board.get(m.to), self.board.get(m.to).map(|_| m.to))
        };
        let record = MoveRecord {
            mv: m,
            moved,
            captured,
            captured_square,
            prev_castling_rights: self.castling_rights,
            prev_en_passant: self.en_passant_target,
        };

        apply_placement(&mut self.board, &m);

        // A double pawn push exposes the passed-over square for one ply.
        let is_double_push = moved.piece_type == PieceType::Pawn
            && (m.from.0 as i32 - m.to.0 as i32).abs() == 2;
        self.en_passant_target = if is_double_push {
            Some(((m.from.0 + m.to.0) / 2, m.from.1))
        } else {
            None
        };

        if moved.piece_type == PieceType::King {
            self.castling_rights.clear_both(moved.color);
        }
        if moved.piece_type == PieceType::Rook {
            self.castling_rights.clear_for_corner(m.from);
        }
        // A live corner right implies the rook is still at home, so any
        // arrival on that corner is a capture of it.
        self.castling_rights.clear_for_corner(m.to);

        self.history.push(record);
        self.side_to_move = self.side_to_move.opposite();
        Ok(())
    }

    /// Reverse the last executed move exactly, restoring placement,
    /// castling rights and en passant target from the history record.
    pub fn undo(&mut self) -> EngineResult<()> {
        let record = self.history.pop().ok_or(EngineError::NoHistory)?;
        let m = record.mv;

        // The moving piece returns as what it was; a promoted pawn
        // reverts to a pawn.
        self.board.set(m.from, Some(record.moved));
        self.board.set(m.to, None);

        if let (Some(p), Some(sq)) = (record.captured, record.captured_square) {
            self.board.set(sq, Some(p));
        }

        if m.is_castle {
            let row = m.from.0;
            if m.to.1 == 6 {
                self.board.set((row, 7), self.board.get((row, 5)));
                self.board.set((row, 5), None);
            } else if m.to.1 == 2 {
                self.board.set((row, 0), self.board.get((row, 3)));
                self.board.set((row, 3), None);
            }
        }

        self.castling_rights = record.prev_castling_rights;
        self.en_passant_target = record.prev_en_passant;
        self.side_to_move = self.side_to_move.opposite();
        Ok(())
    }
}

/// Placement effects of a move: en passant removal, castling rook
/// relocation, the piece move itself, promotion replacement. Used both for
/// speculative legality probes and for real execution.
fn apply_placement(board: &mut Board, m: &Move) {
    let piece = match board.get(m.from) {
        Some(p) => p,
        None => return,
    };

    if m.is_en_passant {
        // The captured pawn sits beside the destination: same column,
        // same row the capturing pawn started on.
        board.set((m.from.0, m.to.1), None);
    }

    if m.is_castle {
        let row = m.from.0;
        if m.to.1 == 6 {
            board.set((row, 5), board.get((row, 7)));
            board.set((row, 7), None);
        } else if m.to.1 == 2 {
            board.set((row, 3), board.get((row, 0)));
            board.set((row, 0), None);
        }
    }

    board.set(m.to, Some(piece));
    board.set(m.from, None);

    if let Some(kind) = m.promotion {
        board.set(m.to, Some(Piece::new(kind, piece.color)));
    }
}
