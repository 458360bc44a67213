use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::piece::{Color, Piece, PieceType};

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub fn initial() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn none() -> Self {
        CastlingRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    pub fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    /// Rights only ever turn off. Clearing twice is harmless.
    pub fn clear_both(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    /// Clear the right tied to a rook's original corner square, if the
    /// given square is one. Applies both when the rook leaves the corner
    /// and when something is captured on it.
    pub fn clear_for_corner(&mut self, square: (usize, usize)) {
        match square {
            (7, 0) => self.white_queenside = false,
            (7, 7) => self.white_kingside = false,
            (0, 0) => self.black_queenside = false,
            (0, 7) => self.black_kingside = false,
            _ => {}
        }
    }
}

/// The 8x8 piece placement. Row 0 is Black's back rank; White's pieces
/// start on rows 6 and 7. Pure storage: turn, castling rights, en passant
/// and history live on `GameState`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    /// An empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting placement.
    pub fn initial() -> Self {
        let mut squares = [[None; 8]; 8];

        // Black pieces (rows 0-1)
        squares[0][0] = Some(Piece::new(PieceType::Rook, Color::Black));
        squares[0][1] = Some(Piece::new(PieceType::Knight, Color::Black));
        squares[0][2] = Some(Piece::new(PieceType::Bishop, Color::Black));
        squares[0][3] = Some(Piece::new(PieceType::Queen, Color::Black));
        squares[0][4] = Some(Piece::new(PieceType::King, Color::Black));
        squares[0][5] = Some(Piece::new(PieceType::Bishop, Color::Black));
        squares[0][6] = Some(Piece::new(PieceType::Knight, Color::Black));
        squares[0][7] = Some(Piece::new(PieceType::Rook, Color::Black));
        for sq in &mut squares[1] {
            *sq = Some(Piece::new(PieceType::Pawn, Color::Black));
        }

        // White pieces (rows 6-7)
        for sq in &mut squares[6] {
            *sq = Some(Piece::new(PieceType::Pawn, Color::White));
        }
        squares[7][0] = Some(Piece::new(PieceType::Rook, Color::White));
        squares[7][1] = Some(Piece::new(PieceType::Knight, Color::White));
        squares[7][2] = Some(Piece::new(PieceType::Bishop, Color::White));
        squares[7][3] = Some(Piece::new(PieceType::Queen, Color::White));
        squares[7][4] = Some(Piece::new(PieceType::King, Color::White));
        squares[7][5] = Some(Piece::new(PieceType::Bishop, Color::White));
        squares[7][6] = Some(Piece::new(PieceType::Knight, Color::White));
        squares[7][7] = Some(Piece::new(PieceType::Rook, Color::White));

        Board { squares }
    }

    pub fn in_bounds(row: i32, col: i32) -> bool {
        (0..8).contains(&row) && (0..8).contains(&col)
    }

    pub fn get(&self, square: (usize, usize)) -> Option<Piece> {
        self.squares[square.0][square.1]
    }

    pub fn set(&mut self, square: (usize, usize), piece: Option<Piece>) {
        self.squares[square.0][square.1] = piece;
    }

    /// Locate the king of the given color. Exactly one king per side exists
    /// on any board reachable through legal play; its absence is an
    /// invariant violation and is reported, not papered over.
    pub fn find_king(&self, color: Color) -> EngineResult<(usize, usize)> {
        for r in 0..8 {
            for c in 0..8 {
                if let Some(p) = self.squares[r][c] {
                    if p.piece_type == PieceType::King && p.color == color {
                        return Ok((r, c));
                    }
                }
            }
        }
        Err(EngineError::KingNotFound(color))
    }

    /// Whether any piece of `attacker` reaches (row, col) with a capturing
    /// move. This is raw reachability on the current placement: it never
    /// consults move legality, so check detection cannot recurse.
    pub fn is_square_attacked_by(&self, row: usize, col: usize, attacker: Color) -> bool {
        // Knight attacks
        let knight_offsets: [(i32, i32); 8] = [
            (-2, -1), (-2, 1), (-1, -2), (-1, 2),
            (1, -2), (1, 2), (2, -1), (2, 1),
        ];
        for (dr, dc) in &knight_offsets {
            let r = row as i32 + dr;
            let c = col as i32 + dc;
            if Self::in_bounds(r, c) {
                if let Some(p) = self.squares[r as usize][c as usize] {
                    if p.color == attacker && p.piece_type == PieceType::Knight {
                        return true;
                    }
                }
            }
        }

        // King attacks
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = row as i32 + dr;
                let c = col as i32 + dc;
                if Self::in_bounds(r, c) {
                    if let Some(p) = self.squares[r as usize][c as usize] {
                        if p.color == attacker && p.piece_type == PieceType::King {
                            return true;
                        }
                    }
                }
            }
        }

        // Pawn attacks. White pawns advance toward row 0, so a white pawn
        // on (row + 1, col ± 1) attacks (row, col); black mirrors.
        let pawn_dir: i32 = if attacker == Color::White { -1 } else { 1 };
        let pawn_row = row as i32 - pawn_dir;
        for dc in &[-1i32, 1] {
            let pc = col as i32 + dc;
            if Self::in_bounds(pawn_row, pc) {
                if let Some(p) = self.squares[pawn_row as usize][pc as usize] {
                    if p.color == attacker && p.piece_type == PieceType::Pawn {
                        return true;
                    }
                }
            }
        }

        // Sliding pieces: rook/queen on straights, bishop/queen on diagonals
        let straight_dirs: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
        for (dr, dc) in &straight_dirs {
            let mut r = row as i32 + dr;
            let mut c = col as i32 + dc;
            while Self::in_bounds(r, c) {
                if let Some(p) = self.squares[r as usize][c as usize] {
                    if p.color == attacker
                        && (p.piece_type == PieceType::Rook || p.piece_type == PieceType::Queen)
                    {
                        return true;
                    }
                    break;
                }
                r += dr;
                c += dc;
            }
        }

        let diag_dirs: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
        for (dr, dc) in &diag_dirs {
            let mut r = row as i32 + dr;
            let mut c = col as i32 + dc;
            while Self::in_bounds(r, c) {
                if let Some(p) = self.squares[r as usize][c as usize] {
                    if p.color == attacker
                        && (p.piece_type == PieceType::Bishop || p.piece_type == PieceType::Queen)
                    {
                        return true;
                    }
                    break;
                }
                r += dr;
                c += dc;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_placement_is_symmetric() {
        let board = Board::initial();
        assert_eq!(
            board.get((0, 4)),
            Some(Piece::new(PieceType::King, Color::Black))
        );
        assert_eq!(
            board.get((7, 4)),
            Some(Piece::new(PieceType::King, Color::White))
        );
        for c in 0..8 {
            assert_eq!(
                board.get((1, c)),
                Some(Piece::new(PieceType::Pawn, Color::Black))
            );
            assert_eq!(
                board.get((6, c)),
                Some(Piece::new(PieceType::Pawn, Color::White))
            );
        }
        for r in 2..6 {
            for c in 0..8 {
                assert!(board.get((r, c)).is_none());
            }
        }
    }

    #[test]
    fn find_king_reports_missing_king() {
        let mut board = Board::empty();
        board.set((4, 4), Some(Piece::new(PieceType::King, Color::White)));
        assert_eq!(board.find_king(Color::White), Ok((4, 4)));
        assert_eq!(
            board.find_king(Color::Black),
            Err(EngineError::KingNotFound(Color::Black))
        );
    }

    #[test]
    fn clone_is_independent() {
        let original = Board::initial();
        let mut copy = original.clone();
        copy.set((6, 4), None);
        assert!(original.get((6, 4)).is_some());
    }

    #[test]
    fn pawn_attacks_point_the_right_way() {
        let mut board = Board::empty();
        // White pawn on e4 attacks d5 and f5 (toward row 0), not d3/f3.
        board.set((4, 4), Some(Piece::new(PieceType::Pawn, Color::White)));
        assert!(board.is_square_attacked_by(3, 3, Color::White));
        assert!(board.is_square_attacked_by(3, 5, Color::White));
        assert!(!board.is_square_attacked_by(5, 3, Color::White));
        assert!(!board.is_square_attacked_by(4, 4, Color::White));

        let mut board = Board::empty();
        board.set((3, 3), Some(Piece::new(PieceType::Pawn, Color::Black)));
        assert!(board.is_square_attacked_by(4, 2, Color::Black));
        assert!(board.is_square_attacked_by(4, 4, Color::Black));
        assert!(!board.is_square_attacked_by(2, 2, Color::Black));
    }

    #[test]
    fn sliding_attacks_stop_at_blockers() {
        let mut board = Board::empty();
        board.set((4, 0), Some(Piece::new(PieceType::Rook, Color::White)));
        board.set((4, 3), Some(Piece::new(PieceType::Pawn, Color::Black)));
        assert!(board.is_square_attacked_by(4, 3, Color::White));
        assert!(!board.is_square_attacked_by(4, 4, Color::White));

        board.set((2, 2), Some(Piece::new(PieceType::Bishop, Color::Black)));
        assert!(board.is_square_attacked_by(4, 0, Color::Black));
        assert!(board.is_square_attacked_by(0, 0, Color::Black));
        assert!(board.is_square_attacked_by(4, 4, Color::Black));
    }

    #[test]
    fn knight_attacks_ignore_blockers() {
        let mut board = Board::empty();
        board.set((4, 3), Some(Piece::new(PieceType::Knight, Color::Black)));
        // Surround the knight; it still attacks over the top.
        for dr in -1..=1i32 {
            for dc in -1..=1i32 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let sq = ((4 + dr) as usize, (3 + dc) as usize);
                board.set(sq, Some(Piece::new(PieceType::Pawn, Color::White)));
            }
        }
        assert!(board.is_square_attacked_by(2, 2, Color::Black));
        assert!(board.is_square_attacked_by(6, 4, Color::Black));
        assert!(!board.is_square_attacked_by(4, 5, Color::Black));
    }
}
