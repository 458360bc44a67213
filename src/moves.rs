use serde::{Deserialize, Serialize};

use crate::board::CastlingRights;
use crate::piece::{Piece, PieceType};

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Move {
    pub from: (usize, usize),
    pub to: (usize, usize),
    pub promotion: Option<PieceType>,
    pub is_castle: bool,
    pub is_en_passant: bool,
}

impl Move {
    /// A plain move with no promotion and no special flags. The generator
    /// produces fully-flagged moves; this is for callers and tests that
    /// identify a move by its squares alone.
    pub fn plain(from: (usize, usize), to: (usize, usize)) -> Move {
        Move {
            from,
            to,
            promotion: None,
            is_castle: false,
            is_en_passant: false,
        }
    }

    /// Convert to coordinate notation, e.g. "e2e4", "a7a8q".
    /// Row 0 is rank 8 (Black's back rank).
    pub fn to_uci(&self) -> String {
        let fc = (b'a' + self.from.1 as u8) as char;
        let fr = (b'8' - self.from.0 as u8) as char;
        let tc = (b'a' + self.to.1 as u8) as char;
        let tr = (b'8' - self.to.0 as u8) as char;
        let promo = match self.promotion {
            Some(PieceType::Queen) => "q",
            Some(PieceType::Rook) => "r",
            Some(PieceType::Bishop) => "b",
            Some(PieceType::Knight) => "n",
            _ => "",
        };
        format!("{fc}{fr}{tc}{tr}{promo}")
    }

    /// Parse from coordinate notation. Special-move flags are not encoded
    /// in the notation; execution resolves them against the legal set.
    pub fn from_uci(s: &str) -> Option<Move> {
        let bytes = s.as_bytes();
        if bytes.len() < 4 {
            return None;
        }
        if !(b'a'..=b'h').contains(&bytes[0])
            || !(b'1'..=b'8').contains(&bytes[1])
            || !(b'a'..=b'h').contains(&bytes[2])
            || !(b'1'..=b'8').contains(&bytes[3])
        {
            return None;
        }
        let fc = (bytes[0] - b'a') as usize;
        let fr = (b'8' - bytes[1]) as usize;
        let tc = (bytes[2] - b'a') as usize;
        let tr = (b'8' - bytes[3]) as usize;
        let promotion = if bytes.len() > 4 {
            match bytes[4] {
                b'q' => Some(PieceType::Queen),
                b'r' => Some(PieceType::Rook),
                b'b' => Some(PieceType::Bishop),
                b'n' => Some(PieceType::Knight),
                _ => None,
            }
        } else {
            None
        };
        Some(Move {
            from: (fr, fc),
            to: (tr, tc),
            promotion,
            is_castle: false,
            is_en_passant: false,
        })
    }
}

/// History entry for an executed move. Snapshots the pre-move castling
/// rights and en passant target; neither is re-derivable from the move
/// alone, so undo restores them from here.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct MoveRecord {
    pub mv: Move,
    pub moved: Piece,
    pub captured: Option<Piece>,
    /// Where the captured piece stood. Differs from `mv.to` for en passant.
    pub captured_square: Option<(usize, usize)>,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant: Option<(usize, usize)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_round_trip() {
        for s in ["e2e4", "g8f6", "a7a8q", "h2h1n"] {
            let m = Move::from_uci(s).expect("should parse");
            assert_eq!(m.to_uci(), s);
        }
    }

    #[test]
    fn uci_rows_follow_board_orientation() {
        // e2 is White's pawn rank: row 6, col 4.
        let m = Move::from_uci("e2e4").unwrap();
        assert_eq!(m.from, (6, 4));
        assert_eq!(m.to, (4, 4));
        // a8 is Black's queenside corner: row 0, col 0.
        let m = Move::from_uci("a8a1").unwrap();
        assert_eq!(m.from, (0, 0));
        assert_eq!(m.to, (7, 0));
    }

    #[test]
    fn uci_rejects_garbage() {
        assert!(Move::from_uci("").is_none());
        assert!(Move::from_uci("e2").is_none());
        assert!(Move::from_uci("z9e4").is_none());
    }
}
