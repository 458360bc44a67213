//! Pseudo-legal move generation. Everything here answers "where could this
//! piece go on this placement"; self-check filtering happens one layer up,
//! and castling candidates come from their own gated generator rather than
//! the king's normal envelope.

use crate::board::{Board, CastlingRights};
use crate::moves::Move;
use crate::piece::{Color, PieceType};

const PROMOTION_KINDS: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

/// Enumerate the pseudo-legal moves for the piece on `square`, or nothing
/// if the square is empty. Move order is fixed per piece kind so results
/// are reproducible.
pub fn pseudo_legal_moves(
    board: &Board,
    en_passant_target: Option<(usize, usize)>,
    square: (usize, usize),
) -> Vec<Move> {
    let mut moves = Vec::new();
    let (row, col) = square;
    let piece = match board.get(square) {
        Some(p) => p,
        None => return moves,
    };

    match piece.piece_type {
        PieceType::Pawn => pawn_moves(board, en_passant_target, row, col, piece.color, &mut moves),
        PieceType::Knight => knight_moves(board, row, col, piece.color, &mut moves),
        PieceType::Bishop => {
            let dirs = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
            sliding_moves(board, row, col, piece.color, &dirs, &mut moves);
        }
        PieceType::Rook => {
            let dirs = [(0, 1), (0, -1), (1, 0), (-1, 0)];
            sliding_moves(board, row, col, piece.color, &dirs, &mut moves);
        }
        PieceType::Queen => {
            let dirs = [
                (0, 1), (0, -1), (1, 0), (-1, 0),
                (1, 1), (1, -1), (-1, 1), (-1, -1),
            ];
            sliding_moves(board, row, col, piece.color, &dirs, &mut moves);
        }
        PieceType::King => king_moves(board, row, col, piece.color, &mut moves),
    }

    moves
}

fn pawn_moves(
    board: &Board,
    en_passant_target: Option<(usize, usize)>,
    row: usize,
    col: usize,
    color: Color,
    moves: &mut Vec<Move>,
) {
    // White pawns start on row 6 and advance toward row 0; Black mirrors.
    let (dir, start_row, promo_row): (i32, usize, usize) = match color {
        Color::White => (-1, 6, 0),
        Color::Black => (1, 1, 7),
    };

    let forward = row as i32 + dir;

    // Single push
    if Board::in_bounds(forward, col as i32) && board.get((forward as usize, col)).is_none() {
        if forward as usize == promo_row {
            for kind in &PROMOTION_KINDS {
                moves.push(Move {
                    from: (row, col),
                    to: (forward as usize, col),
                    promotion: Some(*kind),
                    is_castle: false,
                    is_en_passant: false,
                });
            }
        } else {
            moves.push(Move::plain((row, col), (forward as usize, col)));

            // Double push, only from the starting rank and only through
            // an empty intermediate square (checked above).
            if row == start_row {
                let double = forward + dir;
                if Board::in_bounds(double, col as i32)
                    && board.get((double as usize, col)).is_none()
                {
                    moves.push(Move::plain((row, col), (double as usize, col)));
                }
            }
        }
    }

    // Diagonal captures, including en passant onto the target square.
    for dc in &[-1i32, 1] {
        let nc = col as i32 + dc;
        if !Board::in_bounds(forward, nc) {
            continue;
        }
        let to = (forward as usize, nc as usize);

        let is_capture = board.get(to).map(|p| p.color != color).unwrap_or(false);
        let is_en_passant = en_passant_target == Some(to) && board.get(to).is_none();

        if is_capture || is_en_passant {
            if to.0 == promo_row {
                for kind in &PROMOTION_KINDS {
                    moves.push(Move {
                        from: (row, col),
                        to,
                        promotion: Some(*kind),
                        is_castle: false,
                        is_en_passant: false,
                    });
                }
            } else {
                moves.push(Move {
                    from: (row, col),
                    to,
                    promotion: None,
                    is_castle: false,
                    is_en_passant,
                });
            }
        }
    }
}

fn knight_moves(board: &Board, row: usize, col: usize, color: Color, moves: &mut Vec<Move>) {
    let offsets: [(i32, i32); 8] = [
        (-2, -1), (-2, 1), (-1, -2), (-1, 2),
        (1, -2), (1, 2), (2, -1), (2, 1),
    ];
    for (dr, dc) in &offsets {
        let r = row as i32 + dr;
        let c = col as i32 + dc;
        if !Board::in_bounds(r, c) {
            continue;
        }
        let to = (r as usize, c as usize);
        if board.get(to).map(|p| p.color == color).unwrap_or(false) {
            continue;
        }
        moves.push(Move::plain((row, col), to));
    }
}

fn sliding_moves(
    board: &Board,
    row: usize,
    col: usize,
    color: Color,
    directions: &[(i32, i32)],
    moves: &mut Vec<Move>,
) {
    for (dr, dc) in directions {
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        while Board::in_bounds(r, c) {
            let to = (r as usize, c as usize);
            if let Some(p) = board.get(to) {
                if p.color != color {
                    moves.push(Move::plain((row, col), to));
                }
                break;
            }
            moves.push(Move::plain((row, col), to));
            r += dr;
            c += dc;
        }
    }
}

fn king_moves(board: &Board, row: usize, col: usize, color: Color, moves: &mut Vec<Move>) {
    for dr in -1..=1i32 {
        for dc in -1..=1i32 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let r = row as i32 + dr;
            let c = col as i32 + dc;
            if !Board::in_bounds(r, c) {
                continue;
            }
            let to = (r as usize, c as usize);
            if board.get(to).map(|p| p.color == color).unwrap_or(false) {
                continue;
            }
            moves.push(Move::plain((row, col), to));
        }
    }
}

/// Castling candidates for `color`, fully gated: the right must still be
/// available, the rook on its corner, every square between king and rook
/// empty, and the king's start, transit and destination squares free of
/// attack. Anything returned here is already legal with respect to check.
pub fn castling_moves(board: &Board, rights: &CastlingRights, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let back_rank: usize = match color {
        Color::White => 7,
        Color::Black => 0,
    };

    let king_home = (back_rank, 4);
    let has_king = board
        .get(king_home)
        .map(|p| p.piece_type == PieceType::King && p.color == color)
        .unwrap_or(false);
    if !has_king {
        return moves;
    }

    let opponent = color.opposite();
    if board.is_square_attacked_by(back_rank, 4, opponent) {
        return moves;
    }

    let rook_on = |c: usize| {
        board
            .get((back_rank, c))
            .map(|p| p.piece_type == PieceType::Rook && p.color == color)
            .unwrap_or(false)
    };

    // Kingside: squares f and g empty, neither attacked.
    if rights.kingside(color)
        && rook_on(7)
        && board.get((back_rank, 5)).is_none()
        && board.get((back_rank, 6)).is_none()
        && !board.is_square_attacked_by(back_rank, 5, opponent)
        && !board.is_square_attacked_by(back_rank, 6, opponent)
    {
        moves.push(Move {
            from: king_home,
            to: (back_rank, 6),
            promotion: None,
            is_castle: true,
            is_en_passant: false,
        });
    }

    // Queenside: b, c and d empty; the king only crosses d and c, so b may
    // be attacked.
    if rights.queenside(color)
        && rook_on(0)
        && board.get((back_rank, 1)).is_none()
        && board.get((back_rank, 2)).is_none()
        && board.get((back_rank, 3)).is_none()
        && !board.is_square_attacked_by(back_rank, 3, opponent)
        && !board.is_square_attacked_by(back_rank, 2, opponent)
    {
        moves.push(Move {
            from: king_home,
            to: (back_rank, 2),
            promotion: None,
            is_castle: true,
            is_en_passant: false,
        });
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    fn destinations(moves: &[Move]) -> Vec<(usize, usize)> {
        moves.iter().map(|m| m.to).collect()
    }

    #[test]
    fn knight_envelope_on_open_board() {
        let mut board = Board::empty();
        // d4 = row 4, col 3
        board.set((4, 3), Some(Piece::new(PieceType::Knight, Color::White)));
        let moves = pseudo_legal_moves(&board, None, (4, 3));
        assert_eq!(moves.len(), 8);

        // a1 = row 7, col 0: only b3 and c2 remain on the board.
        let mut board = Board::empty();
        board.set((7, 0), Some(Piece::new(PieceType::Knight, Color::White)));
        let moves = pseudo_legal_moves(&board, None, (7, 0));
        assert_eq!(moves.len(), 2);
        let dests = destinations(&moves);
        assert!(dests.contains(&(5, 1)));
        assert!(dests.contains(&(6, 2)));
    }

    #[test]
    fn pawn_pushes_from_start() {
        let board = Board::initial();
        // e2 pawn: single to e3, double to e4.
        let moves = pseudo_legal_moves(&board, None, (6, 4));
        assert_eq!(destinations(&moves), vec![(5, 4), (4, 4)]);

        // Block e3: no pushes at all.
        let mut board = Board::initial();
        board.set((5, 4), Some(Piece::new(PieceType::Knight, Color::Black)));
        let moves = pseudo_legal_moves(&board, None, (6, 4));
        assert!(moves.is_empty());

        // Block only e4: single push survives.
        let mut board = Board::initial();
        board.set((4, 4), Some(Piece::new(PieceType::Knight, Color::Black)));
        let moves = pseudo_legal_moves(&board, None, (6, 4));
        assert_eq!(destinations(&moves), vec![(5, 4)]);
    }

    #[test]
    fn pawn_double_push_only_from_start_rank() {
        let mut board = Board::empty();
        board.set((5, 4), Some(Piece::new(PieceType::Pawn, Color::White)));
        let moves = pseudo_legal_moves(&board, None, (5, 4));
        assert_eq!(destinations(&moves), vec![(4, 4)]);
    }

    #[test]
    fn pawn_captures_diagonally_only() {
        let mut board = Board::empty();
        board.set((4, 4), Some(Piece::new(PieceType::Pawn, Color::White)));
        board.set((3, 4), Some(Piece::new(PieceType::Rook, Color::Black)));
        board.set((3, 3), Some(Piece::new(PieceType::Rook, Color::Black)));
        board.set((3, 5), Some(Piece::new(PieceType::Pawn, Color::White)));
        let moves = pseudo_legal_moves(&board, None, (4, 4));
        // Forward blocked, own pawn not capturable: just the one capture.
        assert_eq!(destinations(&moves), vec![(3, 3)]);
    }

    #[test]
    fn promotion_enumerates_four_kinds() {
        let mut board = Board::empty();
        board.set((1, 0), Some(Piece::new(PieceType::Pawn, Color::White)));
        let moves = pseudo_legal_moves(&board, None, (1, 0));
        assert_eq!(moves.len(), 4);
        let kinds: Vec<_> = moves.iter().filter_map(|m| m.promotion).collect();
        assert_eq!(
            kinds,
            vec![
                PieceType::Queen,
                PieceType::Rook,
                PieceType::Bishop,
                PieceType::Knight
            ]
        );

        // A capture onto the last rank promotes too.
        board.set((0, 0), Some(Piece::new(PieceType::Rook, Color::Black)));
        board.set((0, 1), Some(Piece::new(PieceType::Rook, Color::Black)));
        let moves = pseudo_legal_moves(&board, None, (1, 0));
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.to == (0, 1) && m.promotion.is_some()));
    }

    #[test]
    fn en_passant_candidate_is_flagged() {
        let mut board = Board::empty();
        board.set((3, 4), Some(Piece::new(PieceType::Pawn, Color::White)));
        board.set((3, 3), Some(Piece::new(PieceType::Pawn, Color::Black)));
        let moves = pseudo_legal_moves(&board, Some((2, 3)), (3, 4));
        let ep: Vec<_> = moves.iter().filter(|m| m.is_en_passant).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to, (2, 3));

        // Without the target the capture square is just empty.
        let moves = pseudo_legal_moves(&board, None, (3, 4));
        assert!(moves.iter().all(|m| !m.is_en_passant && m.to != (2, 3)));
    }

    #[test]
    fn sliders_stop_at_first_piece() {
        let mut board = Board::empty();
        board.set((4, 3), Some(Piece::new(PieceType::Rook, Color::White)));
        board.set((4, 6), Some(Piece::new(PieceType::Pawn, Color::Black)));
        board.set((6, 3), Some(Piece::new(PieceType::Pawn, Color::White)));
        let moves = pseudo_legal_moves(&board, None, (4, 3));
        let dests = destinations(&moves);
        assert!(dests.contains(&(4, 6)));
        assert!(!dests.contains(&(4, 7)));
        assert!(dests.contains(&(5, 3)));
        assert!(!dests.contains(&(6, 3)));
    }

    #[test]
    fn king_envelope_excludes_friendly_squares() {
        let mut board = Board::empty();
        board.set((4, 4), Some(Piece::new(PieceType::King, Color::White)));
        board.set((4, 5), Some(Piece::new(PieceType::Pawn, Color::White)));
        let moves = pseudo_legal_moves(&board, None, (4, 4));
        assert_eq!(moves.len(), 7);
        assert!(!destinations(&moves).contains(&(4, 5)));
    }

    #[test]
    fn castling_requires_rook_on_corner() {
        let mut board = Board::empty();
        board.set((7, 4), Some(Piece::new(PieceType::King, Color::White)));
        let rights = CastlingRights::initial();
        assert!(castling_moves(&board, &rights, Color::White).is_empty());

        board.set((7, 7), Some(Piece::new(PieceType::Rook, Color::White)));
        let moves = castling_moves(&board, &rights, Color::White);
        assert_eq!(moves.len(), 1);
        assert!(moves[0].is_castle);
        assert_eq!(moves[0].to, (7, 6));
    }

    #[test]
    fn queenside_ignores_attacks_on_b_file() {
        let mut board = Board::empty();
        board.set((7, 4), Some(Piece::new(PieceType::King, Color::White)));
        board.set((7, 0), Some(Piece::new(PieceType::Rook, Color::White)));
        // Black rook hitting b1 only: queenside castling stays available.
        board.set((0, 1), Some(Piece::new(PieceType::Rook, Color::Black)));
        let rights = CastlingRights::initial();
        let moves = castling_moves(&board, &rights, Color::White);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, (7, 2));
    }
}
