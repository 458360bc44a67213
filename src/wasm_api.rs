//! WASM-facing adapter. Presentation only: serializes engine results for
//! the web UI and maps engine errors to an error field. No rules logic
//! lives here.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::EngineResult;
use crate::game::{GameState, GameStatus};
use crate::moves::Move;
use crate::piece::{Color, PieceType};

#[derive(Serialize)]
struct SquarePiece {
    piece_type: String,
    color: String,
}

#[derive(Serialize)]
struct MoveJson {
    from: [usize; 2],
    to: [usize; 2],
    promotion: Option<String>,
}

#[derive(Serialize)]
struct StateJson {
    squares: Vec<Vec<Option<SquarePiece>>>,
    side_to_move: String,
    in_check: bool,
    status: String,
    game_over: bool,
    legal_moves: Vec<MoveJson>,
    history_len: usize,
}

#[derive(Serialize)]
struct ErrorJson {
    error: String,
}

#[derive(Serialize)]
struct SquareMoveJson {
    to: [usize; 2],
    promotion: Option<String>,
}

fn piece_type_to_string(pt: PieceType) -> String {
    match pt {
        PieceType::King => "King".to_string(),
        PieceType::Queen => "Queen".to_string(),
        PieceType::Rook => "Rook".to_string(),
        PieceType::Bishop => "Bishop".to_string(),
        PieceType::Knight => "Knight".to_string(),
        PieceType::Pawn => "Pawn".to_string(),
    }
}

fn color_to_string(c: Color) -> String {
    match c {
        Color::White => "White".to_string(),
        Color::Black => "Black".to_string(),
    }
}

fn status_to_string(status: GameStatus) -> String {
    match status {
        GameStatus::Normal => "Normal".to_string(),
        GameStatus::Checkmate => "Checkmate".to_string(),
        GameStatus::Stalemate => "Stalemate".to_string(),
    }
}

fn string_to_piece_type(s: &str) -> Option<PieceType> {
    match s {
        "Queen" => Some(PieceType::Queen),
        "Rook" => Some(PieceType::Rook),
        "Bishop" => Some(PieceType::Bishop),
        "Knight" => Some(PieceType::Knight),
        _ => None,
    }
}

fn move_json(m: &Move) -> MoveJson {
    MoveJson {
        from: [m.from.0, m.from.1],
        to: [m.to.0, m.to.1],
        promotion: m.promotion.map(piece_type_to_string),
    }
}

fn build_state_json(state: &GameState) -> EngineResult<StateJson> {
    let squares: Vec<Vec<Option<SquarePiece>>> = (0..8)
        .map(|r| {
            (0..8)
                .map(|c| {
                    state.board.get((r, c)).map(|p| SquarePiece {
                        piece_type: piece_type_to_string(p.piece_type),
                        color: color_to_string(p.color),
                    })
                })
                .collect()
        })
        .collect();

    let eval = state.evaluate()?;
    let legal_moves: Vec<MoveJson> = state
        .all_legal_moves(state.side_to_move)?
        .iter()
        .map(move_json)
        .collect();

    Ok(StateJson {
        squares,
        side_to_move: color_to_string(state.side_to_move),
        in_check: eval.in_check,
        status: status_to_string(eval.status),
        game_over: eval.status.is_over(),
        legal_moves,
        history_len: state.history.len(),
    })
}

fn state_or_error(state: &GameState) -> JsValue {
    match build_state_json(state) {
        Ok(json) => serde_wasm_bindgen::to_value(&json).unwrap_or(JsValue::NULL),
        Err(e) => {
            let err = ErrorJson {
                error: e.to_string(),
            };
            serde_wasm_bindgen::to_value(&err).unwrap_or(JsValue::NULL)
        }
    }
}

fn error_value(message: String) -> JsValue {
    let err = ErrorJson { error: message };
    serde_wasm_bindgen::to_value(&err).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct Session {
    state: GameState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Session {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Session {
        Session {
            state: GameState::new(),
        }
    }

    pub fn get_state(&self) -> JsValue {
        state_or_error(&self.state)
    }

    pub fn get_legal_moves_for_square(&self, row: usize, col: usize) -> JsValue {
        if row > 7 || col > 7 {
            return error_value(format!("square ({row},{col}) is off the board"));
        }
        match self.state.legal_moves((row, col)) {
            Ok(moves) => {
                let square_moves: Vec<SquareMoveJson> = moves
                    .iter()
                    .map(|m| SquareMoveJson {
                        to: [m.to.0, m.to.1],
                        promotion: m.promotion.map(piece_type_to_string),
                    })
                    .collect();
                serde_wasm_bindgen::to_value(&square_moves).unwrap_or(JsValue::NULL)
            }
            Err(e) => error_value(e.to_string()),
        }
    }

    pub fn make_move(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        promotion: Option<String>,
    ) -> JsValue {
        if from_row > 7 || from_col > 7 || to_row > 7 || to_col > 7 {
            return error_value("move is off the board".to_string());
        }
        let mut mv = Move::plain((from_row, from_col), (to_row, to_col));
        mv.promotion = promotion.as_deref().and_then(string_to_piece_type);

        match self.state.execute(&mv) {
            Ok(()) => state_or_error(&self.state),
            Err(e) => error_value(e.to_string()),
        }
    }

    pub fn undo_move(&mut self) -> JsValue {
        match self.state.undo() {
            Ok(()) => state_or_error(&self.state),
            Err(e) => error_value(e.to_string()),
        }
    }

    /// A uniformly random legal move, for the UI's "random move" button.
    pub fn suggest_move(&self) -> JsValue {
        match self.state.all_legal_moves(self.state.side_to_move) {
            Ok(moves) if !moves.is_empty() => {
                let idx = (js_sys::Math::random() * moves.len() as f64) as usize;
                let m = &moves[idx.min(moves.len() - 1)];
                serde_wasm_bindgen::to_value(&move_json(m)).unwrap_or(JsValue::NULL)
            }
            Ok(_) => JsValue::NULL,
            Err(e) => error_value(e.to_string()),
        }
    }
}
