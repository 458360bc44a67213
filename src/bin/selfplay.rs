use rand::Rng;

use chess_rules::error::EngineResult;
use chess_rules::game::GameState;

const MAX_PLIES: usize = 300;

fn main() -> EngineResult<()> {
    let mut state = GameState::new();
    let mut rng = rand::thread_rng();
    let mut played: Vec<String> = Vec::new();

    while played.len() < MAX_PLIES {
        let eval = state.evaluate()?;
        if eval.status.is_over() {
            break;
        }
        let moves = state.all_legal_moves(state.side_to_move)?;
        let m = moves[rng.gen_range(0..moves.len())];
        state.execute(&m)?;
        played.push(m.to_uci());
    }

    let eval = state.evaluate()?;
    println!("{}", played.join(" "));
    println!(
        "{}",
        serde_json::to_string_pretty(&state).expect("game state serializes")
    );
    eprintln!(
        "{} plies, in_check={}, status={:?}",
        played.len(),
        eval.in_check,
        eval.status
    );
    Ok(())
}
