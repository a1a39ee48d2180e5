//! Search engine
//!
//! Negamax with alpha-beta pruning over the legal-action generator.
//! Fixed depth, no iterative deepening and no time management: the move
//! trees of these variants are small enough to search synchronously.

use crate::eval;
use crate::movegen;
use crate::position::{GameResult, GameState};
use crate::types::{Action, Value};

/// Default search depth for the computer opponent.
pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

/// Find the strongest action for the side to move.
///
/// Iterates every root action once, scoring each with a negamax search of
/// `depth - 1` plies below it. Ties keep the first action in generation
/// order, so results are deterministic for a fixed state and depth.
/// Returns `None` when no legal action exists; the caller classifies the
/// terminal state via [`GameState::result`].
pub fn find_best_action(state: &GameState, depth: u8) -> Option<Action> {
    let actions = movegen::legal_actions(state);
    if actions.is_empty() {
        return None;
    }

    let mut nodes = 0u64;
    let mut alpha = -Value::INFINITE;
    let beta = Value::INFINITE;
    let mut best_action = None;
    let mut best_score = -Value::INFINITE;

    for action in actions {
        let next = state.apply_unchecked(action);
        let score = -negamax(&next, depth.saturating_sub(1), -beta, -alpha, &mut nodes);
        log::trace!("root {action}: score {}", score.raw());
        if score > best_score {
            best_score = score;
            best_action = Some(action);
        }
        if score > alpha {
            alpha = score;
        }
        // No cutoff at the root: every action gets an exact score.
    }

    if let Some(action) = best_action {
        log::debug!(
            "depth {depth}: best {action} score {} ({nodes} nodes)",
            best_score.raw()
        );
    }
    best_action
}

/// Negamax with alpha-beta pruning.
///
/// Returns the score of `state` from the perspective of its side to move.
fn negamax(state: &GameState, depth: u8, mut alpha: Value, beta: Value, nodes: &mut u64) -> Value {
    *nodes += 1;

    // Decided positions score as terminal no matter how much depth is left.
    match state.stored_result() {
        GameResult::Win { winner } => {
            return if winner == state.side_to_move() {
                Value::win_in(depth)
            } else {
                Value::loss_in(depth)
            };
        }
        GameResult::Draw { .. } => return Value::DRAW,
        GameResult::InProgress => {}
    }

    if depth == 0 {
        return eval::evaluate(state);
    }

    let actions = movegen::legal_actions(state);
    if actions.is_empty() {
        // No legal action: checkmate if in check, otherwise stalemate.
        return if state.is_in_check(state.side_to_move()) {
            Value::loss_in(depth)
        } else {
            Value::DRAW
        };
    }

    let mut best = -Value::INFINITE;
    for action in actions {
        let next = state.apply_unchecked(action);
        let score = -negamax(&next, depth - 1, -beta, -alpha, nodes);
        if score > best {
            best = score;
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }
    best
}
