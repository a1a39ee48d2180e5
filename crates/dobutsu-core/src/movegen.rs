//! Move generation and legality filtering
//!
//! Generates pseudo-legal actions from the ruleset's movement table, then
//! filters out actions that would leave the acting side's own royal piece
//! attacked, plus the drop-specific restrictions (two-in-column and
//! drop-checkmate for the pawn-like piece).

use crate::position::{GameResult, GameState};
use crate::ruleset::Ruleset;
use crate::types::{Action, ActionList, Color, PieceType, Square};

/// Generate all legal actions for the side to move.
///
/// Returns an empty list when the game is already decided. An empty list
/// on an undecided position means checkmate or stalemate; callers classify
/// via [`GameState::result`].
pub fn legal_actions(state: &GameState) -> ActionList {
    let mut actions = ActionList::new();
    if state.stored_result() != GameResult::InProgress {
        return actions;
    }
    let us = state.side_to_move();
    push_board_moves(state, us, &mut actions);
    push_drops(state, us, &mut actions);
    actions.retain(|action| is_legal(state, *action));
    actions
}

/// Check whether any piece of `attacker` attacks `target`.
///
/// Every piece in this family of games moves exactly one step, so attack
/// sets do not depend on occupancy: there are no sliding pieces to block.
pub fn attacks_square(state: &GameState, attacker: Color, target: Square) -> bool {
    let ruleset = state.ruleset();
    let board = state.board();
    for from in board.squares() {
        let piece = board.piece_on(from);
        if piece.is_none() || piece.color() != attacker {
            continue;
        }
        for &delta in ruleset.deltas(piece.piece_type()) {
            let (dr, dc) = oriented(delta, attacker);
            if from.offset(dr, dc, ruleset.rows(), ruleset.cols()) == Some(target) {
                return true;
            }
        }
    }
    false
}

/// Count leaf nodes of the legal-action tree to the given depth.
pub fn perft(state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for action in legal_actions(state) {
        nodes += perft(&state.apply_unchecked(action), depth - 1);
    }
    nodes
}

/// Orient a canonical (Sky-relative) delta for the given side.
///
/// Land plays rotated by 180 degrees, so both components flip.
#[inline]
fn oriented(delta: (i8, i8), color: Color) -> (i8, i8) {
    match color {
        Color::Sky => delta,
        Color::Land => (-delta.0, -delta.1),
    }
}

/// Push all pseudo-legal board moves for `color`.
///
/// When a destination (or origin) lies in the promotion zone and the piece
/// can promote, the promoting variant is emitted first, followed by the
/// non-promoting one unless promotion is forced because the piece would
/// have no onward move from the destination.
fn push_board_moves(state: &GameState, color: Color, actions: &mut ActionList) {
    let ruleset = state.ruleset();
    let board = state.board();
    for from in board.squares() {
        let piece = board.piece_on(from);
        if piece.is_none() || piece.color() != color {
            continue;
        }
        let piece_type = piece.piece_type();
        for &delta in ruleset.deltas(piece_type) {
            let (dr, dc) = oriented(delta, color);
            let Some(to) = from.offset(dr, dc, ruleset.rows(), ruleset.cols()) else {
                continue;
            };
            let dest = board.piece_on(to);
            if dest.is_some() && dest.color() == color {
                continue; // occupied by a friendly piece
            }
            let promotable = ruleset.promotion_target(piece_type).is_some()
                && (ruleset.in_promotion_zone(color, from)
                    || ruleset.in_promotion_zone(color, to));
            if promotable {
                actions.push(Action::Move {
                    from,
                    to,
                    promote: true,
                });
                if has_onward_move(ruleset, piece_type, color, to) {
                    actions.push(Action::Move {
                        from,
                        to,
                        promote: false,
                    });
                }
            } else {
                actions.push(Action::Move {
                    from,
                    to,
                    promote: false,
                });
            }
        }
    }
}

/// Push all pseudo-legal drops for `color`: every held piece type onto
/// every empty square. Drop restrictions are applied by the legality
/// filter, not here.
fn push_drops(state: &GameState, color: Color, actions: &mut ActionList) {
    let hand = state.hand(color);
    if hand.is_empty() {
        return;
    }
    let board = state.board();
    for piece_type in PieceType::ALL {
        if !hand.has(piece_type) {
            continue;
        }
        for to in board.squares() {
            if board.piece_on(to).is_none() {
                actions.push(Action::Drop { piece_type, to });
            }
        }
    }
}

/// Whether the piece would still have at least one in-bounds move from
/// `from`. A piece that cannot move again must promote on arrival.
fn has_onward_move(ruleset: &Ruleset, piece_type: PieceType, color: Color, from: Square) -> bool {
    ruleset.deltas(piece_type).iter().any(|&delta| {
        let (dr, dc) = oriented(delta, color);
        from.offset(dr, dc, ruleset.rows(), ruleset.cols()).is_some()
    })
}

/// Check a single pseudo-legal action for full legality.
fn is_legal(state: &GameState, action: Action) -> bool {
    if let Action::Drop { piece_type, to } = action {
        if piece_type == state.ruleset().pawn_like() {
            // Two-in-column: no second unpromoted pawn-like piece in a column.
            if has_pawn_like_in_column(state, state.side_to_move(), to.col()) {
                return false;
            }
            if is_mate_by_pawn_drop(state, to) {
                return false;
            }
        }
    }
    let next = state.apply_unchecked(action);
    // An action that ends the game in our favor (royal capture or a
    // successful try) is legal regardless of our own royal's safety:
    // the opponent never gets to answer.
    if next.stored_result() == (GameResult::Win { winner: state.side_to_move() }) {
        return true;
    }
    !next.is_in_check(state.side_to_move())
}

/// Check if `color` already has an unpromoted pawn-like piece in `col`.
///
/// Promoted ones do not count: promotion changes the piece type, so the
/// identity test against the pawn-like type excludes them.
fn has_pawn_like_in_column(state: &GameState, color: Color, col: u8) -> bool {
    let ruleset = state.ruleset();
    let board = state.board();
    (0..ruleset.rows()).any(|row| {
        let piece = board.piece_on(Square::new(row, col));
        piece.is_some() && piece.color() == color && piece.piece_type() == ruleset.pawn_like()
    })
}

/// Check whether dropping the pawn-like piece on `to` delivers checkmate.
///
/// Because every piece is a step mover, a check can never be blocked by
/// interposition, and a drop can never resolve a check. The defender's
/// useful replies are therefore exactly its board moves, which keeps this
/// probe non-recursive.
fn is_mate_by_pawn_drop(state: &GameState, to: Square) -> bool {
    let us = state.side_to_move();
    let defender = us.opponent();
    let Some(royal_sq) = state.royal_square(defender) else {
        return false; // no royal: the game is already decided elsewhere
    };

    // The drop must give check at all.
    let ruleset = state.ruleset();
    let gives_check = ruleset.deltas(ruleset.pawn_like()).iter().any(|&delta| {
        let (dr, dc) = oriented(delta, us);
        to.offset(dr, dc, ruleset.rows(), ruleset.cols()) == Some(royal_sq)
    });
    if !gives_check {
        return false;
    }

    let dropped = state.apply_unchecked(Action::Drop {
        piece_type: ruleset.pawn_like(),
        to,
    });
    let mut replies = ActionList::new();
    push_board_moves(&dropped, defender, &mut replies);
    for reply in replies {
        let after = dropped.apply_unchecked(reply);
        if after.stored_result() == (GameResult::Win { winner: defender }) {
            return false; // the defender wins outright instead
        }
        if !after.is_in_check(defender) {
            return false; // the defender has an escape or a capture
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::GameState;
    use crate::ruleset::Ruleset;
    use std::sync::Arc;

    fn micro_state() -> GameState {
        GameState::new(Arc::new(Ruleset::micro()))
    }

    fn goro_state() -> GameState {
        GameState::new(Arc::new(Ruleset::goro()))
    }

    fn play(state: GameState, moves: &[&str]) -> GameState {
        moves.iter().fold(state, |s, m| {
            let action = Action::from_coord(m).unwrap();
            s.apply(action).unwrap_or_else(|e| panic!("{m}: {e}"))
        })
    }

    fn contains(actions: &ActionList, coord: &str) -> bool {
        actions.contains(&Action::from_coord(coord).unwrap())
    }

    #[test]
    fn test_initial_actions_micro() {
        let state = micro_state();
        let actions = legal_actions(&state);
        assert_eq!(actions.len(), 4);
        for coord in ["a1a2", "b1a2", "b1c2", "b2b3"] {
            assert!(contains(&actions, coord), "missing {coord}");
        }
    }

    #[test]
    fn test_initial_actions_goro() {
        let state = goro_state();
        let actions = legal_actions(&state);
        assert_eq!(actions.len(), 7);
        for coord in ["a1a2", "b1a2", "d1e2", "e1e2", "b2b3", "c2c3", "d2d3"] {
            assert!(contains(&actions, coord), "missing {coord}");
        }
    }

    #[test]
    fn test_check_detection_after_chick_capture() {
        // ひよこが b3 を取ると後手ライオンに王手がかかる
        let state = play(micro_state(), &["b2b3"]);
        assert!(state.is_in_check(Color::Land));
        assert!(!state.is_in_check(Color::Sky));
        // 王手放置の手は生成されない（4 通りの応手のみ）
        let actions = legal_actions(&state);
        assert_eq!(actions.len(), 4);
        for coord in ["b4a3", "b4c3", "b4b3", "a4b3"] {
            assert!(contains(&actions, coord), "missing {coord}");
        }
    }

    #[test]
    fn test_forced_promotion_on_deepest_rank() {
        // ひよこが最奥段に進むときは成りしか生成されない
        let state = play(micro_state(), &["b2b3", "b4a3"]);
        let actions = legal_actions(&state);
        assert!(contains(&actions, "b3b4+"));
        assert!(!contains(&actions, "b3b4"));
    }

    #[test]
    fn test_optional_promotion_emits_both_variants() {
        // ごろごろでは敵陣 2 段目でとどまる選択もある
        let state = play(goro_state(), &["c2c3", "b5b4", "c3c4", "d5d4"]);
        let actions = legal_actions(&state);
        assert!(contains(&actions, "c4c5+"));
        assert!(contains(&actions, "c4c5"));
    }

    #[test]
    fn test_two_in_column_drop_restriction() {
        // 先手: ひよこで b3 を取る -> 後手: ライオン a3 -> 先手の打ち手
        let state = play(micro_state(), &["b2b3", "b4a3"]);
        let actions = legal_actions(&state);
        // b 列には先手のひよこが残っているので打てない
        assert!(!contains(&actions, "C*b2"));
        // 他の列には打てる
        assert!(contains(&actions, "C*a2"));
    }

    #[test]
    fn test_drops_require_empty_square() {
        let state = play(micro_state(), &["b2b3", "b4a3"]);
        let actions = legal_actions(&state);
        for action in &actions {
            if let Action::Drop { to, .. } = action {
                assert!(state.board().piece_on(*to).is_none(), "drop onto {to}");
            }
        }
    }

    #[test]
    fn test_attacks_square_orientation() {
        let state = micro_state();
        // 先手ひよこ b2 の利きは前方 b3 のみ
        assert!(attacks_square(&state, Color::Sky, Square::new(2, 1)));
        // 後手ひよこ b3 の利きは後手から見た前方 b2
        assert!(attacks_square(&state, Color::Land, Square::new(1, 1)));
        // どちらの利きでもないマス
        assert!(!attacks_square(&state, Color::Sky, Square::new(3, 0)));
    }

    #[test]
    fn test_perft_initial_positions() {
        assert_eq!(perft(&micro_state(), 1), 4);
        assert_eq!(perft(&goro_state(), 1), 7);
    }
}
