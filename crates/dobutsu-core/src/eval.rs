//! 評価関数
//!
//! 盤上の駒価値の単純合算。成り駒はルールセットに定義された成り駒
//! 自身の価値で数える。持ち駒は盤に打たれるまで数えない。

use crate::position::GameState;
use crate::types::{Color, Piece, Value};

#[inline]
fn signed_piece_value(state: &GameState, piece: Piece) -> i32 {
    if piece.is_none() {
        return 0;
    }
    let sign = if piece.color() == Color::Sky { 1 } else { -1 };
    sign * state.ruleset().value(piece.piece_type())
}

/// 手番側から見た駒得評価
pub fn evaluate(state: &GameState) -> Value {
    let board = state.board();
    let mut score = 0i32;
    for sq in board.squares() {
        score += signed_piece_value(state, board.piece_on(sq));
    }
    if state.side_to_move() == Color::Sky {
        Value::new(score)
    } else {
        Value::new(-score)
    }
}
