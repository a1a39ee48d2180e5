//! 局面（Board / GameState）
//!
//! 盤面・持ち駒・手番・対局結果・局面履歴をまとめて管理する。
//! `apply` は新しい `GameState` を返す（呼び出し側から見える破壊的
//! 更新はない）。探索の再帰やアンドゥはこのコピーをそのまま使う。

use std::sync::Arc;

use crate::error::EngineError;
use crate::movegen;
use crate::ruleset::{MAX_SQUARES, Ruleset};
use crate::types::{Action, Color, Hand, Piece, PieceType, Square};

/// 盤面
///
/// 固定長配列に行優先（`row * cols + col`）で駒を並べる。
/// 実際の盤サイズはルールセット由来の `rows` x `cols`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    rows: u8,
    cols: u8,
    squares: [Piece; MAX_SQUARES],
}

impl Board {
    /// 空の盤面を作る
    pub fn empty(rows: u8, cols: u8) -> Board {
        debug_assert!(rows as usize * cols as usize <= MAX_SQUARES);
        Board {
            rows,
            cols,
            squares: [Piece::NONE; MAX_SQUARES],
        }
    }

    #[inline]
    fn index(&self, square: Square) -> usize {
        debug_assert!(square.row() < self.rows && square.col() < self.cols);
        square.row() as usize * self.cols as usize + square.col() as usize
    }

    /// 指定マスの駒を取得
    #[inline]
    pub fn piece_on(&self, square: Square) -> Piece {
        self.squares[self.index(square)]
    }

    /// 指定マスに駒を置く
    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Piece) {
        let index = self.index(square);
        self.squares[index] = piece;
    }

    /// 指定マスの駒を取り除いて返す
    #[inline]
    pub fn take_piece(&mut self, square: Square) -> Piece {
        let index = self.index(square);
        std::mem::take(&mut self.squares[index])
    }

    /// 指定の側の玉（royal）の位置
    ///
    /// 玉が捕獲済みで盤上にない場合は `None`。
    pub fn royal_square(&self, royal: PieceType, color: Color) -> Option<Square> {
        self.squares().find(|&sq| {
            let piece = self.piece_on(sq);
            piece.is_some() && piece.piece_type() == royal && piece.color() == color
        })
    }

    /// 全マスを走査するイテレータ
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        let rows = self.rows;
        let cols = self.cols;
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Square::new(row, col)))
    }

    /// 盤面のフィンガープリント（1 マス 4bit、120bit に収まる）
    ///
    /// `Piece::raw()` が 4bit に収まることを利用する。マス数が
    /// `MAX_SQUARES` 以下なので盤面全体が一意に u128 へ畳み込める。
    fn fingerprint(&self) -> u128 {
        let mut fp = 0u128;
        for (i, piece) in self.squares.iter().enumerate() {
            fp |= (piece.raw() as u128) << (i * 4);
        }
        fp
    }
}

/// 対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// 対局中
    InProgress,
    /// 勝敗確定
    Win { winner: Color },
    /// 引き分け
    Draw { reason: DrawReason },
}

/// 引き分けの理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// ステイルメイト（合法手なし・王手なし）
    Stalemate,
    /// 千日手（同一局面 4 回目）
    Repetition,
}

/// 対局状態
///
/// `apply` のたびに新しい値として複製される。`Arc<Ruleset>` の共有で
/// 複製は盤面・持ち駒・履歴のコピーだけで済む。
#[derive(Debug, Clone)]
pub struct GameState {
    ruleset: Arc<Ruleset>,
    board: Board,
    hands: [Hand; Color::NUM],
    side_to_move: Color,
    result: GameResult,
    /// 局面フィンガープリント（盤面 + 手番）の履歴。千日手判定に使う。
    history: Vec<u128>,
}

impl GameState {
    /// 初期局面を作る
    ///
    /// 先手（Sky）側の配置をそのまま置き、後手（Land）側は 180 度
    /// 回転した位置に置く。先手から指し始める。
    pub fn new(ruleset: Arc<Ruleset>) -> GameState {
        let mut board = Board::empty(ruleset.rows(), ruleset.cols());
        for &(square, piece_type) in ruleset.placement() {
            board.set_piece(square, Piece::new(piece_type, Color::Sky));
            board.set_piece(ruleset.mirror(square), Piece::new(piece_type, Color::Land));
        }
        let mut state = GameState {
            ruleset,
            board,
            hands: [Hand::EMPTY; Color::NUM],
            side_to_move: Color::Sky,
            result: GameResult::InProgress,
            history: Vec::new(),
        };
        let fp = state.fingerprint();
        state.history.push(fp);
        state
    }

    #[inline]
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn hand(&self, color: Color) -> Hand {
        self.hands[color.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 指定の側の玉の位置（捕獲済みなら `None`）
    pub fn royal_square(&self, color: Color) -> Option<Square> {
        self.board.royal_square(self.ruleset.royal(), color)
    }

    /// 指定の側が王手をかけられているか
    ///
    /// 玉が盤上にない（捕獲で対局が終わっている）場合は王手なし扱い。
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.royal_square(color) {
            Some(square) => movegen::attacks_square(self, color.opponent(), square),
            None => false,
        }
    }

    /// `apply` 時に記録された終局結果（詰み・ステイルメイトは含まない）
    ///
    /// 合法手生成から参照される。`result()` は合法手生成を呼ぶため、
    /// 生成側がこちらを使わないと相互再帰になる。
    #[inline]
    pub(crate) fn stored_result(&self) -> GameResult {
        self.result
    }

    /// 対局結果
    ///
    /// 捕獲・トライ・千日手による終局は `apply` 時に記録済み。
    /// それ以外は合法手の有無から詰み／ステイルメイトを判定する。
    pub fn result(&self) -> GameResult {
        if self.result != GameResult::InProgress {
            return self.result;
        }
        if movegen::legal_actions(self).is_empty() {
            if self.is_in_check(self.side_to_move) {
                GameResult::Win {
                    winner: self.side_to_move.opponent(),
                }
            } else {
                GameResult::Draw {
                    reason: DrawReason::Stalemate,
                }
            }
        } else {
            GameResult::InProgress
        }
    }

    /// 指し手を適用して新しい局面を返す
    ///
    /// 合法手でなければ `InvalidAction` を返し、局面は一切変更しない。
    /// 終局後はすべての指し手を拒否する。
    pub fn apply(&self, action: Action) -> Result<GameState, EngineError> {
        if !movegen::legal_actions(self).contains(&action) {
            return Err(EngineError::InvalidAction { action });
        }
        Ok(self.apply_unchecked(action))
    }

    /// 合法性チェックなしで指し手を適用する
    ///
    /// 生成済みの合法手にだけ使うこと。探索と合法性フィルタ自身が
    /// 使う内部経路で、`apply` の合法手照合を省く。
    pub(crate) fn apply_unchecked(&self, action: Action) -> GameState {
        let mut next = self.clone();
        let us = next.side_to_move;
        match action {
            Action::Move { from, to, promote } => {
                let mut piece = next.board.take_piece(from);
                debug_assert!(piece.is_some() && piece.color() == us);
                let captured = next.board.piece_on(to);
                if captured.is_some() {
                    if captured.piece_type() == self.ruleset.royal() {
                        // 玉の捕獲は無条件で勝ち。成りや千日手の判定より優先。
                        next.result = GameResult::Win { winner: us };
                    } else {
                        let demoted = self.ruleset.demoted(captured.piece_type());
                        next.hands[us.index()].add(demoted);
                    }
                }
                if promote {
                    if let Some(target) = self.ruleset.promotion_target(piece.piece_type()) {
                        piece = Piece::new(target, us);
                    }
                }
                next.board.set_piece(to, piece);
                // トライルール: 玉が敵陣最奥段に入り、相手の利きがなければ勝ち
                if next.result == GameResult::InProgress
                    && self.ruleset.try_rule()
                    && piece.piece_type() == self.ruleset.royal()
                    && to.row() == self.ruleset.deepest_rank(us)
                    && !movegen::attacks_square(&next, us.opponent(), to)
                {
                    next.result = GameResult::Win { winner: us };
                }
            }
            Action::Drop { piece_type, to } => {
                next.hands[us.index()].sub(piece_type);
                next.board.set_piece(to, Piece::new(piece_type, us));
            }
        }
        next.side_to_move = us.opponent();
        if next.result == GameResult::InProgress {
            let fp = next.fingerprint();
            next.history.push(fp);
            // 同一局面 4 回目で千日手
            if next.history.iter().filter(|&&h| h == fp).count() >= 4 {
                next.result = GameResult::Draw {
                    reason: DrawReason::Repetition,
                };
            }
        }
        next
    }

    /// 局面フィンガープリント（盤面 + 手番）
    fn fingerprint(&self) -> u128 {
        self.board.fingerprint() | ((self.side_to_move.index() as u128) << 120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn micro_state() -> GameState {
        GameState::new(Arc::new(Ruleset::micro()))
    }

    #[test]
    fn test_initial_board_micro() {
        let state = micro_state();
        let board = state.board();
        // 先手側
        let giraffe = board.piece_on(Square::new(0, 0));
        assert_eq!(giraffe.piece_type(), PieceType::Giraffe);
        assert_eq!(giraffe.color(), Color::Sky);
        assert_eq!(board.piece_on(Square::new(0, 1)).piece_type(), PieceType::Lion);
        assert_eq!(board.piece_on(Square::new(1, 1)).piece_type(), PieceType::Chick);
        // 後手側（180 度回転）
        let land_lion = board.piece_on(Square::new(3, 1));
        assert_eq!(land_lion.piece_type(), PieceType::Lion);
        assert_eq!(land_lion.color(), Color::Land);
        assert_eq!(board.piece_on(Square::new(3, 0)).piece_type(), PieceType::Elephant);
        assert_eq!(board.piece_on(Square::new(2, 1)).piece_type(), PieceType::Chick);
        // 空きマス
        assert!(board.piece_on(Square::new(1, 0)).is_none());

        assert_eq!(state.side_to_move(), Color::Sky);
        assert_eq!(state.result(), GameResult::InProgress);
        assert!(state.hand(Color::Sky).is_empty());
    }

    #[test]
    fn test_apply_moves_piece_and_flips_side() {
        let state = micro_state();
        // きりん a1 -> a2
        let action = Action::Move {
            from: Square::new(0, 0),
            to: Square::new(1, 0),
            promote: false,
        };
        let next = state.apply(action).unwrap();
        assert!(next.board().piece_on(Square::new(0, 0)).is_none());
        assert_eq!(
            next.board().piece_on(Square::new(1, 0)).piece_type(),
            PieceType::Giraffe
        );
        assert_eq!(next.side_to_move(), Color::Land);
        // 元の局面は変わらない
        assert_eq!(
            state.board().piece_on(Square::new(0, 0)).piece_type(),
            PieceType::Giraffe
        );
    }

    #[test]
    fn test_apply_capture_adds_to_hand() {
        let state = micro_state();
        // ひよこ b2 -> b3 で相手のひよこを取る
        let action = Action::Move {
            from: Square::new(1, 1),
            to: Square::new(2, 1),
            promote: false,
        };
        let next = state.apply(action).unwrap();
        assert_eq!(next.hand(Color::Sky).count(PieceType::Chick), 1);
        let piece = next.board().piece_on(Square::new(2, 1));
        assert_eq!(piece.piece_type(), PieceType::Chick);
        assert_eq!(piece.color(), Color::Sky);
    }

    #[test]
    fn test_apply_rejects_illegal_action() {
        let state = micro_state();
        // 空きマスからの移動
        let action = Action::Move {
            from: Square::new(1, 0),
            to: Square::new(2, 0),
            promote: false,
        };
        let err = state.apply(action).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAction { .. }));
        // 後手の駒を先手が動かすのも拒否
        let action = Action::Move {
            from: Square::new(2, 1),
            to: Square::new(1, 1),
            promote: false,
        };
        assert!(state.apply(action).is_err());
    }

    #[test]
    fn test_royal_square() {
        let state = micro_state();
        assert_eq!(state.royal_square(Color::Sky), Some(Square::new(0, 1)));
        assert_eq!(state.royal_square(Color::Land), Some(Square::new(3, 1)));
    }

    #[test]
    fn test_fingerprint_distinguishes_side_to_move() {
        let state = micro_state();
        let mut flipped = state.clone();
        flipped.side_to_move = Color::Land;
        assert_ne!(state.fingerprint(), flipped.fingerprint());
    }
}
