//! エラー型
//!
//! ルール違反の指し手とルールセット定義の不備のみをエラーとして扱う。
//! 「玉が既に盤上にない」状態はエラーではなく終局済みの通常データであり、
//! `Board::royal_square` が `None` を返すことで表現する（王手判定は
//! 「王手ではない」として扱う）。

use thiserror::Error;

use crate::types::Action;

/// ルールエンジンのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// 合法手集合に含まれない指し手が `apply` に渡された（呼び出し側のバグ）
    #[error("invalid action {action}: not in the legal action set")]
    InvalidAction {
        /// 拒否された指し手
        action: Action,
    },

    /// ルールセット定義が不正（構築時に検出される）
    #[error("malformed ruleset: {reason}")]
    MalformedRuleset {
        /// 検出された不備の内容
        reason: String,
    },
}
