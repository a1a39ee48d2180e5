//! 基本型モジュール
//!
//! ルールエンジンで使用する基本的な型を定義する。
//!
//! # 型の依存関係
//!
//! ```text
//! Color
//!   ↓
//! Square
//!   ↓
//! PieceType
//!   ↓
//! Piece ← Action
//!   ↓
//! Hand
//!
//! Value は独立
//! ```

mod action;
mod color;
mod hand;
mod piece;
mod piece_type;
mod square;
mod value;

pub use action::{Action, ActionList};
pub use color::Color;
pub use hand::Hand;
pub use piece::Piece;
pub use piece_type::PieceType;
pub use square::Square;
pub use value::Value;
