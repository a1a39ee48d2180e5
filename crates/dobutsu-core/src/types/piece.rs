//! 駒（Piece）

use super::{Color, PieceType};

/// 駒（4bit パック）
///
/// - bit 0-2: 駒種（1-7、0 は駒なし）
/// - bit 3:   手番（0=Sky, 1=Land）
///
/// 盤の各升と局面フィンガープリントの 1 ニブルにそのまま収まる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    /// 駒なし
    pub const NONE: Piece = Piece(0);

    const TYPE_MASK: u8 = 0b0111;
    const COLOR_SHIFT: u8 = 3;

    /// 駒種と手番から駒を生成
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece(piece_type as u8 | ((color as u8) << Self::COLOR_SHIFT))
    }

    /// 駒なしかどうか
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// 駒があるかどうか
    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// 駒種を取得
    ///
    /// 【注意】`NONE` に対して呼ぶと不正な値になる（debug_assert で検出）
    #[inline]
    pub const fn piece_type(self) -> PieceType {
        debug_assert!(self.is_some(), "piece_type() called on Piece::NONE");
        // SAFETY: NONE でなければ bit 0-2 は 1-7 の範囲
        unsafe { std::mem::transmute(self.0 & Self::TYPE_MASK) }
    }

    /// 手番を取得
    ///
    /// 【注意】`NONE` に対して呼ぶと Sky 扱いになる（debug_assert で検出）
    #[inline]
    pub const fn color(self) -> Color {
        debug_assert!(self.is_some(), "color() called on Piece::NONE");
        // SAFETY: bit 3 は 0 か 1
        unsafe { std::mem::transmute(self.0 >> Self::COLOR_SHIFT) }
    }

    /// 内部値を取得（フィンガープリントのニブルとして使用）
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::NONE
    }
}
