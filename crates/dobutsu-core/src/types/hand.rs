//! 持ち駒（Hand）

use super::PieceType;

/// 持ち駒（u32 に 4bit ずつパック）
///
/// 駒種ごとに 4bit のカウンタを持つ（シフト量は `PieceType::index() * 4`）。
/// ライオンの枠もあるが、ライオンは捕獲と同時に終局するため常に 0。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Hand(u32);

impl Hand {
    /// 持ち駒なし
    pub const EMPTY: Hand = Hand(0);

    const COUNT_BITS: u32 = 4;
    const COUNT_MASK: u32 = 0xF;

    #[inline]
    const fn shift(piece_type: PieceType) -> u32 {
        piece_type.index() as u32 * Self::COUNT_BITS
    }

    /// 指定駒種の枚数を取得
    #[inline]
    pub const fn count(self, piece_type: PieceType) -> u8 {
        ((self.0 >> Self::shift(piece_type)) & Self::COUNT_MASK) as u8
    }

    /// 指定駒種を 1 枚以上持っているか
    #[inline]
    pub const fn has(self, piece_type: PieceType) -> bool {
        self.count(piece_type) > 0
    }

    /// 持ち駒が空か
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 1 枚加える
    #[inline]
    pub fn add(&mut self, piece_type: PieceType) {
        debug_assert!(self.count(piece_type) < Self::COUNT_MASK as u8);
        self.0 += 1 << Self::shift(piece_type);
    }

    /// 1 枚減らす
    #[inline]
    pub fn sub(&mut self, piece_type: PieceType) {
        debug_assert!(self.has(piece_type), "sub() called on empty slot");
        self.0 -= 1 << Self::shift(piece_type);
    }

    /// 合計枚数
    pub fn total(self) -> u32 {
        PieceType::ALL.iter().map(|&pt| self.count(pt) as u32).sum()
    }
}
