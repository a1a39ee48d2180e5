//! 駒種（PieceType）
//!
//! 閉じた列挙として駒種を定義する。成り先・成り元の対応はバリアント毎に
//! 異なるため [`crate::ruleset::Ruleset`] が保持し、この型では扱わない。

/// 駒種
///
/// 判別子は 1 始まり（0 は [`super::Piece::NONE`] 用に予約）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceType {
    /// らいおん（王に相当）
    Lion = 1,
    /// ひよこ（歩に相当）
    Chick = 2,
    /// ぞう（角の隣接版）
    Elephant = 3,
    /// きりん（飛の隣接版）
    Giraffe = 4,
    /// ねこ（銀に相当）
    Cat = 5,
    /// にわとり（金に相当、ひよこの成り）
    Hen = 6,
    /// いぬ（金に相当、ねこの成り）
    Dog = 7,
}

impl PieceType {
    /// 駒種の数
    pub const NUM: usize = 7;

    /// 全駒種（判別子順）
    pub const ALL: [PieceType; PieceType::NUM] = [
        PieceType::Lion,
        PieceType::Chick,
        PieceType::Elephant,
        PieceType::Giraffe,
        PieceType::Cat,
        PieceType::Hen,
        PieceType::Dog,
    ];

    /// インデックスとして使用（配列アクセス用、0 始まり）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// u8 から生成（範囲チェックあり）
    #[inline]
    pub const fn from_u8(n: u8) -> Option<PieceType> {
        if n >= 1 && n <= PieceType::NUM as u8 {
            // SAFETY: 1..=7 は有効な判別子
            Some(unsafe { std::mem::transmute::<u8, PieceType>(n) })
        } else {
            None
        }
    }

    /// 表記用の 1 文字（大文字）
    ///
    /// N はねこ（neko）。C との衝突を避けるため。
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceType::Lion => 'L',
            PieceType::Chick => 'C',
            PieceType::Elephant => 'E',
            PieceType::Giraffe => 'G',
            PieceType::Cat => 'N',
            PieceType::Hen => 'H',
            PieceType::Dog => 'D',
        }
    }

    /// 表記文字から駒種へ（大文字小文字を区別しない）
    #[inline]
    pub fn from_letter(c: char) -> Option<PieceType> {
        match c.to_ascii_uppercase() {
            'L' => Some(PieceType::Lion),
            'C' => Some(PieceType::Chick),
            'E' => Some(PieceType::Elephant),
            'G' => Some(PieceType::Giraffe),
            'N' => Some(PieceType::Cat),
            'H' => Some(PieceType::Hen),
            'D' => Some(PieceType::Dog),
            _ => None,
        }
    }
}
