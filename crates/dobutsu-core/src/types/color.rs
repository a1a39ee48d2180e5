//! 手番（Color）

/// 手番（空側/地側）
///
/// Sky は段番号の小さい側を自陣とし、段番号が増える向きを前進とする。
/// Land はその逆。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Sky = 0,
    Land = 1,
}

impl Color {
    /// 手番の数
    pub const NUM: usize = 2;

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Sky => Color::Land,
            Color::Land => Color::Sky,
        }
    }

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 前進方向の段差分（Sky: +1, Land: -1）
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Sky => 1,
            Color::Land => -1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Sky => write!(f, "sky"),
            Color::Land => write!(f, "land"),
        }
    }
}
