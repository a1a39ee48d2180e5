//! 升目（Square）

/// 升目（段・筋の組）
///
/// 盤サイズはバリアント依存のため、固定長インデックスではなく座標対で持つ。
/// 範囲検査は [`crate::ruleset::Ruleset`] の盤サイズに対して行う。
///
/// 表記: 筋は Sky 視点で左から `a..`、段は Sky 自陣側から `1..`（例 `b2`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// 段と筋から升目を生成
    #[inline]
    pub const fn new(row: u8, col: u8) -> Square {
        Square { row, col }
    }

    /// 段を取得（0 始まり、Sky 自陣側が 0）
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// 筋を取得（0 始まり、Sky 視点で左端が 0）
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// 移動差分を適用した先の升目（盤外なら None）
    #[inline]
    pub fn offset(self, dr: i8, dc: i8, rows: u8, cols: u8) -> Option<Square> {
        let r = self.row as i16 + dr as i16;
        let c = self.col as i16 + dc as i16;
        if r < 0 || c < 0 || r >= rows as i16 || c >= cols as i16 {
            return None;
        }
        Some(Square::new(r as u8, c as u8))
    }

    /// 座標表記（"b2" 等）からの変換
    ///
    /// 盤サイズは見ないため、得られた升目は利用側で範囲検査すること。
    pub fn from_coord(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let col_ch = chars.next()?;
        let row_ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let col = (col_ch.to_ascii_lowercase() as i32) - ('a' as i32);
        let row = row_ch.to_digit(10)? as i32 - 1;
        if !(0..26).contains(&col) || row < 0 {
            return None;
        }
        Some(Square::new(row as u8, col as u8))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let col = (b'a' + self.col) as char;
        write!(f, "{}{}", col, self.row + 1)
    }
}
