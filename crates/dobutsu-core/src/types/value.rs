//! 評価値（Value）

/// 評価値
///
/// 手番側から見たスコア。正なら手番側が有利。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Value(i32);

impl Value {
    /// ゼロ
    pub const ZERO: Value = Value(0);
    /// 引き分け
    pub const DRAW: Value = Value(0);
    /// 勝ち（最大スコア）
    pub const WIN: Value = Value(10_000);
    /// 負け（最小スコア）
    pub const LOSS: Value = Value(-10_000);
    /// 無限大（探索窓の初期値）
    pub const INFINITE: Value = Value(10_001);

    /// 最大探索深度内での勝ちスコア下限
    pub const WIN_IN_MAX_PLY: Value = Value(Self::WIN.0 - 128);
    /// 最大探索深度内での負けスコア上限
    pub const LOSS_IN_MAX_PLY: Value = Value(-Self::WIN_IN_MAX_PLY.0);

    /// 値から生成
    #[inline]
    pub const fn new(v: i32) -> Value {
        Value(v)
    }

    /// 残り depth の地点で勝ちが確定したときのスコア
    #[inline]
    pub const fn win_in(depth: u8) -> Value {
        Value(Self::WIN.0 - depth as i32)
    }

    /// 残り depth の地点で負けが確定したときのスコア
    #[inline]
    pub const fn loss_in(depth: u8) -> Value {
        Value(Self::LOSS.0 + depth as i32)
    }

    /// 勝ちスコアかどうか
    #[inline]
    pub const fn is_win(self) -> bool {
        self.0 >= Self::WIN_IN_MAX_PLY.0
    }

    /// 負けスコアかどうか
    #[inline]
    pub const fn is_loss(self) -> bool {
        self.0 <= Self::LOSS_IN_MAX_PLY.0
    }

    /// 生の値を取得
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::ZERO
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    #[inline]
    fn neg(self) -> Value {
        Value(-self.0)
    }
}
