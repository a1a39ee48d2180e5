//! # dobutsu-core
//!
//! どうぶつしょうぎのルールエンジン + 探索のコアライブラリ。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Color, Square, Piece, Action, Value, etc.）
//! - `ruleset`: バリアント定義（盤サイズ・初期配置・駒の動き・成り・価値）
//! - `position`: 局面表現と apply / 終局判定
//! - `movegen`: 擬似合法手生成と合法性フィルタ
//! - `eval`: 駒割り評価
//! - `search`: 探索アルゴリズム（negamax + αβ枝刈り）
//!

// 基本型
pub mod types;

// バリアント定義
pub mod ruleset;

// 局面表現
pub mod position;

// 合法手生成
pub mod movegen;

// 評価
pub mod eval;

// 探索
pub mod search;

// エラー型
pub mod error;
