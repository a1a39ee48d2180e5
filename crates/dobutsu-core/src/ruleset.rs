//! ルールセット（Ruleset）
//!
//! 盤サイズ・初期配置・駒の動き・成り・駒価値など、バリアントごとの
//! ルールを一元管理する。合法手生成や評価はすべてここを参照し、
//! 駒種名などから動きを推測することはない。
//!
//! 座標系は常に先手（Sky）基準で持つ。先手の前方が +row で、後手
//! （Land）の駒は参照時に (dr, dc) を両方反転して使う。

use crate::error::EngineError;
use crate::types::{Color, PieceType, Square};

/// 盤面マス数の上限
///
/// 盤面配列の固定長。6x5（ごろごろどうぶつしょうぎ）が収まるサイズ。
pub const MAX_SQUARES: usize = 30;

/// ライオンの動き（全方向 1 マス）
const LION_DELTAS: &[(i8, i8)] = &[
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
/// ひよこの動き（前 1 マス）
const CHICK_DELTAS: &[(i8, i8)] = &[(1, 0)];
/// 金相当の動き（にわとり・いぬ）
const GOLD_DELTAS: &[(i8, i8)] = &[(1, -1), (1, 0), (1, 1), (0, -1), (0, 1), (-1, 0)];
/// ぞうの動き（斜め 4 方向）
const ELEPHANT_DELTAS: &[(i8, i8)] = &[(1, -1), (1, 1), (-1, -1), (-1, 1)];
/// きりんの動き（縦横 4 方向）
const GIRAFFE_DELTAS: &[(i8, i8)] = &[(1, 0), (0, -1), (0, 1), (-1, 0)];
/// 銀相当の動き（ねこ）
const SILVER_DELTAS: &[(i8, i8)] = &[(1, -1), (1, 0), (1, 1), (-1, -1), (-1, 1)];

/// ルールセット定義の入力
///
/// `Ruleset::from_config` で検証してから使う。`placement` は先手側
/// 半分だけを書き、後手側は 180 度回転した位置に自動で配置される。
#[derive(Debug, Clone)]
pub struct RulesetConfig {
    pub name: String,
    pub rows: u8,
    pub cols: u8,
    /// 敵陣（成れる領域）の深さ（段数）
    pub zone_depth: u8,
    /// トライルール（玉が敵陣最奥段に安全に到達したら勝ち）を使うか
    pub try_rule: bool,
    pub royal: PieceType,
    /// 歩相当の駒種（二歩・打ち歩詰め制限の対象）
    pub pawn_like: PieceType,
    /// 先手側の初期配置
    pub placement: Vec<(Square, PieceType)>,
    /// 駒種ごとの動き（先手基準の (dr, dc) リスト）
    pub moves: [Vec<(i8, i8)>; PieceType::NUM],
    /// 駒種ごとの成り先（なければ None）
    pub promotion: [Option<PieceType>; PieceType::NUM],
    /// 駒種ごとの価値
    pub values: [i32; PieceType::NUM],
}

/// 検証済みルールセット
#[derive(Debug, Clone)]
pub struct Ruleset {
    name: String,
    rows: u8,
    cols: u8,
    zone_depth: u8,
    try_rule: bool,
    royal: PieceType,
    pawn_like: PieceType,
    placement: Vec<(Square, PieceType)>,
    moves: [Vec<(i8, i8)>; PieceType::NUM],
    promotion: [Option<PieceType>; PieceType::NUM],
    /// 成り先から元の駒種への逆引き（成り駒でなければ自分自身）
    demotion: [PieceType; PieceType::NUM],
    values: [i32; PieceType::NUM],
}

impl Ruleset {
    /// どうぶつしょうぎ（4x3、キャッチザライオン）
    pub fn micro() -> Ruleset {
        Self::assemble(Self::micro_config())
    }

    /// ごろごろどうぶつしょうぎ（6x5）
    pub fn goro() -> Ruleset {
        Self::assemble(Self::goro_config())
    }

    fn micro_config() -> RulesetConfig {
        let mut moves = empty_moves();
        moves[PieceType::Lion.index()] = LION_DELTAS.to_vec();
        moves[PieceType::Chick.index()] = CHICK_DELTAS.to_vec();
        moves[PieceType::Elephant.index()] = ELEPHANT_DELTAS.to_vec();
        moves[PieceType::Giraffe.index()] = GIRAFFE_DELTAS.to_vec();
        moves[PieceType::Hen.index()] = GOLD_DELTAS.to_vec();

        let mut promotion = [None; PieceType::NUM];
        promotion[PieceType::Chick.index()] = Some(PieceType::Hen);

        RulesetConfig {
            name: "micro".to_string(),
            rows: 4,
            cols: 3,
            zone_depth: 1,
            try_rule: true,
            royal: PieceType::Lion,
            pawn_like: PieceType::Chick,
            placement: vec![
                (Square::new(0, 0), PieceType::Giraffe),
                (Square::new(0, 1), PieceType::Lion),
                (Square::new(0, 2), PieceType::Elephant),
                (Square::new(1, 1), PieceType::Chick),
            ],
            moves,
            promotion,
            values: default_values(),
        }
    }

    fn goro_config() -> RulesetConfig {
        let mut moves = empty_moves();
        moves[PieceType::Lion.index()] = LION_DELTAS.to_vec();
        moves[PieceType::Chick.index()] = CHICK_DELTAS.to_vec();
        moves[PieceType::Cat.index()] = SILVER_DELTAS.to_vec();
        moves[PieceType::Hen.index()] = GOLD_DELTAS.to_vec();
        moves[PieceType::Dog.index()] = GOLD_DELTAS.to_vec();

        let mut promotion = [None; PieceType::NUM];
        promotion[PieceType::Chick.index()] = Some(PieceType::Hen);
        promotion[PieceType::Cat.index()] = Some(PieceType::Dog);

        RulesetConfig {
            name: "goro".to_string(),
            rows: 6,
            cols: 5,
            zone_depth: 2,
            try_rule: true,
            royal: PieceType::Lion,
            pawn_like: PieceType::Chick,
            placement: vec![
                (Square::new(0, 0), PieceType::Cat),
                (Square::new(0, 1), PieceType::Dog),
                (Square::new(0, 2), PieceType::Lion),
                (Square::new(0, 3), PieceType::Dog),
                (Square::new(0, 4), PieceType::Cat),
                (Square::new(1, 1), PieceType::Chick),
                (Square::new(1, 2), PieceType::Chick),
                (Square::new(1, 3), PieceType::Chick),
            ],
            moves,
            promotion,
            values: default_values(),
        }
    }

    /// 設定を検証してルールセットを構築
    pub fn from_config(config: RulesetConfig) -> Result<Ruleset, EngineError> {
        Self::validate(&config)?;
        Ok(Self::assemble(config))
    }

    fn validate(config: &RulesetConfig) -> Result<(), EngineError> {
        fn malformed(reason: String) -> EngineError {
            EngineError::MalformedRuleset { reason }
        }

        if config.rows == 0 || config.cols == 0 {
            return Err(malformed("board dimensions must be positive".to_string()));
        }
        if config.rows > 9 {
            return Err(malformed(format!(
                "rows must fit coordinate notation (got {})",
                config.rows
            )));
        }
        if config.rows as usize * config.cols as usize > MAX_SQUARES {
            return Err(malformed(format!(
                "board {}x{} exceeds {MAX_SQUARES} squares",
                config.rows, config.cols
            )));
        }
        if config.zone_depth == 0 || config.zone_depth >= config.rows {
            return Err(malformed(format!(
                "promotion zone depth {} does not fit {} rows",
                config.zone_depth, config.rows
            )));
        }
        if config.pawn_like == config.royal {
            return Err(malformed("royal piece cannot be the pawn-like type".to_string()));
        }
        if config.promotion[config.royal.index()].is_some() {
            return Err(malformed("royal piece cannot promote".to_string()));
        }

        // 成りの対応は単射で、成り先がさらに成ることはない
        for pt in PieceType::ALL {
            let Some(target) = config.promotion[pt.index()] else {
                continue;
            };
            if target == pt {
                return Err(malformed(format!("{pt:?} cannot promote to itself")));
            }
            if target == config.royal {
                return Err(malformed(format!("{pt:?} cannot promote to the royal piece")));
            }
            if config.promotion[target.index()].is_some() {
                return Err(malformed(format!(
                    "chained promotion {pt:?} -> {target:?} -> ... is not allowed"
                )));
            }
            for other in PieceType::ALL {
                if other != pt && config.promotion[other.index()] == Some(target) {
                    return Err(malformed(format!(
                        "both {pt:?} and {other:?} promote to {target:?}"
                    )));
                }
            }
        }

        let mut royal_count = 0;
        let mut occupied = [false; MAX_SQUARES];
        for &(square, piece_type) in &config.placement {
            if square.row() >= config.rows || square.col() >= config.cols {
                return Err(malformed(format!(
                    "placement square {square} is outside the {}x{} board",
                    config.rows, config.cols
                )));
            }
            let mirror = Square::new(
                config.rows - 1 - square.row(),
                config.cols - 1 - square.col(),
            );
            for sq in [square, mirror] {
                let index = sq.row() as usize * config.cols as usize + sq.col() as usize;
                if occupied[index] {
                    return Err(malformed(format!("placement square {sq} is occupied twice")));
                }
                occupied[index] = true;
            }
            if piece_type == config.royal {
                royal_count += 1;
            }
        }
        if royal_count != 1 {
            return Err(malformed(format!(
                "placement must contain exactly one royal piece (got {royal_count})"
            )));
        }

        // 配置される駒種とその成り先は動きを持たなければならない
        for &(_, piece_type) in &config.placement {
            for pt in std::iter::once(piece_type).chain(config.promotion[piece_type.index()]) {
                if config.moves[pt.index()].is_empty() {
                    return Err(malformed(format!(
                        "no movement pattern defined for {pt:?}"
                    )));
                }
            }
        }

        // 玉の価値は盤上の全駒（成りも含む）の合計より大きいこと。
        // これで探索の評価値が詰みスコアと競合しない。
        let mut material_total: i32 = 0;
        for &(_, piece_type) in &config.placement {
            if piece_type == config.royal {
                continue;
            }
            let base = config.values[piece_type.index()];
            let promoted = config.promotion[piece_type.index()]
                .map(|target| config.values[target.index()])
                .unwrap_or(base);
            material_total += base.max(promoted) * 2;
        }
        if config.values[config.royal.index()] <= material_total {
            return Err(malformed(format!(
                "royal value {} must exceed total material {material_total}",
                config.values[config.royal.index()]
            )));
        }

        Ok(())
    }

    fn assemble(config: RulesetConfig) -> Ruleset {
        let mut demotion = PieceType::ALL;
        for pt in PieceType::ALL {
            if let Some(target) = config.promotion[pt.index()] {
                demotion[target.index()] = pt;
            }
        }
        Ruleset {
            name: config.name,
            rows: config.rows,
            cols: config.cols,
            zone_depth: config.zone_depth,
            try_rule: config.try_rule,
            royal: config.royal,
            pawn_like: config.pawn_like,
            placement: config.placement,
            moves: config.moves,
            promotion: config.promotion,
            demotion,
            values: config.values,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u8 {
        self.cols
    }

    #[inline]
    pub fn try_rule(&self) -> bool {
        self.try_rule
    }

    #[inline]
    pub fn royal(&self) -> PieceType {
        self.royal
    }

    #[inline]
    pub fn pawn_like(&self) -> PieceType {
        self.pawn_like
    }

    /// 先手側の初期配置
    #[inline]
    pub fn placement(&self) -> &[(Square, PieceType)] {
        &self.placement
    }

    /// 盤を 180 度回転した位置（後手側の初期配置に使う）
    #[inline]
    pub fn mirror(&self, square: Square) -> Square {
        Square::new(self.rows - 1 - square.row(), self.cols - 1 - square.col())
    }

    /// 駒種の動き（先手基準）
    #[inline]
    pub fn deltas(&self, piece_type: PieceType) -> &[(i8, i8)] {
        &self.moves[piece_type.index()]
    }

    /// 成り先の駒種
    #[inline]
    pub fn promotion_target(&self, piece_type: PieceType) -> Option<PieceType> {
        self.promotion[piece_type.index()]
    }

    /// 捕獲時に戻る駒種（成り駒でなければ自分自身）
    #[inline]
    pub fn demoted(&self, piece_type: PieceType) -> PieceType {
        self.demotion[piece_type.index()]
    }

    /// 駒価値
    #[inline]
    pub fn value(&self, piece_type: PieceType) -> i32 {
        self.values[piece_type.index()]
    }

    /// 指定マスがその側の敵陣（成れる領域）か
    #[inline]
    pub fn in_promotion_zone(&self, color: Color, square: Square) -> bool {
        match color {
            Color::Sky => square.row() >= self.rows - self.zone_depth,
            Color::Land => square.row() < self.zone_depth,
        }
    }

    /// その側から見た敵陣最奥の段
    #[inline]
    pub fn deepest_rank(&self, color: Color) -> u8 {
        match color {
            Color::Sky => self.rows - 1,
            Color::Land => 0,
        }
    }

    /// 全マスを走査するイテレータ
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        let rows = self.rows;
        let cols = self.cols;
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Square::new(row, col)))
    }
}

fn empty_moves() -> [Vec<(i8, i8)>; PieceType::NUM] {
    std::array::from_fn(|_| Vec::new())
}

fn default_values() -> [i32; PieceType::NUM] {
    let mut values = [0; PieceType::NUM];
    values[PieceType::Lion.index()] = 1000;
    values[PieceType::Chick.index()] = 1;
    values[PieceType::Elephant.index()] = 5;
    values[PieceType::Giraffe.index()] = 5;
    values[PieceType::Cat.index()] = 2;
    values[PieceType::Hen.index()] = 3;
    values[PieceType::Dog.index()] = 3;
    values
}
