//! 指し手（Action）

use std::fmt;

use smallvec::SmallVec;

use super::{PieceType, Square};

/// 指し手
///
/// 盤上の駒を動かす `Move` と持ち駒を打つ `Drop` の 2 種。
/// 成りは `promote` フラグで明示する（成り先の駒種はルールセットが決める）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// 盤上の駒の移動
    Move {
        from: Square,
        to: Square,
        promote: bool,
    },
    /// 持ち駒を打つ
    Drop { piece_type: PieceType, to: Square },
}

/// 指し手リスト
///
/// どうぶつしょうぎ系の局面では合法手は数十手に収まるため、
/// インライン容量 64 でヒープ確保をほぼ回避できる。
pub type ActionList = SmallVec<[Action; 64]>;

impl Action {
    /// 座標表記から指し手を生成
    ///
    /// - 移動: `b2b3`（成りは末尾に `+`）
    /// - 打ち: `C*b3`（駒種の頭文字 + `*` + マス）
    ///
    /// 解釈できない場合は `None` を返す。
    pub fn from_coord(s: &str) -> Option<Action> {
        if !s.is_ascii() {
            return None;
        }
        let bytes = s.as_bytes();
        if bytes.len() == 4 && bytes[1] == b'*' {
            let piece_type = PieceType::from_letter(bytes[0] as char)?;
            let to = Square::from_coord(&s[2..])?;
            return Some(Action::Drop { piece_type, to });
        }
        match bytes.len() {
            4 => {
                let from = Square::from_coord(&s[..2])?;
                let to = Square::from_coord(&s[2..])?;
                Some(Action::Move {
                    from,
                    to,
                    promote: false,
                })
            }
            5 if bytes[4] == b'+' => {
                let from = Square::from_coord(&s[..2])?;
                let to = Square::from_coord(&s[2..4])?;
                Some(Action::Move {
                    from,
                    to,
                    promote: true,
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { from, to, promote } => {
                write!(f, "{from}{to}")?;
                if *promote {
                    write!(f, "+")?;
                }
                Ok(())
            }
            Action::Drop { piece_type, to } => write!(f, "{}*{}", piece_type.letter(), to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_coord_move() {
        let action = Action::from_coord("b2b3");
        assert_eq!(
            action,
            Some(Action::Move {
                from: Square::new(1, 1),
                to: Square::new(2, 1),
                promote: false,
            })
        );
    }

    #[test]
    fn test_action_from_coord_promote() {
        let action = Action::from_coord("b3b4+");
        assert_eq!(
            action,
            Some(Action::Move {
                from: Square::new(2, 1),
                to: Square::new(3, 1),
                promote: true,
            })
        );
    }

    #[test]
    fn test_action_from_coord_drop() {
        let action = Action::from_coord("C*b3");
        assert_eq!(
            action,
            Some(Action::Drop {
                piece_type: PieceType::Chick,
                to: Square::new(2, 1),
            })
        );
        // 小文字も許容
        assert_eq!(Action::from_coord("c*b3"), action);
    }

    #[test]
    fn test_action_from_coord_invalid() {
        // 長さ・記号・駒種の頭文字が不正なものはすべて None
        for s in ["", "b2", "b2b", "b2b3++", "C*", "X*b3", "*b3", "b2*3"] {
            assert!(Action::from_coord(s).is_none(), "parsed {s:?}");
        }
    }

    #[test]
    fn test_action_display() {
        let m = Action::Move {
            from: Square::new(1, 1),
            to: Square::new(2, 1),
            promote: false,
        };
        assert_eq!(m.to_string(), "b2b3");

        let p = Action::Move {
            from: Square::new(2, 1),
            to: Square::new(3, 1),
            promote: true,
        };
        assert_eq!(p.to_string(), "b3b4+");

        let d = Action::Drop {
            piece_type: PieceType::Chick,
            to: Square::new(2, 1),
        };
        assert_eq!(d.to_string(), "C*b3");
    }

    #[test]
    fn test_action_display_roundtrip() {
        for s in ["a1a2", "b2b3+", "E*c4", "G*a1"] {
            let action = Action::from_coord(s).unwrap();
            assert_eq!(action.to_string(), s, "roundtrip of {s:?}");
        }
    }
}
