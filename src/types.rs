//! 象棋核心类型定义
//!
//! 定义棋盘逻辑中所有基础数据类型。棋子身份始终是 (PieceKind, Side)，
//! 汉字只用于显示和传输。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// 棋子阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opposite(&self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// 从 FEN 回合字符解析
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'r' | 'w' => Some(Side::Red),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    pub fn to_fen_char(&self) -> char {
        match self {
            Side::Red => 'r',
            Side::Black => 'b',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Black => write!(f, "black"),
        }
    }
}

impl FromStr for Side {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Side::Red),
            "black" | "b" => Ok(Side::Black),
            _ => Err(EngineError::InvalidSide(s.to_string())),
        }
    }
}

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// 帥/将
    General,
    /// 仕/士
    Advisor,
    /// 相/象
    Elephant,
    /// 馬/马
    Horse,
    /// 車/车
    Chariot,
    /// 炮/砲
    Cannon,
    /// 兵/卒
    Soldier,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    /// 从 FEN 字符解析（大小写不敏感，兼容 b/n 写法）
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::General),
            'a' => Some(PieceKind::Advisor),
            'e' | 'b' => Some(PieceKind::Elephant),
            'h' | 'n' => Some(PieceKind::Horse),
            'r' => Some(PieceKind::Chariot),
            'c' => Some(PieceKind::Cannon),
            'p' => Some(PieceKind::Soldier),
            _ => None,
        }
    }

    /// 转换为 FEN 字符（小写）
    pub fn to_fen_char(&self) -> char {
        match self {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'e',
            PieceKind::Horse => 'h',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        }
    }

    /// 某一方的显示汉字
    pub fn glyph(&self, side: Side) -> char {
        match (side, self) {
            (Side::Red, PieceKind::General) => '帥',
            (Side::Red, PieceKind::Advisor) => '仕',
            (Side::Red, PieceKind::Elephant) => '相',
            (Side::Red, PieceKind::Horse) => '馬',
            (Side::Red, PieceKind::Chariot) => '車',
            (Side::Red, PieceKind::Cannon) => '炮',
            (Side::Red, PieceKind::Soldier) => '兵',
            (Side::Black, PieceKind::General) => '将',
            (Side::Black, PieceKind::Advisor) => '士',
            (Side::Black, PieceKind::Elephant) => '象',
            (Side::Black, PieceKind::Horse) => '马',
            (Side::Black, PieceKind::Chariot) => '车',
            (Side::Black, PieceKind::Cannon) => '砲',
            (Side::Black, PieceKind::Soldier) => '卒',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::General => "General",
            PieceKind::Advisor => "Advisor",
            PieceKind::Elephant => "Elephant",
            PieceKind::Horse => "Horse",
            PieceKind::Chariot => "Chariot",
            PieceKind::Cannon => "Cannon",
            PieceKind::Soldier => "Soldier",
        };
        write!(f, "{}", name)
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }

    pub fn red(kind: PieceKind) -> Self {
        Piece::new(kind, Side::Red)
    }

    pub fn black(kind: PieceKind) -> Self {
        Piece::new(kind, Side::Black)
    }

    /// FEN 字符：红方大写，黑方小写
    pub fn to_fen_char(&self) -> char {
        let c = self.kind.to_fen_char();
        match self.side {
            Side::Red => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph(self.side)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// 棋盘位置 (row, col)
///
/// row: 0-9 (0 是黑方底线，9 是红方底线)
/// col: 0-8 (从左到右)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const ROWS: i8 = 10;
    pub const COLS: i8 = 9;

    pub fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// 检查位置是否在棋盘范围内
    #[inline]
    pub fn is_valid(&self) -> bool {
        (0..Self::ROWS).contains(&self.row) && (0..Self::COLS).contains(&self.col)
    }

    /// 检查位置是否在某方九宫格内
    pub fn is_in_palace(&self, side: Side) -> bool {
        if !(3..=5).contains(&self.col) {
            return false;
        }
        match side {
            Side::Red => (7..=9).contains(&self.row),
            Side::Black => (0..=2).contains(&self.row),
        }
    }

    /// 检查位置是否在某方河界以内（未过河）
    pub fn is_on_own_side(&self, side: Side) -> bool {
        match side {
            Side::Red => (5..=9).contains(&self.row),
            Side::Black => (0..=4).contains(&self.row),
        }
    }

    /// 位置加偏移量
    #[inline]
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Position {
        Position {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }

    /// 转换为 90 格数组下标，调用方保证位置合法
    #[inline]
    pub fn to_index(&self) -> usize {
        self.row as usize * Self::COLS as usize + self.col as usize
    }

    pub fn from_index(index: usize) -> Position {
        Position {
            row: (index / Self::COLS as usize) as i8,
            col: (index % Self::COLS as usize) as i8,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
}

impl Move {
    pub fn new(from: Position, to: Position, piece: Piece) -> Self {
        Move { from, to, piece }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}->{}", self.piece, self.from, self.to)
    }
}

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 随机走子
    Easy,
    /// 优先吃子
    #[default]
    Medium,
    /// 极小极大搜索
    Hard,
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// 局面优势方（由红方视角分数的符号决定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Advantage {
    Red,
    Black,
    Equal,
}

impl Advantage {
    pub fn from_score(red_score: i32) -> Advantage {
        match red_score.signum() {
            1 => Advantage::Red,
            -1 => Advantage::Black,
            _ => Advantage::Equal,
        }
    }
}

impl fmt::Display for Advantage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advantage::Red => write!(f, "red"),
            Advantage::Black => write!(f, "black"),
            Advantage::Equal => write!(f, "equal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_index_roundtrip() {
        for row in 0..10 {
            for col in 0..9 {
                let pos = Position::new(row, col);
                assert_eq!(Position::from_index(pos.to_index()), pos);
            }
        }
        assert_eq!(Position::new(9, 8).to_index(), 89);
    }

    #[test]
    fn test_palace_bounds() {
        assert!(Position::new(9, 4).is_in_palace(Side::Red));
        assert!(Position::new(7, 3).is_in_palace(Side::Red));
        assert!(!Position::new(6, 4).is_in_palace(Side::Red));
        assert!(Position::new(0, 5).is_in_palace(Side::Black));
        assert!(!Position::new(0, 6).is_in_palace(Side::Black));
        assert!(!Position::new(3, 4).is_in_palace(Side::Black));
    }

    #[test]
    fn test_own_side() {
        assert!(Position::new(5, 0).is_on_own_side(Side::Red));
        assert!(!Position::new(4, 0).is_on_own_side(Side::Red));
        assert!(Position::new(4, 0).is_on_own_side(Side::Black));
        assert!(!Position::new(5, 0).is_on_own_side(Side::Black));
    }

    #[test]
    fn test_glyphs_are_side_specific() {
        for kind in PieceKind::ALL {
            assert_ne!(kind.glyph(Side::Red), kind.glyph(Side::Black));
        }
        assert_eq!(Piece::red(PieceKind::Chariot).glyph(), '車');
        assert_eq!(Piece::black(PieceKind::Cannon).glyph(), '砲');
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_advantage_from_score() {
        assert_eq!(Advantage::from_score(12), Advantage::Red);
        assert_eq!(Advantage::from_score(-3), Advantage::Black);
        assert_eq!(Advantage::from_score(0), Advantage::Equal);
    }
}
