//! 局面评估
//!
//! 子力价值加兵卒位置分。红方为正、黑方为负，再按视角取符号。

use crate::board::Board;
use crate::types::{Piece, PieceKind, Position, Side};

/// 兵卒位置分，红兵按 (row, col) 取值，黑卒按 (9 - row, col) 取值
const SOLDIER_TABLE: [[i32; 9]; 10] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 1, 0, 0],
    [1, 1, 2, 2, 3, 2, 2, 1, 1],
    [2, 2, 3, 3, 4, 3, 3, 2, 2],
    [3, 3, 4, 4, 5, 4, 4, 3, 3],
    [4, 4, 5, 5, 6, 5, 5, 4, 4],
    [5, 5, 6, 6, 7, 6, 6, 5, 5],
    [6, 6, 7, 7, 8, 7, 7, 6, 6],
];

/// 静态评估器，只持有常量表，可在线程间共享
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Evaluator
    }

    /// 子力价值
    pub fn material_value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::General => 1000,
            PieceKind::Advisor => 20,
            PieceKind::Elephant => 20,
            PieceKind::Horse => 40,
            PieceKind::Chariot => 90,
            PieceKind::Cannon => 45,
            PieceKind::Soldier => 10,
        }
    }

    /// 位置分（目前只有兵卒）
    pub fn positional_bonus(&self, piece: Piece, pos: Position) -> i32 {
        if piece.kind != PieceKind::Soldier {
            return 0;
        }
        let row = match piece.side {
            Side::Red => pos.row as usize,
            Side::Black => 9 - pos.row as usize,
        };
        SOLDIER_TABLE[row][pos.col as usize]
    }

    pub fn piece_value(&self, piece: Piece, pos: Position) -> i32 {
        self.material_value(piece.kind) + self.positional_bonus(piece, pos)
    }

    /// 红方视角的原始分数
    pub fn raw_score(&self, board: &Board) -> i32 {
        board
            .pieces(None)
            .map(|(pos, piece)| {
                let value = self.piece_value(piece, pos);
                match piece.side {
                    Side::Red => value,
                    Side::Black => -value,
                }
            })
            .sum()
    }

    /// 评估局面，`from_red_perspective` 为 false 时取反
    pub fn evaluate(&self, board: &Board, from_red_perspective: bool) -> i32 {
        let score = self.raw_score(board);
        if from_red_perspective {
            score
        } else {
            -score
        }
    }
}
