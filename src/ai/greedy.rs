//! 贪婪 AI 策略（medium）

use super::AIStrategy;
use crate::board::Board;
use crate::eval::Evaluator;
use crate::types::{Move, Side};
use rand::prelude::*;

/// 贪婪 AI - 有吃子时吃价值最高的子，否则随机走一步不吃子的棋
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAI {
    evaluator: Evaluator,
}

impl GreedyAI {
    pub fn new(evaluator: Evaluator) -> Self {
        GreedyAI { evaluator }
    }
}

impl AIStrategy for GreedyAI {
    fn select_move(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Move> {
        let moves = board.all_moves(side);

        let mut best_capture: Option<(Move, i32)> = None;
        let mut quiet_moves = Vec::with_capacity(moves.len());

        for mv in &moves {
            match board.get_piece(mv.to) {
                Some(target) => {
                    let value = self.evaluator.material_value(target.kind);
                    // 同价值时保留先生成的走法
                    if best_capture.map_or(true, |(_, best)| value > best) {
                        best_capture = Some((*mv, value));
                    }
                }
                None => quiet_moves.push(*mv),
            }
        }

        if let Some((mv, _)) = best_capture {
            return Some(mv);
        }

        quiet_moves
            .choose(rng)
            .or_else(|| moves.choose(rng))
            .copied()
    }
}
