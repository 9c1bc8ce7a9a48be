//! 随机 AI 策略（easy）

use super::AIStrategy;
use crate::board::Board;
use crate::types::{Move, Side};
use rand::prelude::*;

/// 随机 AI - 在全部合法走法中均匀随机选择
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAI;

impl RandomAI {
    pub fn new() -> Self {
        RandomAI
    }
}

impl AIStrategy for RandomAI {
    fn select_move(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Move> {
        board.all_moves(side).choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_covers_many_moves() {
        let board = Board::initial();
        let ai = RandomAI::new();
        let mut rng = StdRng::seed_from_u64(3);

        let picked: HashSet<Move> = (0..200)
            .filter_map(|_| ai.select_move(&board, Side::Red, &mut rng))
            .collect();
        assert!(picked.len() > 10);
        let legal = board.all_moves(Side::Red);
        assert!(picked.iter().all(|m| legal.contains(m)));
    }
}
