//! AI 策略模块
//!
//! 三个难度对应三种策略：随机（easy）、优先吃子（medium）、
//! Alpha-Beta 剪枝的极小极大搜索（hard）。另提供一步前瞻的提示。

mod greedy;
mod hint;
mod minimax;
mod random;

pub use greedy::GreedyAI;
pub use hint::best_hint;
pub use minimax::{MinimaxAI, SearchContext, SearchLimits, SearchOutcome, SCORE_INFINITY};
pub use random::RandomAI;

use log::debug;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::board::Board;
use crate::eval::Evaluator;
use crate::types::{Advantage, Difficulty, Move, Side};

/// AI 执黑
pub const AI_SIDE: Side = Side::Black;

/// AI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// hard 难度的搜索深度
    pub depth: u32,
    /// 随机种子，None 时使用系统熵
    pub seed: Option<u64>,
    /// 搜索节点上限
    pub max_nodes: Option<u64>,
    /// 搜索时间限制（秒）
    pub time_limit: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: 3,
            seed: None,
            max_nodes: None,
            time_limit: None,
        }
    }
}

impl EngineConfig {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_nodes: self.max_nodes,
            // 负数、NaN 或超出 Duration 范围的值视为不限时
            time_limit: self
                .time_limit
                .and_then(|t| Duration::try_from_secs_f64(t).ok()),
        }
    }
}

/// AI 策略接口
pub trait AIStrategy {
    /// 为 `side` 选择一步走法，无合法走法时返回 None
    fn select_move(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Move>;
}

/// 局面评估结果（红方视角）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: i32,
    pub advantage: Advantage,
}

/// 象棋 AI 服务
///
/// 只持有配置与常量表，不保存任何对局状态，可在线程间共享，
/// 也可以每次请求新建。
#[derive(Debug, Clone, Default)]
pub struct XiangqiAI {
    config: EngineConfig,
    evaluator: Evaluator,
}

impl XiangqiAI {
    pub fn new(config: EngineConfig) -> Self {
        XiangqiAI {
            config,
            evaluator: Evaluator::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// 按配置创建随机数发生器
    pub fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        }
    }

    /// 难度对应的策略
    pub fn strategy(&self, difficulty: Difficulty) -> Box<dyn AIStrategy> {
        match difficulty {
            Difficulty::Easy => Box::new(RandomAI::new()),
            Difficulty::Medium => Box::new(GreedyAI::new(self.evaluator)),
            Difficulty::Hard => Box::new(MinimaxAI::new(&self.config)),
        }
    }

    /// 为 AI（黑方）选择走法
    pub fn select_move(
        &self,
        board: &Board,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Option<Move> {
        self.select_move_for(board, AI_SIDE, difficulty, rng)
    }

    /// 为指定一方选择走法
    pub fn select_move_for(
        &self,
        board: &Board,
        side: Side,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Option<Move> {
        let mv = self.strategy(difficulty).select_move(board, side, rng);
        match &mv {
            Some(m) => debug!("{} {} selected {}", difficulty, side, m),
            None => debug!("{} {} has no legal moves", difficulty, side),
        }
        mv
    }

    /// 一步前瞻的提示
    pub fn hint(&self, board: &Board, side: Side) -> Option<Move> {
        best_hint(&self.evaluator, board, side)
    }

    /// 红方视角的局面评估
    pub fn evaluate(&self, board: &Board) -> Evaluation {
        let score = self.evaluator.evaluate(board, true);
        Evaluation {
            score,
            advantage: Advantage::from_score(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, PieceKind, Position};

    fn lone_soldier_board() -> Board {
        // 黑方只有一个卒，且只有一步可走
        let mut board = Board::empty();
        board.set_piece(Position::new(9, 4), Some(Piece::red(PieceKind::General)));
        board.set_piece(Position::new(3, 0), Some(Piece::black(PieceKind::Soldier)));
        board
    }

    #[test]
    fn test_easy_single_move_any_seed() {
        let ai = XiangqiAI::default();
        let board = lone_soldier_board();
        let expected = Move::new(
            Position::new(3, 0),
            Position::new(4, 0),
            Piece::black(PieceKind::Soldier),
        );

        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                ai.select_move(&board, Difficulty::Easy, &mut rng),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_no_moves_returns_none() {
        let ai = XiangqiAI::default();
        let mut board = Board::empty();
        board.set_piece(Position::new(9, 4), Some(Piece::red(PieceKind::General)));
        let mut rng = StdRng::seed_from_u64(1);

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(ai.select_move(&board, difficulty, &mut rng), None);
        }
        assert_eq!(ai.hint(&board, Side::Black), None);
    }

    #[test]
    fn test_all_difficulties_return_legal_moves() {
        let ai = XiangqiAI::new(EngineConfig {
            max_nodes: Some(20_000),
            ..Default::default()
        });
        let board = Board::initial();
        let legal = board.all_moves(Side::Black);
        let mut rng = StdRng::seed_from_u64(7);

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mv = ai.select_move(&board, difficulty, &mut rng).unwrap();
            assert!(legal.contains(&mv), "{} returned illegal {}", difficulty, mv);
        }
    }

    #[test]
    fn test_seeded_easy_is_reproducible() {
        let ai = XiangqiAI::new(EngineConfig {
            seed: Some(42),
            ..Default::default()
        });
        let board = Board::initial();
        let a = ai.select_move(&board, Difficulty::Easy, &mut ai.rng());
        let b = ai.select_move(&board, Difficulty::Easy, &mut ai.rng());
        assert_eq!(a, b);
    }

    #[test]
    fn test_evaluate_labels() {
        let ai = XiangqiAI::default();
        let eval = ai.evaluate(&Board::initial());
        assert_eq!(eval.score, 0);
        assert_eq!(eval.advantage, Advantage::Equal);

        let mut board = Board::initial();
        board.set_piece(Position::new(0, 0), None);
        let eval = ai.evaluate(&board);
        assert_eq!(eval.score, 90);
        assert_eq!(eval.advantage, Advantage::Red);
    }

    #[test]
    fn test_config_limits() {
        let config = EngineConfig {
            max_nodes: Some(500),
            time_limit: Some(0.25),
            ..Default::default()
        };
        let limits = config.limits();
        assert_eq!(limits.max_nodes, Some(500));
        assert_eq!(limits.time_limit, Some(Duration::from_millis(250)));

        let config = EngineConfig {
            time_limit: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(config.limits().time_limit, None);
    }

    #[test]
    fn test_out_of_range_time_limit_is_unbounded() {
        for t in [1e30, f64::MAX, f64::INFINITY, f64::NAN] {
            let config = EngineConfig {
                time_limit: Some(t),
                ..Default::default()
            };
            assert_eq!(config.limits().time_limit, None, "time_limit={}", t);
        }
    }
}
