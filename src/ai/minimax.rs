//! Minimax AI 策略（hard）
//!
//! 固定深度的极小极大搜索，带 Alpha-Beta 剪枝。`maximizing` 为真时黑方走棋，
//! 叶子节点按 `evaluate(board, !maximizing)` 取分。每次搜索有独立的节点计数，
//! 可以用节点上限或时间限制中断。

use super::{AIStrategy, EngineConfig};
use crate::board::Board;
use crate::error::{EngineError, Result};
use crate::eval::Evaluator;
use crate::types::{Move, Side};
use log::{debug, warn};
use rand::RngCore;
use std::time::{Duration, Instant};

/// 搜索中使用的无穷大分数
pub const SCORE_INFINITY: i32 = 1_000_000;

/// 每隔多少个节点检查一次时间
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// 搜索预算
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_nodes: Option<u64>,
    pub time_limit: Option<Duration>,
}

/// 单次搜索的上下文：节点计数与截止时间
#[derive(Debug, Clone)]
pub struct SearchContext {
    nodes: u64,
    max_nodes: Option<u64>,
    deadline: Option<Instant>,
}

impl SearchContext {
    pub fn new(limits: SearchLimits) -> Self {
        SearchContext {
            nodes: 0,
            max_nodes: limits.max_nodes,
            // 溢出时不设截止时间
            deadline: limits
                .time_limit
                .and_then(|t| Instant::now().checked_add(t)),
        }
    }

    /// 不限节点、不限时间
    pub fn unbounded() -> Self {
        SearchContext::new(SearchLimits::default())
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// 记录一个节点，预算耗尽时返回 SearchAborted
    fn visit(&mut self) -> Result<()> {
        self.nodes += 1;

        if self.max_nodes.is_some_and(|max| self.nodes > max) {
            return Err(EngineError::SearchAborted { nodes: self.nodes });
        }
        if self.nodes % DEADLINE_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
        {
            return Err(EngineError::SearchAborted { nodes: self.nodes });
        }
        Ok(())
    }
}

/// 根节点搜索结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    /// 最佳走法的分数，预算在第一个走法完成前耗尽时为 None
    pub score: Option<i32>,
    pub nodes: u64,
    pub aborted: bool,
}

/// Minimax AI - 使用 Alpha-Beta 剪枝
#[derive(Debug, Clone)]
pub struct MinimaxAI {
    depth: u32,
    limits: SearchLimits,
    evaluator: Evaluator,
}

/// `maximizing` 为真时轮到黑方
#[inline]
fn side_to_move(maximizing: bool) -> Side {
    if maximizing {
        Side::Black
    } else {
        Side::Red
    }
}

impl MinimaxAI {
    pub fn new(config: &EngineConfig) -> Self {
        MinimaxAI {
            depth: config.depth,
            limits: config.limits(),
            evaluator: Evaluator::new(),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// 极小极大算法与 Alpha-Beta 剪枝
    pub fn minimax(
        &self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        ctx: &mut SearchContext,
    ) -> Result<i32> {
        ctx.visit()?;

        if depth == 0 {
            return Ok(self.evaluator.evaluate(board, !maximizing));
        }

        let moves = board.all_moves(side_to_move(maximizing));
        if moves.is_empty() {
            return Ok(self.evaluator.evaluate(board, !maximizing));
        }

        if maximizing {
            let mut max_eval = -SCORE_INFINITY;
            for mv in &moves {
                let child = board.apply_move(mv);
                let eval = self.minimax(&child, depth - 1, false, alpha, beta, ctx)?;
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            Ok(max_eval)
        } else {
            let mut min_eval = SCORE_INFINITY;
            for mv in &moves {
                let child = board.apply_move(mv);
                let eval = self.minimax(&child, depth - 1, true, alpha, beta, ctx)?;
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            Ok(min_eval)
        }
    }

    /// 对 `side` 的每个走法做一次完整窗口搜索，选出最佳走法
    ///
    /// 黑方走完后以 `maximizing = true` 搜索并取最小分，红方与之镜像。
    /// 同分时保留先生成的走法。预算耗尽时返回已完成部分中的最佳走法，
    /// 一个都没完成时返回第一个合法走法。
    pub fn search(&self, board: &Board, side: Side) -> SearchOutcome {
        let moves = board.all_moves(side);
        let mut ctx = SearchContext::new(self.limits);
        let maximizing = side == Side::Black;

        let mut best: Option<(Move, i32)> = None;
        let mut aborted = false;

        for mv in &moves {
            let child = board.apply_move(mv);
            let score = match self.minimax(
                &child,
                self.depth,
                maximizing,
                -SCORE_INFINITY,
                SCORE_INFINITY,
                &mut ctx,
            ) {
                Ok(score) => score,
                Err(err) => {
                    warn!("{}; using best completed move", err);
                    aborted = true;
                    break;
                }
            };

            let better = match best {
                None => true,
                Some((_, best_score)) if side == Side::Black => score < best_score,
                Some((_, best_score)) => score > best_score,
            };
            if better {
                best = Some((*mv, score));
            }
        }

        debug!(
            "search side={} depth={} moves={} nodes={} best={:?}",
            side,
            self.depth,
            moves.len(),
            ctx.nodes(),
            best.map(|(_, s)| s)
        );

        SearchOutcome {
            best_move: best.map(|(m, _)| m).or_else(|| moves.first().copied()),
            score: best.map(|(_, s)| s),
            nodes: ctx.nodes(),
            aborted,
        }
    }
}

impl AIStrategy for MinimaxAI {
    fn select_move(&self, board: &Board, side: Side, _rng: &mut dyn RngCore) -> Option<Move> {
        self.search(board, side).best_move
    }
}
