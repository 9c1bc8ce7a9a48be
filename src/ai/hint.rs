//! 提示：一步前瞻

use crate::board::Board;
use crate::eval::Evaluator;
use crate::types::{Move, Side};

/// 对 `side` 的每个走法，按走子方视角评估走后的局面；
/// 红方取最大分，黑方取最小分，同分保留先生成的走法。
pub fn best_hint(evaluator: &Evaluator, board: &Board, side: Side) -> Option<Move> {
    let from_red = side == Side::Red;
    let mut best: Option<(Move, i32)> = None;

    for mv in board.all_moves(side) {
        let score = evaluator.evaluate(&board.apply_move(&mv), from_red);
        let better = match best {
            None => true,
            Some((_, best_score)) if from_red => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if better {
            best = Some((mv, score));
        }
    }

    best.map(|(mv, _)| mv)
}
