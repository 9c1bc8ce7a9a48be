//! Xiangqi Rules Engine & AI
//!
//! 象棋规则引擎与 AI - 走法生成、局面评估、三档难度的走法选择

pub mod ai;
pub mod board;
pub mod error;
pub mod eval;
pub mod fen;
pub mod protocol;
pub mod test_positions;
pub mod types;

pub use ai::{
    best_hint, AIStrategy, EngineConfig, Evaluation, GreedyAI, MinimaxAI, RandomAI,
    SearchContext, SearchLimits, SearchOutcome, XiangqiAI, AI_SIDE, SCORE_INFINITY,
};
pub use board::Board;
pub use error::{EngineError, ErrorKind, Result};
pub use eval::Evaluator;
pub use fen::{
    board_from_rows, board_to_fen, board_to_rows, parse_fen, parse_piece_code, FenState,
    INITIAL_FEN,
};
pub use protocol::{handle_request, parse_request, Request, Response};
pub use types::{Advantage, Difficulty, Move, Piece, PieceKind, Position, Side};
