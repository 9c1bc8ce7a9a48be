//! JSON 请求与响应
//!
//! 每行一个请求，`cmd` 字段区分命令。所有结果（包括输入错误、无子可走、
//! 内部错误）都转换成 `success: false` 的结构化响应，不会让宿主进程退出。

use log::{debug, error};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};

use crate::ai::{Evaluation, XiangqiAI, AI_SIDE};
use crate::error::{EngineError, Result};
use crate::fen::board_from_rows;
use crate::types::{Difficulty, Move, Side};

/// 请求中的棋盘：10 行，每行 9 格，空格为 null
pub type BoardRows = Vec<Vec<Option<String>>>;

fn default_true() -> bool {
    true
}

/// 请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Request {
    /// AI（黑方）走棋
    ///
    /// `difficulty` 省略时为 medium；无法识别的难度返回 invalid_input，
    /// 不会退回随机走子。`depth`、`max_nodes`、`time_limit`（秒）覆盖
    /// 服务端配置，只作用于本次请求。
    AiMove {
        board: BoardRows,
        #[serde(default)]
        difficulty: Option<String>,
        #[serde(default)]
        depth: Option<u32>,
        #[serde(default)]
        max_nodes: Option<u64>,
        #[serde(default)]
        time_limit: Option<f64>,
    },
    /// 提示
    Hint {
        board: BoardRows,
        #[serde(default = "default_true")]
        is_red_turn: bool,
    },
    /// 局面评估（红方视角）
    Evaluate { board: BoardRows },
    /// 列出合法走法
    Moves {
        board: BoardRows,
        #[serde(default = "default_true")]
        is_red_turn: bool,
    },
    Quit,
}

/// 响应中的走法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInfo {
    pub from: [i8; 2],
    pub to: [i8; 2],
    pub piece: String,
}

impl From<Move> for MoveInfo {
    fn from(mv: Move) -> Self {
        MoveInfo {
            from: [mv.from.row, mv.from.col],
            to: [mv.to.row, mv.to.col],
            piece: mv.piece.glyph().to_string(),
        }
    }
}

/// 响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(rename = "move", skip_serializing_if = "Option::is_none")]
    pub mv: Option<MoveInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<MoveInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moves: Option<Vec<MoveInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 错误分类：invalid_input / no_moves / internal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Response {
    fn success_move(mv: Move) -> Self {
        Self {
            success: true,
            mv: Some(mv.into()),
            ..Default::default()
        }
    }

    fn success_hint(mv: Move) -> Self {
        Self {
            success: true,
            hint: Some(mv.into()),
            ..Default::default()
        }
    }

    fn success_eval(evaluation: Evaluation) -> Self {
        Self {
            success: true,
            evaluation: Some(evaluation),
            ..Default::default()
        }
    }

    fn success_moves(moves: Vec<Move>) -> Self {
        Self {
            success: true,
            moves: Some(moves.into_iter().map(MoveInfo::from).collect()),
            ..Default::default()
        }
    }

    pub fn error(err: &EngineError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            kind: Some(err.kind().as_str().to_string()),
            ..Default::default()
        }
    }
}

fn side_from_flag(is_red_turn: bool) -> Side {
    if is_red_turn {
        Side::Red
    } else {
        Side::Black
    }
}

fn dispatch(ai: &XiangqiAI, request: &Request, rng: &mut dyn RngCore) -> Result<Response> {
    match request {
        Request::AiMove {
            board,
            difficulty,
            depth,
            max_nodes,
            time_limit,
        } => {
            let difficulty = match difficulty {
                Some(d) => d.parse::<Difficulty>()?,
                None => Difficulty::default(),
            };
            let board = board_from_rows(board)?;

            let mut config = ai.config().clone();
            if let Some(d) = depth {
                config.depth = *d;
            }
            if max_nodes.is_some() {
                config.max_nodes = *max_nodes;
            }
            if time_limit.is_some() {
                config.time_limit = *time_limit;
            }
            XiangqiAI::new(config)
                .select_move(&board, difficulty, rng)
                .map(Response::success_move)
                .ok_or(EngineError::NoMoves { side: AI_SIDE })
        }
        Request::Hint { board, is_red_turn } => {
            let side = side_from_flag(*is_red_turn);
            let board = board_from_rows(board)?;
            ai.hint(&board, side)
                .map(Response::success_hint)
                .ok_or(EngineError::NoMoves { side })
        }
        Request::Evaluate { board } => {
            let board = board_from_rows(board)?;
            Ok(Response::success_eval(ai.evaluate(&board)))
        }
        Request::Moves { board, is_red_turn } => {
            let board = board_from_rows(board)?;
            Ok(Response::success_moves(
                board.all_moves(side_from_flag(*is_red_turn)),
            ))
        }
        Request::Quit => Ok(Response {
            success: true,
            ..Default::default()
        }),
    }
}

/// 处理请求，任何错误或 panic 都转换为失败响应
pub fn handle_request(ai: &XiangqiAI, request: &Request, rng: &mut dyn RngCore) -> Response {
    let result = panic::catch_unwind(AssertUnwindSafe(|| dispatch(ai, request, rng)));

    match result {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            debug!("request failed: {}", err);
            Response::error(&err)
        }
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!("panic while handling request: {}", msg);
            Response::error(&EngineError::Internal(msg))
        }
    }
}

/// 解析一行 JSON 请求
pub fn parse_request(line: &str) -> Result<Request> {
    serde_json::from_str(line).map_err(|e| EngineError::InvalidRequest(e.to_string()))
}
