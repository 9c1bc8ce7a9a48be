//! 引擎错误类型
//!
//! 输入错误在处理前立即返回；无子可走是结构化的失败结果，不是故障；
//! 内部错误在边界处被捕获并转换成带消息的失败响应。

use crate::types::Side;
use thiserror::Error;

/// 引擎错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 棋盘形状错误（行数、列数）
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// 无法识别的棋子编码
    #[error("Invalid piece code: {0:?}")]
    InvalidPiece(String),

    /// FEN 格式错误
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("Invalid difficulty: {0:?} (expected easy, medium or hard)")]
    InvalidDifficulty(String),

    #[error("Invalid side: {0:?} (expected red or black)")]
    InvalidSide(String),

    /// 请求无法解析
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 行棋方没有合法走法
    #[error("No valid moves available for {side}")]
    NoMoves { side: Side },

    /// 搜索预算（节点数或时间）耗尽
    #[error("Search aborted after {nodes} nodes")]
    SearchAborted { nodes: u64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// 错误分类（对外协议中的 `kind` 字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NoMoves,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NoMoves => "no_moves",
            ErrorKind::Internal => "internal",
        }
    }
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidBoard(_)
            | EngineError::InvalidPiece(_)
            | EngineError::InvalidFen(_)
            | EngineError::InvalidDifficulty(_)
            | EngineError::InvalidSide(_)
            | EngineError::InvalidRequest(_) => ErrorKind::InvalidInput,
            EngineError::NoMoves { .. } => ErrorKind::NoMoves,
            EngineError::SearchAborted { .. } | EngineError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// 引擎结果类型
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            EngineError::InvalidPiece("x".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            EngineError::NoMoves { side: Side::Black }.kind(),
            ErrorKind::NoMoves
        );
        assert_eq!(EngineError::Internal("boom".into()).kind().as_str(), "internal");
    }

    #[test]
    fn test_error_messages() {
        let err = EngineError::NoMoves { side: Side::Black };
        assert_eq!(err.to_string(), "No valid moves available for black");
        let err = EngineError::InvalidBoard("expected 10 rows, got 9".into());
        assert_eq!(err.to_string(), "Invalid board: expected 10 rows, got 9");
    }
}
