//! 棋盘记谱：FEN、棋子编码与行列网格
//!
//! FEN 格式: `<棋盘> [回合]`
//!
//! 棋盘从第 0 行（黑方底线）写到第 9 行（红方底线），行之间用 `/` 分隔：
//! - 红方：K(帥) A(仕) E(相) H(馬) R(車) C(炮) P(兵)，兼容 B/N
//! - 黑方：k a e h r c p
//! - 空格：数字 (1-9)
//!
//! 回合：`r`（或 `w`）红方，`b` 黑方，省略时为红方。
//!
//! 请求中的棋盘是 10 行 x 9 列的网格，每格为空或一个棋子编码，
//! 编码可以是汉字（帥仕相馬車炮兵 / 将士象马车砲卒）或上面的 FEN 字母。

use std::collections::HashMap;

use crate::board::Board;
use crate::error::{EngineError, Result};
use crate::types::{Piece, PieceKind, Position, Side};

lazy_static::lazy_static! {
    /// 棋子编码表：汉字与 FEN 字母
    static ref PIECE_CODES: HashMap<char, Piece> = {
        let mut codes = HashMap::new();
        for kind in PieceKind::ALL {
            for side in [Side::Red, Side::Black] {
                let piece = Piece::new(kind, side);
                codes.insert(piece.glyph(), piece);
                codes.insert(piece.to_fen_char(), piece);
            }
        }
        for (alias, kind) in [('b', PieceKind::Elephant), ('n', PieceKind::Horse)] {
            codes.insert(alias, Piece::black(kind));
            codes.insert(alias.to_ascii_uppercase(), Piece::red(kind));
        }
        codes
    };
}

/// 标准开局 FEN
pub const INITIAL_FEN: &str = "rheakaehr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RHEAKAEHR r";

/// FEN 解析后的状态
#[derive(Debug, Clone)]
pub struct FenState {
    pub board: Board,
    pub turn: Side,
}

/// 解析单个棋子编码（一个汉字或一个 FEN 字母）
pub fn parse_piece_code(code: &str) -> Result<Piece> {
    let mut chars = code.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PIECE_CODES
            .get(&c)
            .copied()
            .ok_or_else(|| EngineError::InvalidPiece(code.to_string())),
        _ => Err(EngineError::InvalidPiece(code.to_string())),
    }
}

/// 解析 FEN 字符串
pub fn parse_fen(fen: &str) -> Result<FenState> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 2 {
        return Err(EngineError::InvalidFen(format!(
            "expected '<board> [turn]', got: {:?}",
            fen
        )));
    }

    let board = parse_board(parts[0])?;
    let turn = match parts.get(1) {
        None => Side::Red,
        Some(turn_str) => {
            let mut chars = turn_str.chars();
            match (chars.next().and_then(Side::from_fen_char), chars.next()) {
                (Some(side), None) => side,
                _ => {
                    return Err(EngineError::InvalidFen(format!(
                        "invalid turn: {}",
                        turn_str
                    )))
                }
            }
        }
    };

    Ok(FenState { board, turn })
}

/// 解析棋盘字符串
fn parse_board(board_str: &str) -> Result<Board> {
    let rows: Vec<&str> = board_str.split('/').collect();
    if rows.len() != 10 {
        return Err(EngineError::InvalidFen(format!(
            "expected 10 rows, got {}",
            rows.len()
        )));
    }

    let mut board = Board::empty();

    for (row, row_str) in rows.iter().enumerate() {
        let row = row as i8;
        let mut col: i8 = 0;

        for ch in row_str.chars() {
            if col >= 9 {
                return Err(EngineError::InvalidFen(format!(
                    "row {} has more than 9 columns",
                    row
                )));
            }

            if let Some(n) = ch.to_digit(10) {
                if n == 0 {
                    return Err(EngineError::InvalidFen(format!(
                        "zero-length gap in row {}",
                        row
                    )));
                }
                col += n as i8;
            } else if ch.is_ascii_alphabetic() {
                let kind = PieceKind::from_fen_char(ch)
                    .ok_or_else(|| EngineError::InvalidFen(format!("invalid piece char: {}", ch)))?;
                let side = if ch.is_ascii_uppercase() {
                    Side::Red
                } else {
                    Side::Black
                };
                board.set_piece(Position::new(row, col), Some(Piece::new(kind, side)));
                col += 1;
            } else {
                return Err(EngineError::InvalidFen(format!(
                    "invalid character in board: {}",
                    ch
                )));
            }
        }

        if col != 9 {
            return Err(EngineError::InvalidFen(format!(
                "row {} has {} columns, expected 9",
                row, col
            )));
        }
    }

    Ok(board)
}

/// 生成 FEN 字符串，`turn` 为 None 时只输出棋盘部分
pub fn board_to_fen(board: &Board, turn: Option<Side>) -> String {
    let mut rows = Vec::with_capacity(10);

    for row in 0..10 {
        let mut row_str = String::new();
        let mut empty_count = 0;

        for col in 0..9 {
            match board.get_piece(Position::new(row, col)) {
                Some(piece) => {
                    if empty_count > 0 {
                        row_str.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row_str.push(piece.to_fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            row_str.push_str(&empty_count.to_string());
        }
        rows.push(row_str);
    }

    let board_str = rows.join("/");
    match turn {
        Some(side) => format!("{} {}", board_str, side.to_fen_char()),
        None => board_str,
    }
}

/// 从请求网格构建棋盘：必须是 10 行，每行 9 格
pub fn board_from_rows(rows: &[Vec<Option<String>>]) -> Result<Board> {
    if rows.len() != 10 {
        return Err(EngineError::InvalidBoard(format!(
            "expected 10 rows, got {}",
            rows.len()
        )));
    }

    let mut board = Board::empty();
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != 9 {
            return Err(EngineError::InvalidBoard(format!(
                "row {} has {} cells, expected 9",
                row,
                cells.len()
            )));
        }
        for (col, cell) in cells.iter().enumerate() {
            // 空字符串与 null 等价
            let piece = match cell.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(code) => Some(parse_piece_code(code)?),
            };
            board.set_piece(Position::new(row as i8, col as i8), piece);
        }
    }

    Ok(board)
}

/// 转换为请求网格（棋子使用汉字编码）
pub fn board_to_rows(board: &Board) -> Vec<Vec<Option<String>>> {
    (0..10)
        .map(|row| {
            (0..9)
                .map(|col| {
                    board
                        .get_piece(Position::new(row, col))
                        .map(|p| p.glyph().to_string())
                })
                .collect()
        })
        .collect()
}
