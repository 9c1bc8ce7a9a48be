//! 象棋测试局面库
//!
//! 提供命名的 FEN 测试局面，方便测试、调试和基准测试
//!
//! 第 0 行是黑方底线，第 9 行是红方底线，大写字母为红方。

/// 初始局面
pub const START: &str = crate::fen::INITIAL_FEN;

/// 中局：黑马跳出，红方架中炮、跳右马
pub const MID_1: &str = "r1eakaehr/9/1ch4c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C2H1/9/RHEAKAE1R b";

/// 黑车可以白吃红车 (5,0) -> (5,8)
pub const FREE_CHARIOT: &str = "4k4/9/9/9/9/r7R/9/9/9/4K4 b";

/// 红车沿空列直达黑将
pub const CHARIOT_RAY: &str = "4k4/9/9/9/9/4R4/9/9/9/3K5 r";

/// 红炮 (7,1) 隔黑卒 (4,1) 打黑马 (1,1)
pub const CANNON_SCREEN: &str = "4k4/1h7/9/9/1p7/9/9/1C7/9/4K4 r";

/// 红马 (5,4) 被 (4,4) 的黑卒蹩马腿
pub const HORSE_BLOCKED: &str = "4k4/9/9/9/4p4/4H4/9/9/9/4K4 r";

/// 红相 (9,2) 的象眼 (8,3) 被己方仕塞住
pub const ELEPHANT_EYE: &str = "4k4/9/9/9/9/9/9/9/3A5/2E1K4 r";

/// 黑方只有一个卒，唯一走法是 (3,0) -> (4,0)
pub const LONE_SOLDIER: &str = "9/9/9/p8/9/9/9/9/9/4K4 b";

/// 黑方无子
pub const NO_BLACK: &str = "9/9/9/9/9/9/9/9/9/4K4 b";

/// 所有命名局面
pub const ALL: &[(&str, &str)] = &[
    ("START", START),
    ("MID_1", MID_1),
    ("FREE_CHARIOT", FREE_CHARIOT),
    ("CHARIOT_RAY", CHARIOT_RAY),
    ("CANNON_SCREEN", CANNON_SCREEN),
    ("HORSE_BLOCKED", HORSE_BLOCKED),
    ("ELEPHANT_EYE", ELEPHANT_EYE),
    ("LONE_SOLDIER", LONE_SOLDIER),
    ("NO_BLACK", NO_BLACK),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::fen::{board_to_fen, parse_fen};
    use crate::types::{Position, Side};

    #[test]
    fn test_all_positions_parse() {
        for (name, fen) in ALL {
            let state = parse_fen(fen).unwrap_or_else(|e| panic!("{}: {}", name, e));
            assert_eq!(board_to_fen(&state.board, Some(state.turn)), *fen, "{}", name);
        }
    }

    #[test]
    fn test_chariot_ray_reaches_general() {
        let board = Board::from_fen(CHARIOT_RAY).unwrap();
        let targets: Vec<Position> = board
            .legal_moves_from(Position::new(5, 4))
            .iter()
            .map(|m| m.to)
            .collect();
        assert!(targets.contains(&Position::new(0, 4)));
    }

    #[test]
    fn test_horse_blocked_moves() {
        let board = Board::from_fen(HORSE_BLOCKED).unwrap();
        let targets: Vec<Position> = board
            .legal_moves_from(Position::new(5, 4))
            .iter()
            .map(|m| m.to)
            .collect();
        // 向上的两个日字被蹩腿，其余六个可走
        assert_eq!(targets.len(), 6);
        assert!(!targets.contains(&Position::new(3, 3)));
        assert!(!targets.contains(&Position::new(3, 5)));
    }

    #[test]
    fn test_no_black_has_no_moves() {
        let board = Board::from_fen(NO_BLACK).unwrap();
        assert!(board.all_moves(Side::Black).is_empty());
        assert!(!board.all_moves(Side::Red).is_empty());
    }
}
