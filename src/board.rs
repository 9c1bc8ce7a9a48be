//! 象棋棋盘与走法生成
//!
//! 使用 90 格数组存储棋子。走法生成分两步：按棋子类型生成候选落点，
//! 再经合法性过滤（不能吃己方棋子）生成走法。不检查将军与飞将。

use crate::error::Result;
use crate::fen::parse_fen;
use crate::types::{Move, Piece, PieceKind, Position, Side};

/// 上、下、左、右
const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 象的落点偏移，象眼在偏移的一半处
const ELEPHANT_OFFSETS: [(i8, i8); 4] = [(-2, -2), (-2, 2), (2, -2), (2, 2)];

/// 马的落点偏移与对应的马腿
const HORSE_OFFSETS: [((i8, i8), (i8, i8)); 8] = [
    ((-2, -1), (-1, 0)),
    ((-2, 1), (-1, 0)),
    ((-1, -2), (0, -1)),
    ((-1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((1, 2), (0, 1)),
    ((2, -1), (1, 0)),
    ((2, 1), (1, 0)),
];

/// 象棋棋盘（10 行 x 9 列）
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 90],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({})", crate::fen::board_to_fen(self, None))
    }
}

impl Board {
    /// 空棋盘
    pub fn empty() -> Board {
        Board {
            squares: [None; 90],
        }
    }

    /// 标准开局
    pub fn initial() -> Board {
        use PieceKind::*;
        let back_rank = [
            Chariot, Horse, Elephant, Advisor, General, Advisor, Elephant, Horse, Chariot,
        ];

        let mut board = Board::empty();
        for (col, kind) in back_rank.into_iter().enumerate() {
            let col = col as i8;
            board.set_piece(Position::new(0, col), Some(Piece::black(kind)));
            board.set_piece(Position::new(9, col), Some(Piece::red(kind)));
        }
        for col in [1, 7] {
            board.set_piece(Position::new(2, col), Some(Piece::black(Cannon)));
            board.set_piece(Position::new(7, col), Some(Piece::red(Cannon)));
        }
        for col in [0, 2, 4, 6, 8] {
            board.set_piece(Position::new(3, col), Some(Piece::black(Soldier)));
            board.set_piece(Position::new(6, col), Some(Piece::red(Soldier)));
        }
        board
    }

    /// 从 FEN 字符串创建棋盘（忽略回合字段）
    pub fn from_fen(fen: &str) -> Result<Board> {
        Ok(parse_fen(fen)?.board)
    }

    /// 获取某位置的棋子，越界返回 None
    #[inline]
    pub fn get_piece(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        self.squares[pos.to_index()]
    }

    /// 放置或清除棋子，返回原来的棋子；越界位置不做任何修改
    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        std::mem::replace(&mut self.squares[pos.to_index()], piece)
    }

    #[inline]
    pub fn has_piece(&self, pos: Position) -> bool {
        self.get_piece(pos).is_some()
    }

    /// 按行优先顺序遍历棋子，`side` 为 None 时返回双方棋子
    pub fn pieces(&self, side: Option<Side>) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (Position::from_index(i), p)))
            .filter(move |(_, p)| side.map_or(true, |s| p.side == s))
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|p| p.is_some()).count()
    }

    /// 执行走棋，返回被吃的棋子
    pub fn make_move(&mut self, mv: &Move) -> Option<Piece> {
        let piece = self.set_piece(mv.from, None);
        self.set_piece(mv.to, piece)
    }

    /// 在副本上执行走棋，原棋盘不变
    pub fn apply_move(&self, mv: &Move) -> Board {
        let mut next = self.clone();
        next.make_move(mv);
        next
    }

    /// 获取某位置棋子的候选落点（未经合法性过滤）
    pub fn candidate_moves(&self, pos: Position) -> Vec<Position> {
        let piece = match self.get_piece(pos) {
            Some(p) => p,
            None => return Vec::new(),
        };

        match piece.kind {
            PieceKind::General => self.general_moves(pos, piece.side),
            PieceKind::Advisor => self.advisor_moves(pos, piece.side),
            PieceKind::Elephant => self.elephant_moves(pos, piece.side),
            PieceKind::Horse => self.horse_moves(pos),
            PieceKind::Chariot => self.chariot_moves(pos),
            PieceKind::Cannon => self.cannon_moves(pos),
            PieceKind::Soldier => self.soldier_moves(pos, piece.side),
        }
    }

    /// 合法性过滤：落点越界、起点无子、或落点有己方棋子时不合法
    pub fn is_legal(&self, from: Position, to: Position) -> bool {
        if !to.is_valid() {
            return false;
        }
        let mover = match self.get_piece(from) {
            Some(p) => p,
            None => return false,
        };
        match self.get_piece(to) {
            None => true,
            Some(target) => target.side != mover.side,
        }
    }

    /// 某个棋子的全部合法走法
    pub fn legal_moves_from(&self, pos: Position) -> Vec<Move> {
        let piece = match self.get_piece(pos) {
            Some(p) => p,
            None => return Vec::new(),
        };
        self.candidate_moves(pos)
            .into_iter()
            .filter(|&to| self.is_legal(pos, to))
            .map(|to| Move::new(pos, to, piece))
            .collect()
    }

    /// 某方的全部合法走法（行优先遍历棋子，顺序稳定）
    pub fn all_moves(&self, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (pos, _) in self.pieces(Some(side)) {
            moves.extend(self.legal_moves_from(pos));
        }
        moves
    }

    fn general_moves(&self, pos: Position, side: Side) -> Vec<Position> {
        ORTHOGONAL
            .iter()
            .map(|&(dr, dc)| pos.offset(dr, dc))
            .filter(|p| p.is_in_palace(side))
            .collect()
    }

    fn advisor_moves(&self, pos: Position, side: Side) -> Vec<Position> {
        DIAGONAL
            .iter()
            .map(|&(dr, dc)| pos.offset(dr, dc))
            .filter(|p| p.is_in_palace(side))
            .collect()
    }

    fn elephant_moves(&self, pos: Position, side: Side) -> Vec<Position> {
        let mut moves = Vec::with_capacity(4);

        for (dr, dc) in ELEPHANT_OFFSETS {
            let new_pos = pos.offset(dr, dc);
            if !new_pos.is_valid() {
                continue;
            }
            // 象不能过河
            if !new_pos.is_on_own_side(side) {
                continue;
            }
            // 塞象眼
            if self.has_piece(pos.offset(dr / 2, dc / 2)) {
                continue;
            }
            moves.push(new_pos);
        }

        moves
    }

    fn horse_moves(&self, pos: Position) -> Vec<Position> {
        let mut moves = Vec::with_capacity(8);

        for ((dr, dc), (lr, lc)) in HORSE_OFFSETS {
            let new_pos = pos.offset(dr, dc);
            if !new_pos.is_valid() {
                continue;
            }
            // 蹩马腿只挡住这一个方向
            if self.has_piece(pos.offset(lr, lc)) {
                continue;
            }
            moves.push(new_pos);
        }

        moves
    }

    fn chariot_moves(&self, pos: Position) -> Vec<Position> {
        let mut moves = Vec::with_capacity(17);

        for (dr, dc) in ORTHOGONAL {
            let mut new_pos = pos.offset(dr, dc);
            while new_pos.is_valid() {
                moves.push(new_pos);
                if self.has_piece(new_pos) {
                    break;
                }
                new_pos = new_pos.offset(dr, dc);
            }
        }

        moves
    }

    fn cannon_moves(&self, pos: Position) -> Vec<Position> {
        let mut moves = Vec::with_capacity(17);

        for (dr, dc) in ORTHOGONAL {
            let mut new_pos = pos.offset(dr, dc);
            let mut found_screen = false;

            while new_pos.is_valid() {
                match (self.has_piece(new_pos), found_screen) {
                    (false, false) => moves.push(new_pos),
                    (false, true) => {}
                    (true, false) => found_screen = true,
                    (true, true) => {
                        // 炮打隔子
                        moves.push(new_pos);
                        break;
                    }
                }
                new_pos = new_pos.offset(dr, dc);
            }
        }

        moves
    }

    fn soldier_moves(&self, pos: Position, side: Side) -> Vec<Position> {
        let mut moves = Vec::with_capacity(3);

        let forward = match side {
            Side::Red => -1,
            Side::Black => 1,
        };
        let forward_pos = pos.offset(forward, 0);
        if forward_pos.is_valid() {
            moves.push(forward_pos);
        }

        // 过河后可以左右走
        if !pos.is_on_own_side(side) {
            for dc in [-1, 1] {
                let side_pos = pos.offset(0, dc);
                if side_pos.is_valid() {
                    moves.push(side_pos);
                }
            }
        }

        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind::*;

    fn targets(board: &Board, pos: Position) -> Vec<Position> {
        board.legal_moves_from(pos).iter().map(|m| m.to).collect()
    }

    #[test]
    fn test_initial_board() {
        let board = Board::initial();
        assert_eq!(board.pieces(Some(Side::Red)).count(), 16);
        assert_eq!(board.pieces(Some(Side::Black)).count(), 16);
        assert_eq!(board.get_piece(Position::new(9, 4)), Some(Piece::red(General)));
        assert_eq!(board.get_piece(Position::new(2, 7)), Some(Piece::black(Cannon)));
    }

    #[test]
    fn test_legal_moves_initial() {
        let board = Board::initial();
        assert_eq!(board.all_moves(Side::Red).len(), 44);
        assert_eq!(board.all_moves(Side::Black).len(), 44);
    }

    #[test]
    fn test_soldier_before_river() {
        let board = Board::initial();
        assert_eq!(targets(&board, Position::new(6, 0)), vec![Position::new(5, 0)]);
        assert_eq!(targets(&board, Position::new(3, 4)), vec![Position::new(4, 4)]);
    }

    #[test]
    fn test_soldier_after_river() {
        let mut board = Board::empty();
        board.set_piece(Position::new(4, 0), Some(Piece::red(Soldier)));
        board.set_piece(Position::new(5, 4), Some(Piece::black(Soldier)));
        // 红兵过河后在左边界：前、右
        assert_eq!(
            targets(&board, Position::new(4, 0)),
            vec![Position::new(3, 0), Position::new(4, 1)]
        );
        assert_eq!(
            targets(&board, Position::new(5, 4)),
            vec![Position::new(6, 4), Position::new(5, 3), Position::new(5, 5)]
        );
    }

    #[test]
    fn test_soldier_on_last_rank() {
        let mut board = Board::empty();
        board.set_piece(Position::new(0, 4), Some(Piece::red(Soldier)));
        assert_eq!(
            targets(&board, Position::new(0, 4)),
            vec![Position::new(0, 3), Position::new(0, 5)]
        );
    }

    #[test]
    fn test_chariot_captures_general() {
        let mut board = Board::empty();
        board.set_piece(Position::new(0, 4), Some(Piece::black(General)));
        board.set_piece(Position::new(0, 0), Some(Piece::red(Chariot)));

        let rank: Vec<Position> = targets(&board, Position::new(0, 0))
            .into_iter()
            .filter(|p| p.row == 0)
            .collect();
        assert_eq!(
            rank,
            vec![
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(0, 3),
                Position::new(0, 4),
            ]
        );
    }

    #[test]
    fn test_chariot_blocked_by_own_piece() {
        let mut board = Board::empty();
        board.set_piece(Position::new(5, 0), Some(Piece::red(Chariot)));
        board.set_piece(Position::new(5, 2), Some(Piece::red(Soldier)));
        let right: Vec<Position> = targets(&board, Position::new(5, 0))
            .into_iter()
            .filter(|p| p.row == 5)
            .collect();
        assert_eq!(right, vec![Position::new(5, 1)]);
    }

    #[test]
    fn test_cannon_needs_screen() {
        let mut board = Board::empty();
        board.set_piece(Position::new(5, 0), Some(Piece::red(Cannon)));
        board.set_piece(Position::new(5, 2), Some(Piece::black(Horse)));
        board.set_piece(Position::new(5, 5), Some(Piece::black(Chariot)));
        board.set_piece(Position::new(5, 7), Some(Piece::black(Soldier)));

        let right: Vec<Position> = targets(&board, Position::new(5, 0))
            .into_iter()
            .filter(|p| p.row == 5)
            .collect();
        // 炮架前的空格可走，炮架本身不可吃，炮架后第一个子可吃
        assert_eq!(right, vec![Position::new(5, 1), Position::new(5, 5)]);
    }

    #[test]
    fn test_cannon_cannot_capture_own_piece_over_screen() {
        let mut board = Board::empty();
        board.set_piece(Position::new(5, 0), Some(Piece::red(Cannon)));
        board.set_piece(Position::new(5, 2), Some(Piece::black(Horse)));
        board.set_piece(Position::new(5, 4), Some(Piece::red(Soldier)));

        assert!(board.candidate_moves(Position::new(5, 0)).contains(&Position::new(5, 4)));
        assert!(!board.is_legal(Position::new(5, 0), Position::new(5, 4)));
    }

    #[test]
    fn test_horse_leg_blocks_single_direction() {
        let mut board = Board::empty();
        board.set_piece(Position::new(5, 4), Some(Piece::red(Horse)));
        assert_eq!(targets(&board, Position::new(5, 4)).len(), 8);

        // 上方马腿被塞，只挡住向上的两个落点
        board.set_piece(Position::new(4, 4), Some(Piece::black(Soldier)));
        let moves = targets(&board, Position::new(5, 4));
        assert_eq!(moves.len(), 6);
        assert!(!moves.contains(&Position::new(3, 3)));
        assert!(!moves.contains(&Position::new(3, 5)));
        assert!(moves.contains(&Position::new(4, 2)));
    }

    #[test]
    fn test_elephant_eye_and_river() {
        let mut board = Board::empty();
        board.set_piece(Position::new(5, 2), Some(Piece::red(Elephant)));
        // 红相在河边，只能往己方走
        assert_eq!(
            targets(&board, Position::new(5, 2)),
            vec![Position::new(7, 0), Position::new(7, 4)]
        );

        board.set_piece(Position::new(6, 3), Some(Piece::black(Soldier)));
        assert_eq!(targets(&board, Position::new(5, 2)), vec![Position::new(7, 0)]);
    }

    #[test]
    fn test_general_and_advisor_stay_in_palace() {
        let mut board = Board::empty();
        board.set_piece(Position::new(7, 3), Some(Piece::red(General)));
        board.set_piece(Position::new(0, 3), Some(Piece::black(Advisor)));

        assert_eq!(
            targets(&board, Position::new(7, 3)),
            vec![Position::new(8, 3), Position::new(7, 4)]
        );
        assert_eq!(targets(&board, Position::new(0, 3)), vec![Position::new(1, 4)]);
    }

    #[test]
    fn test_legality_filter() {
        let board = Board::initial();
        // 车不能吃己方兵
        assert!(!board.is_legal(Position::new(9, 0), Position::new(6, 0)));
        assert!(board.is_legal(Position::new(9, 0), Position::new(8, 0)));
        // 起点无子
        assert!(!board.is_legal(Position::new(5, 5), Position::new(4, 5)));
        assert!(!board.is_legal(Position::new(9, 0), Position::new(10, 0)));
    }

    #[test]
    fn test_apply_move_leaves_original_untouched() {
        let board = Board::initial();
        let mv = board.legal_moves_from(Position::new(6, 0))[0];
        let next = board.apply_move(&mv);

        assert_eq!(board.get_piece(Position::new(6, 0)), Some(Piece::red(Soldier)));
        assert_eq!(next.get_piece(Position::new(6, 0)), None);
        assert_eq!(next.get_piece(Position::new(5, 0)), Some(Piece::red(Soldier)));
    }

    #[test]
    fn test_make_move_returns_captured() {
        let mut board = Board::empty();
        board.set_piece(Position::new(0, 0), Some(Piece::red(Chariot)));
        board.set_piece(Position::new(0, 4), Some(Piece::black(General)));
        let mv = Move::new(Position::new(0, 0), Position::new(0, 4), Piece::red(Chariot));
        assert_eq!(board.make_move(&mv), Some(Piece::black(General)));
        assert_eq!(board.piece_count(), 1);
    }
}
