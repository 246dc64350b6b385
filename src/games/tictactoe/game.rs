//! Tic-tac-toe board, marks and squares.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ranges::{IntervalSet, Step};
use crate::rules::{Game, Score, DRAW, LOSS};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Contents of one square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Nobody has played here.
    #[default]
    Empty,
    /// First player's mark.
    X,
    /// Second player's mark.
    O,
}

impl Mark {
    /// The other player's mark. `Empty` stays `Empty`.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        };
        write!(f, "{symbol}")
    }
}

/// A board square, 0-8 in row-major order. This is the game's action type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square(pub u8);

impl Square {
    /// Every square, in order.
    pub const ALL: [Square; 9] = [
        Square(0),
        Square(1),
        Square(2),
        Square(3),
        Square(4),
        Square(5),
        Square(6),
        Square(7),
        Square(8),
    ];

    /// Square at `row`, `col` (both 0-2).
    #[must_use]
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 3 && col < 3).then(|| Self(row * 3 + col))
    }

    #[must_use]
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    #[must_use]
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    /// Index into the board array.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl Step for Square {
    fn successor(&self) -> Option<Self> {
        self.0.checked_add(1).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// A tic-tac-toe position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TicTacToe {
    board: [Mark; 9],
}

impl TicTacToe {
    /// Empty board, X to move.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Play `moves` in order from the empty board.
    ///
    /// Returns `None` if any move is illegal.
    #[must_use]
    pub fn from_moves(moves: &[Square]) -> Option<Self> {
        let mut board = Self::new();
        moves
            .iter()
            .all(|&square| board.apply(square))
            .then_some(board)
    }

    /// Mark on `square`, or `None` if the square is off the board.
    #[must_use]
    pub fn mark(&self, square: Square) -> Option<Mark> {
        self.board.get(square.index()).copied()
    }

    /// The mark that completed a line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.board[a];
            (mark != Mark::Empty && mark == self.board[b] && mark == self.board[c]).then_some(mark)
        })
    }

    /// Mark of the player to move.
    #[must_use]
    pub fn to_move(&self) -> Mark {
        let count = |m: Mark| self.board.iter().filter(|&&square| square == m).count();
        if count(Mark::X) > count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }

    /// Check if every square is taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        !self.board.contains(&Mark::Empty)
    }
}

impl Game for TicTacToe {
    type Action = Square;

    fn legal_actions(&self) -> IntervalSet<Square> {
        let mut actions = IntervalSet::new();
        if self.winner().is_some() {
            return actions;
        }

        let mut run: Option<u8> = None;
        for square in Square::ALL {
            match (self.board[square.index()], run) {
                (Mark::Empty, None) => run = Some(square.0),
                (Mark::Empty, Some(_)) => {}
                (_, Some(begin)) => {
                    actions.insert(Square(begin), square);
                    run = None;
                }
                (_, None) => {}
            }
        }
        if let Some(begin) = run {
            actions.insert(Square(begin), Square(9));
        }
        actions
    }

    fn apply(&mut self, square: Square) -> bool {
        if self.winner().is_some() || self.mark(square) != Some(Mark::Empty) {
            return false;
        }
        self.board[square.index()] = self.to_move();
        true
    }

    fn terminal_score(&self) -> Score {
        // A completed line always belongs to the player who just moved.
        if self.winner().is_some() {
            LOSS
        } else {
            DRAW
        }
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, marks) in self.board.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "-+-+-")?;
            }
            write!(f, "{}|{}|{}", marks[0], marks[1], marks[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(moves: &[u8]) -> TicTacToe {
        let squares: Vec<_> = moves.iter().map(|&m| Square(m)).collect();
        TicTacToe::from_moves(&squares).unwrap()
    }

    #[test]
    fn test_new_board_offers_everything() {
        let game = TicTacToe::new();
        let actions = game.legal_actions();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions.count_values(), 9);
        assert_eq!(game.to_move(), Mark::X);
    }

    #[test]
    fn test_actions_are_runs_of_empty_squares() {
        let game = board(&[4, 0]);
        let ranges: Vec<_> = game.legal_actions().iter().collect();
        assert_eq!(ranges.len(), 2);
        assert_eq!((ranges[0].begin, ranges[0].end), (Square(1), Square(4)));
        assert_eq!((ranges[1].begin, ranges[1].end), (Square(5), Square(9)));
        assert_eq!(game.to_move(), Mark::X);
    }

    #[test]
    fn test_apply_rejects_occupied_and_off_board() {
        let mut game = board(&[4]);
        assert!(!game.apply(Square(4)));
        assert!(!game.apply(Square(9)));
        assert_eq!(game, board(&[4]));
    }

    #[test]
    fn test_win_ends_the_game() {
        // X takes the top row.
        let mut game = board(&[0, 3, 1, 4, 2]);
        assert_eq!(game.winner(), Some(Mark::X));
        assert!(game.is_terminal());
        assert_eq!(game.terminal_score(), LOSS);
        assert!(!game.apply(Square(8)));
    }

    #[test]
    fn test_full_board_is_a_draw() {
        // X O X / X O O / O X X
        let game = board(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert!(game.is_full());
        assert_eq!(game.winner(), None);
        assert!(game.is_terminal());
        assert_eq!(game.terminal_score(), DRAW);
    }

    #[test]
    fn test_square_coordinates() {
        let square = Square::new(2, 1).unwrap();
        assert_eq!(square, Square(7));
        assert_eq!((square.row(), square.col()), (2, 1));
        assert_eq!(Square::new(3, 0), None);
    }

    #[test]
    fn test_display_grid() {
        let game = board(&[0, 4]);
        assert_eq!(game.to_string(), "X|.|.\n-+-+-\n.|O|.\n-+-+-\n.|.|.");
    }
}
