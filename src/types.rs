use serde::{Deserialize, Serialize};

pub const BOARD_WIDTH: usize = 8;

/// One of the two players. Black is the human, white the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Black,
    White,
    #[default]
    Empty,
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Returns `None` when either coordinate is off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        let width = BOARD_WIDTH as u8;
        (row < width && col < width).then_some(Self { row, col })
    }

    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_WIDTH) as u8,
            col: (idx % BOARD_WIDTH) as u8,
        }
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_WIDTH + self.col as usize
    }
}

/// Board notation with rows counted from 1, e.g. `d3` for row 2, column 3.
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

/// Whose turn it is, as seen by either end of the transport.
///
/// `Waiting` only exists on the presentation side: it marks an outstanding
/// request. The game loop never reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    Waiting,
    BlackToMove,
    WhiteToMove,
    GameOver,
}

pub type Grid = [[Cell; BOARD_WIDTH]; BOARD_WIDTH];

/// Everything the presentation layer needs to redraw, read from the engine
/// in one go after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub board: Grid,
    pub black_score: u8,
    pub white_score: u8,
    /// Black's legal moves. Empty unless `state` is `BlackToMove`.
    pub black_moves: Vec<Position>,
}

impl Snapshot {
    pub fn empty_count(&self) -> u8 {
        (BOARD_WIDTH * BOARD_WIDTH) as u8 - self.black_score - self.white_score
    }
}

/// Presentation controller to game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    NewGame,
    Move { row: u8, col: u8 },
}

/// Game loop to presentation controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Loaded,
    EngineUnavailable,
    Snapshot(Snapshot),
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    HumanWins { black: u8, white: u8 },
    ComputerWins { black: u8, white: u8 },
    Draw,
}

impl Outcome {
    pub fn from_scores(black: u8, white: u8) -> Self {
        if black > white {
            Outcome::HumanWins { black, white }
        } else if white > black {
            Outcome::ComputerWins { black, white }
        } else {
            Outcome::Draw
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::HumanWins { black, white } => write!(f, "Human wins {black}-{white}!"),
            Outcome::ComputerWins { black, white } => {
                write!(f, "Computer wins {white}-{black}!")
            }
            Outcome::Draw => write!(f, "Draw!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_rejects_off_board_coordinates() {
        assert_eq!(Position::new(7, 7), Some(Position { row: 7, col: 7 }));
        assert_eq!(Position::new(8, 0), None);
        assert_eq!(Position::new(0, 8), None);
    }

    #[test]
    fn position_index_round_trips_through_row_major_order() {
        let pos = Position { row: 2, col: 3 };
        assert_eq!(pos.index(), 19);
        assert_eq!(Position::from_index(19), pos);
    }

    #[test]
    fn position_notation_counts_rows_from_one() {
        assert_eq!(Position { row: 2, col: 3 }.to_string(), "d3");
        assert_eq!(Position { row: 7, col: 0 }.to_string(), "a8");
    }

    #[test]
    fn outcome_compares_scores() {
        assert_eq!(
            Outcome::from_scores(40, 24),
            Outcome::HumanWins { black: 40, white: 24 }
        );
        assert_eq!(
            Outcome::from_scores(10, 54),
            Outcome::ComputerWins { black: 10, white: 54 }
        );
        assert_eq!(Outcome::from_scores(32, 32), Outcome::Draw);
    }

    #[test]
    fn outcome_text_puts_winner_score_first() {
        assert_eq!(Outcome::from_scores(40, 24).to_string(), "Human wins 40-24!");
        assert_eq!(Outcome::from_scores(10, 54).to_string(), "Computer wins 54-10!");
        assert_eq!(Outcome::from_scores(0, 0).to_string(), "Draw!");
    }

    #[test]
    fn requests_use_tagged_wire_format() {
        let json = serde_json::to_string(&Request::Move { row: 2, col: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"move","row":2,"col":3}"#);

        let parsed: Request = serde_json::from_str(r#"{"type":"new_game"}"#).unwrap();
        assert_eq!(parsed, Request::NewGame);
    }
}
