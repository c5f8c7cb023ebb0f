use std::fmt;
use std::str::FromStr;

use crate::error::ParseBoardError;
use crate::types::{BOARD_WIDTH, Cell, Grid, Position, Side};

const NUM_SQUARES: usize = BOARD_WIDTH * BOARD_WIDTH;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const FILES: &str = "abcdefgh";

/// Othello board state represented by two bitboards, bit `row * 8 + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// Builds a board from raw masks. A square set in both masks is black.
    pub fn from_bitboards(black: u64, white: u64) -> Self {
        Self {
            black,
            white: white & !black,
        }
    }

    pub fn cell(&self, pos: Position) -> Cell {
        let square = bit(pos.index());
        if self.black & square != 0 {
            Cell::Black
        } else if self.white & square != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    pub fn grid(&self) -> Grid {
        let mut grid = Grid::default();
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.cell(Position::from_index(row * BOARD_WIDTH + col));
            }
        }
        grid
    }

    /// Returns the legal move mask for `side`.
    pub fn legal_moves(&self, side: Side) -> u64 {
        let (me, opp) = self.split(side);
        let empty = !(me | opp);

        (0..NUM_SQUARES)
            .map(bit)
            .filter(|square| empty & square != 0)
            .filter(|square| Self::flips_for(square.trailing_zeros() as usize, me, opp) != 0)
            .fold(0, |legal, square| legal | square)
    }

    pub fn is_legal(&self, side: Side, pos: Position) -> bool {
        self.legal_moves(side) & bit(pos.index()) != 0
    }

    /// Places a disk for `side` and flips captured disks.
    /// Returns the flipped mask; 0 means the move was illegal and nothing changed.
    pub fn place(&mut self, pos: usize, side: Side) -> u64 {
        let (me, opp) = self.split(side);
        let flips = Self::flips_for(pos, me, opp);
        if flips == 0 {
            return 0;
        }

        let me = me | bit(pos) | flips;
        let opp = opp & !flips;
        match side {
            Side::Black => (self.black, self.white) = (me, opp),
            Side::White => (self.white, self.black) = (me, opp),
        }

        flips
    }

    pub fn count_of(&self, side: Side) -> u8 {
        self.split(side).0.count_ones() as u8
    }

    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - (self.black | self.white).count_ones() as u8
    }

    fn split(&self, side: Side) -> (u64, u64) {
        match side {
            Side::Black => (self.black, self.white),
            Side::White => (self.white, self.black),
        }
    }

    fn flips_for(pos: usize, me: u64, opp: u64) -> u64 {
        if pos >= NUM_SQUARES || (me | opp) & bit(pos) != 0 {
            return 0;
        }

        let row = (pos / BOARD_WIDTH) as i32;
        let col = (pos % BOARD_WIDTH) as i32;

        DIRECTIONS.iter().fold(0u64, |flips, &(dr, dc)| {
            let mut line = 0u64;
            let (mut r, mut c) = (row + dr, col + dc);

            while let Some(square) = square_at(r, c) {
                if opp & square != 0 {
                    line |= square;
                } else if me & square != 0 {
                    return flips | line;
                } else {
                    break;
                }
                r += dr;
                c += dc;
            }

            flips
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " {FILES} ")?;
        for (row, cells) in self.grid().iter().enumerate() {
            write!(f, "{}", row + 1)?;
            for cell in cells {
                let ch = match cell {
                    Cell::Black => 'x',
                    Cell::White => 'o',
                    Cell::Empty => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f, "{}", row + 1)?;
        }
        writeln!(f, " {FILES} ")
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        if lines.len() != BOARD_WIDTH + 2 {
            return Err(ParseBoardError::LineCount { found: lines.len() });
        }

        for line in [0, BOARD_WIDTH + 1] {
            if lines[line].trim_end() != format!(" {FILES}") {
                return Err(ParseBoardError::Frame { line });
            }
        }

        let (mut black, mut white) = (0u64, 0u64);
        for row in 0..BOARD_WIDTH {
            let line = row + 1;
            let chars: Vec<char> = lines[line].chars().collect();
            let label = char::from_digit(line as u32, 10);
            if chars.len() != BOARD_WIDTH + 2
                || chars.first().copied() != label
                || chars.last().copied() != label
            {
                return Err(ParseBoardError::Frame { line });
            }

            for (col, &ch) in chars[1..=BOARD_WIDTH].iter().enumerate() {
                let square = bit(row * BOARD_WIDTH + col);
                match ch {
                    'x' => black |= square,
                    'o' => white |= square,
                    '.' => {}
                    _ => return Err(ParseBoardError::Cell { line, col, ch }),
                }
            }
        }

        Ok(Self { black, white })
    }
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn square_at(row: i32, col: i32) -> Option<u64> {
    let width = BOARD_WIDTH as i32;
    ((0..width).contains(&row) && (0..width).contains(&col))
        .then(|| bit((row * width + col) as usize))
}
