use rand::Rng;
use tracing::{debug, warn};

use crate::ai::Searcher;
use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::types::{Cell, Position, Side};

/// Board rules and move selection, answered synchronously. The game loop
/// never looks at a board any other way.
pub trait Engine {
    /// Puts the standard starting position back on the board.
    fn reset(&mut self);

    /// Off-board coordinates read as [`Cell::Empty`].
    fn cell_state(&self, row: u8, col: u8) -> Cell;

    fn score(&self, side: Side) -> u8;

    fn has_legal_move(&self, side: Side) -> bool;

    /// Off-board coordinates are never legal.
    fn is_legal_move(&self, side: Side, row: u8, col: u8) -> bool;

    /// Callers must check [`Engine::is_legal_move`] first.
    fn apply_move(&mut self, side: Side, row: u8, col: u8);

    /// The move `side` should play, or `None` when it has no legal move.
    fn compute_move(&self, side: Side) -> Option<Position>;
}

/// Engine backed by a [`Board`] and an alpha-beta [`Searcher`].
#[derive(Debug, Clone)]
pub struct BitboardEngine {
    board: Board,
    config: EngineConfig,
}

impl BitboardEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::from_board(Board::new(), config)
    }

    /// Starts from an arbitrary position. `reset` still returns to the
    /// standard opening.
    pub fn from_board(board: Board, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { board, config })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// A uniformly chosen legal move, used to vary self-play openings.
    pub fn random_move<R: Rng>(&self, side: Side, rng: &mut R) -> Option<Position> {
        let legal = self.board.legal_moves(side);
        let count = legal.count_ones();
        if count == 0 {
            return None;
        }

        let mut rest = legal;
        for _ in 0..rng.gen_range(0..count) {
            rest &= rest - 1;
        }
        Some(Position::from_index(rest.trailing_zeros() as usize))
    }
}

impl Engine for BitboardEngine {
    fn reset(&mut self) {
        self.board = Board::new();
    }

    fn cell_state(&self, row: u8, col: u8) -> Cell {
        Position::new(row, col).map_or(Cell::Empty, |pos| self.board.cell(pos))
    }

    fn score(&self, side: Side) -> u8 {
        self.board.count_of(side)
    }

    fn has_legal_move(&self, side: Side) -> bool {
        self.board.legal_moves(side) != 0
    }

    fn is_legal_move(&self, side: Side, row: u8, col: u8) -> bool {
        Position::new(row, col).is_some_and(|pos| self.board.is_legal(side, pos))
    }

    fn apply_move(&mut self, side: Side, row: u8, col: u8) {
        let flipped = Position::new(row, col).map_or(0, |pos| self.board.place(pos.index(), side));
        if flipped == 0 {
            warn!(?side, row, col, "ignoring illegal move");
        }
    }

    fn compute_move(&self, side: Side) -> Option<Position> {
        let mut searcher = Searcher::new(self.config.level, self.config.timeout());
        let mv = searcher.search(&self.board, side).map(Position::from_index);
        debug!(?side, ?mv, timed_out = searcher.timed_out(), "computed move");
        mv
    }
}
