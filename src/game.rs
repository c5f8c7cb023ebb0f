use tracing::{debug, error, info, warn};

use crate::engine::Engine;
use crate::types::{BOARD_WIDTH, GameState, Grid, Position, Request, Side, Snapshot};

/// Owns the engine and the turn state. Every request runs to completion,
/// including any run of computer moves forced by black passing, and each
/// step is reported through `emit`.
pub struct GameLoop<E> {
    engine: E,
    state: GameState,
}

impl<E: Engine> GameLoop<E> {
    /// Takes ownership of `engine` in whatever position it is in. Black is
    /// to move if it can, otherwise the game is already over.
    pub fn new(engine: E) -> Self {
        let state = if engine.has_legal_move(Side::Black) {
            GameState::BlackToMove
        } else {
            GameState::GameOver
        };
        Self { engine, state }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn handle(&mut self, request: Request, emit: &mut impl FnMut(Snapshot)) {
        match request {
            Request::NewGame => self.new_game(emit),
            Request::Move { row, col } => self.human_move(row, col, emit),
        }
    }

    pub fn new_game(&mut self, emit: &mut impl FnMut(Snapshot)) {
        info!("new game");
        self.engine.reset();
        self.state = GameState::BlackToMove;
        emit(self.snapshot());
    }

    /// Plays black's move at `(row, col)` and then as many white moves as
    /// the pass rule demands. Out-of-turn, off-board or illegal moves only
    /// re-send the current snapshot.
    pub fn human_move(&mut self, row: u8, col: u8, emit: &mut impl FnMut(Snapshot)) {
        if self.state != GameState::BlackToMove
            || !self.engine.is_legal_move(Side::Black, row, col)
        {
            warn!(state = ?self.state, row, col, "rejected move, echoing snapshot");
            emit(self.snapshot());
            return;
        }

        self.engine.apply_move(Side::Black, row, col);
        debug!(row, col, "black moved");

        if self.engine.has_legal_move(Side::White) {
            self.state = GameState::WhiteToMove;
            self.play_white(emit);
        } else {
            debug!("white passes");
        }

        self.state = if self.engine.has_legal_move(Side::Black) {
            GameState::BlackToMove
        } else {
            GameState::GameOver
        };
        debug!(state = ?self.state, "turn resolved");
        emit(self.snapshot());
    }

    /// White keeps moving while black is stuck and white is not. Each move
    /// must fill a square, so this ends within 64 iterations; an engine
    /// whose moves do not fill one ends the run early.
    fn play_white(&mut self, emit: &mut impl FnMut(Snapshot)) {
        loop {
            emit(self.snapshot());

            let Some(mv) = self.white_move() else {
                error!("engine reported a white move but none is legal");
                break;
            };

            let empty_before = self.empty_count();
            self.engine.apply_move(Side::White, mv.row, mv.col);
            debug!(row = mv.row, col = mv.col, "white moved");

            if self.empty_count() >= empty_before {
                error!(row = mv.row, col = mv.col, "engine move did not fill a square");
                break;
            }
            if self.engine.has_legal_move(Side::Black) || !self.engine.has_legal_move(Side::White) {
                break;
            }
            debug!("black passes");
        }
    }

    /// The engine's choice, or the first legal square when that choice is
    /// missing or not playable.
    fn white_move(&self) -> Option<Position> {
        match self.engine.compute_move(Side::White) {
            Some(mv) if self.engine.is_legal_move(Side::White, mv.row, mv.col) => Some(mv),
            choice => {
                error!(?choice, "unplayable white move, taking first legal square");
                (0..BOARD_WIDTH * BOARD_WIDTH)
                    .map(Position::from_index)
                    .find(|p| self.engine.is_legal_move(Side::White, p.row, p.col))
            }
        }
    }

    /// Reads board, scores and black's options in one pass, with no engine
    /// mutation in between.
    pub fn snapshot(&self) -> Snapshot {
        let mut board = Grid::default();
        let mut black_moves = Vec::new();

        for (row, cells) in board.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                let (row, col) = (row as u8, col as u8);
                *cell = self.engine.cell_state(row, col);
                if self.state == GameState::BlackToMove
                    && self.engine.is_legal_move(Side::Black, row, col)
                {
                    black_moves.push(Position { row, col });
                }
            }
        }

        Snapshot {
            state: self.state,
            board,
            black_score: self.engine.score(Side::Black),
            white_score: self.engine.score(Side::White),
            black_moves,
        }
    }

    fn empty_count(&self) -> usize {
        BOARD_WIDTH * BOARD_WIDTH
            - self.engine.score(Side::Black) as usize
            - self.engine.score(Side::White) as usize
    }
}
