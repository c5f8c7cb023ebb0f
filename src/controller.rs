use crossbeam_channel::Sender;
use tracing::debug;

use crate::error::TransportError;
use crate::types::{BOARD_WIDTH, GameState, Grid, Outcome, Position, Request, Response, Snapshot};

/// A key press after translation from whatever the host UI delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Confirm,
    Left,
    Right,
    Up,
    Down,
    /// `a`-`h`
    Column(u8),
    /// `0`-`7`
    Row(u8),
}

impl Key {
    /// Maps a typed character. Arrows are spelled `<`, `>`, `^` and `v`.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            ' ' | '\n' | '\r' => Some(Key::Confirm),
            '<' => Some(Key::Left),
            '>' => Some(Key::Right),
            '^' => Some(Key::Up),
            'v' => Some(Key::Down),
            'a'..='h' => Some(Key::Column(ch as u8 - b'a')),
            '0'..='7' => Some(Key::Row(ch as u8 - b'0')),
            _ => None,
        }
    }
}

/// Holds the last snapshot plus a cursor and keeps at most one request
/// outstanding.
pub struct Controller {
    requests: Sender<Request>,
    state: GameState,
    board: Grid,
    black_score: u8,
    white_score: u8,
    black_moves: Vec<Position>,
    cursor: Option<Position>,
    loaded: bool,
    engine_unavailable: bool,
}

impl Controller {
    pub fn new(requests: Sender<Request>) -> Self {
        Self {
            requests,
            state: GameState::Waiting,
            board: Grid::default(),
            black_score: 0,
            white_score: 0,
            black_moves: Vec::new(),
            cursor: None,
            loaded: false,
            engine_unavailable: false,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Grid {
        &self.board
    }

    pub fn scores(&self) -> (u8, u8) {
        (self.black_score, self.white_score)
    }

    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    pub fn is_engine_unavailable(&self) -> bool {
        self.engine_unavailable
    }

    /// True while a request is outstanding or the computer is still moving.
    pub fn is_busy(&self) -> bool {
        !self.engine_unavailable
            && matches!(self.state, GameState::Waiting | GameState::WhiteToMove)
    }

    pub fn new_game_enabled(&self) -> bool {
        self.loaded
            && !self.engine_unavailable
            && matches!(self.state, GameState::BlackToMove | GameState::GameOver)
    }

    /// The cursor cell, shown only while it is black's turn.
    pub fn highlighted(&self) -> Option<Position> {
        self.cursor.filter(|_| self.state == GameState::BlackToMove)
    }

    /// Black's legal moves from the last snapshot, shown only on black's turn.
    pub fn hints(&self) -> &[Position] {
        if self.state == GameState::BlackToMove {
            &self.black_moves
        } else {
            &[]
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        (self.state == GameState::GameOver)
            .then(|| Outcome::from_scores(self.black_score, self.white_score))
    }

    pub fn status(&self) -> String {
        if self.engine_unavailable {
            return "Error :-(".to_string();
        }
        match self.state {
            GameState::Waiting => "Loading...".to_string(),
            GameState::BlackToMove => "Human's move.".to_string(),
            GameState::WhiteToMove => "Computer's move..".to_string(),
            GameState::GameOver => self
                .outcome()
                .map(|outcome| outcome.to_string())
                .unwrap_or_default(),
        }
    }

    /// Asks for a fresh game. Ignored while the control is disabled.
    pub fn new_game(&mut self) -> Result<(), TransportError> {
        if !self.new_game_enabled() {
            return Ok(());
        }
        self.send(Request::NewGame)
    }

    /// A click on `(row, col)`. Only acts on black's turn.
    pub fn activate(&mut self, row: u8, col: u8) -> Result<(), TransportError> {
        if self.engine_unavailable || self.state != GameState::BlackToMove {
            return Ok(());
        }
        self.send(Request::Move { row, col })
    }

    /// Mouse movement over a cell, or `None` when it leaves the board.
    pub fn hover(&mut self, cell: Option<Position>) {
        self.cursor = cell;
    }

    /// Keyboard input. Navigation only moves the cursor; only
    /// [`Key::Confirm`] with a cursor set sends anything.
    pub fn key(&mut self, key: Key) -> Result<(), TransportError> {
        if self.engine_unavailable || self.state != GameState::BlackToMove {
            return Ok(());
        }

        let (mut row, mut col) = match self.cursor {
            Some(pos) => (pos.row as i8, pos.col as i8),
            None => (-1, -1),
        };

        match key {
            Key::Confirm => {
                return match self.cursor {
                    Some(pos) => self.activate(pos.row, pos.col),
                    None => Ok(()),
                };
            }
            Key::Left => col -= 1,
            Key::Right => col += 1,
            Key::Up => row -= 1,
            Key::Down => row += 1,
            Key::Column(c) => col = c as i8,
            Key::Row(r) => row = r as i8,
        }

        let last = BOARD_WIDTH as i8 - 1;
        self.cursor = Position::new(row.clamp(0, last) as u8, col.clamp(0, last) as u8);
        Ok(())
    }

    /// Applies one message from the game loop.
    pub fn receive(&mut self, response: Response) -> Result<(), TransportError> {
        match response {
            Response::Loaded => {
                self.loaded = true;
                self.send(Request::NewGame)
            }
            Response::EngineUnavailable => {
                self.engine_unavailable = true;
                self.state = GameState::Waiting;
                self.cursor = None;
                Ok(())
            }
            Response::Snapshot(snapshot) => {
                self.apply(snapshot);
                Ok(())
            }
        }
    }

    fn apply(&mut self, snapshot: Snapshot) {
        debug!(state = ?snapshot.state, black = snapshot.black_score, white = snapshot.white_score, "snapshot");
        self.state = snapshot.state;
        self.board = snapshot.board;
        self.black_score = snapshot.black_score;
        self.white_score = snapshot.white_score;
        self.black_moves = snapshot.black_moves;
    }

    fn send(&mut self, request: Request) -> Result<(), TransportError> {
        self.requests
            .send(request)
            .map_err(|_| TransportError::GameLoopGone)?;
        self.state = GameState::Waiting;
        Ok(())
    }
}
