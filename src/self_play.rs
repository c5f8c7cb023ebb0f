use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::engine::{BitboardEngine, Engine};
use crate::error::EngineError;
use crate::types::{Position, Side};

/// Plies played at random before the engine takes over, so games differ.
pub const RANDOM_OPENING_PLIES: u32 = 6;

/// One move made during a self-play game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ply {
    pub side: Side,
    pub position: Position,
    pub random: bool,
}

/// The engine playing both colors. Black moves first; a side with no legal
/// move passes.
pub struct SelfPlay {
    engine: BitboardEngine,
    rng: ChaCha8Rng,
    to_move: Side,
    plies: u32,
}

impl SelfPlay {
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        Ok(Self {
            engine: BitboardEngine::new(config)?,
            rng: ChaCha8Rng::seed_from_u64(seed),
            to_move: Side::Black,
            plies: 0,
        })
    }

    pub fn engine(&self) -> &BitboardEngine {
        &self.engine
    }

    pub fn plies(&self) -> u32 {
        self.plies
    }

    pub fn is_over(&self) -> bool {
        !self.engine.has_legal_move(Side::Black) && !self.engine.has_legal_move(Side::White)
    }

    /// Resets the board. The random sequence carries on, so consecutive
    /// games open differently.
    pub fn new_game(&mut self) {
        info!("new self-play game");
        self.engine.reset();
        self.to_move = Side::Black;
        self.plies = 0;
    }

    /// Plays the next move, or returns `None` once neither side can move.
    pub fn step(&mut self) -> Option<Ply> {
        if self.is_over() {
            return None;
        }
        if !self.engine.has_legal_move(self.to_move) {
            debug!(side = ?self.to_move, "pass");
            self.to_move = self.to_move.opponent();
        }

        let side = self.to_move;
        let random = self.plies < RANDOM_OPENING_PLIES;
        let choice = if random {
            self.engine.random_move(side, &mut self.rng)
        } else {
            self.engine.compute_move(side)
        };
        let position = choice?;

        self.engine.apply_move(side, position.row, position.col);
        self.plies += 1;
        self.to_move = side.opponent();
        debug!(?side, %position, random, "self-play move");

        Some(Ply {
            side,
            position,
            random,
        })
    }

    /// Plays to the end and returns `(black, white)`.
    pub fn play_out(&mut self, mut on_ply: impl FnMut(&Self, Ply)) -> (u8, u8) {
        while let Some(ply) = self.step() {
            on_ply(self, ply);
        }
        (
            self.engine.score(Side::Black),
            self.engine.score(Side::White),
        )
    }
}
