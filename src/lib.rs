pub mod ai;
pub mod board;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod game;
pub mod logging;
pub mod self_play;
pub mod text;
pub mod transport;
pub mod types;
pub mod wasm;

pub use config::EngineConfig;
pub use controller::{Controller, Key};
pub use engine::{BitboardEngine, Engine};
pub use error::{EngineError, ParseBoardError, TransportError};
pub use game::GameLoop;
pub use self_play::SelfPlay;
pub use types::{Cell, GameState, Outcome, Position, Request, Response, Side, Snapshot};
