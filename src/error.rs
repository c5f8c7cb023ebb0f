use thiserror::Error;

/// The engine could not be brought up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid engine level {level} (must be 1-6)")]
    InvalidLevel { level: u8 },
}

/// A text board did not match the framed `x`/`o`/`.` format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected 10 lines, got {found}")]
    LineCount { found: usize },

    #[error("line {line} has a malformed frame")]
    Frame { line: usize },

    #[error("unexpected character {ch:?} at line {line}, column {col}")]
    Cell { line: usize, col: usize, ch: char },
}

/// The transport could not be set up, or its other end hung up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("failed to start game loop thread: {message}")]
    Spawn { message: String },

    #[error("game loop disconnected")]
    GameLoopGone,

    #[error("presentation controller disconnected")]
    ControllerGone,
}
