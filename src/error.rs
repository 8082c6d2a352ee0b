//! Error types for contract violations.
//!
//! Player-facing illegal actions (not enough gold, empty slot, full hand)
//! are reported as `false` by the board and never reach this type.
//! `GameError` is reserved for caller bugs: overlapping turns, advancing
//! an unfinished round, decoding an id outside the action space, or
//! feeding the engine malformed configuration and catalog data.

use thiserror::Error;

use crate::core::PlayerId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("a turn is already in progress for {0}")]
    TurnInProgress(PlayerId),

    #[error("{0} has already completed their turn this round")]
    TurnAlreadyCompleted(PlayerId),

    #[error("no player is currently in a turn")]
    NoTurnInProgress,

    #[error("{0} has not completed their turn")]
    RoundIncomplete(PlayerId),

    #[error("unknown player index {0}")]
    UnknownPlayer(usize),

    #[error("invalid player count {0}: must be even and positive")]
    InvalidPlayerCount(usize),

    #[error("{id} is not a valid move id (expected 0..={max})")]
    InvalidMoveId { id: usize, max: usize },

    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("could not parse combat report: {0}")]
    Report(String),

    #[error("snapshot codec error: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
