//! The error taxonomy shared by every engine operation.

use thiserror::Error;

/// Errors surfaced by the engine to its caller.
///
/// Validation variants are rejected before any state mutates, state variants
/// leave the round untouched, and `EmptyShoe` is fatal to the current round.
/// The engine has no recovery policy of its own; retry loops belong to the
/// input collaborator.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid bet: {0}")]
    InvalidBet(String),

    #[error("invalid insurance bet: {0}")]
    InvalidInsurance(String),

    #[error("invalid split: {0}")]
    InvalidSplit(String),

    #[error("out of turn: {0}")]
    OutOfTurn(String),

    #[error("action not available: {0}")]
    UnavailableAction(String),

    #[error("the shoe cannot satisfy the draw")]
    EmptyShoe,
}
