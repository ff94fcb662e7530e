//! Errors raised by board-scoped actions.

use crate::board::BoardId;
use crate::generation::GenerationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board errors.
///
/// None of these are fatal: the state machine reports them as notices and
/// returns to idle.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Please select a board first")]
    NoCurrentBoard,
    #[error("Board not found: {0}")]
    BoardNotFound(BoardId),
    #[error("Generation already in progress")]
    GenerationInProgress,
    #[error("Failed to generate: {0}")]
    GenerationFailed(#[from] GenerationError),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
