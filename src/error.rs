//! Error types for the rules engine.

use thiserror::Error;

use crate::coordinate::Coordinate;
use crate::group::GroupId;

/// Why a move was rejected. A rejected move never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Coordinate lies outside the board
    #[error("illegal move: {0} is off the board")]
    OutOfBounds(Coordinate),
    /// Point is not empty
    #[error("illegal move: point not empty")]
    Occupied,
    /// Move would leave its own group without liberties and the ruleset forbids it
    #[error("illegal move: suicide")]
    Suicide,
}

/// Invalid access to game state. These indicate a caller bug, not a bad move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("board dimensions must be positive (got {width}x{height})")]
    InvalidSize { width: usize, height: usize },
    #[error("{coordinate} is outside the {width}x{height} board")]
    OutOfBounds {
        coordinate: Coordinate,
        width: usize,
        height: usize,
    },
    #[error("cell is empty")]
    EmptyCell,
    #[error("no live group with id {0}")]
    UnknownGroup(GroupId),
    #[error("inconsistent state at {at}: {reason}")]
    Inconsistent { at: Coordinate, reason: String },
}

/// Failure to parse a textual name or vertex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown color: {0}")]
    Color(String),
    #[error("unknown ruleset: {0}")]
    Ruleset(String),
    #[error("invalid vertex: {0}")]
    Vertex(String),
}

/// The incremental engine and the flood-fill judge disagreed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("move {move_number}: engine and judge disagree: {detail}")]
pub struct Divergence {
    pub move_number: usize,
    pub detail: String,
}
