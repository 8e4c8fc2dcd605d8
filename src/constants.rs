//! Engine defaults and front-end limits.
//!
//! Board dimensions are chosen at runtime when a [`Game`](crate::game::Game)
//! is created; the values here are only the defaults used by the CLI and
//! the GTP front end.

use crate::ruleset::Ruleset;

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Standard Go sizes are 9, 13, or 19.
pub const DEFAULT_SIZE: usize = 19;

/// Largest board the GTP vertex notation can address (A..Z without I).
pub const MAX_GTP_SIZE: usize = 25;

/// Column letters used by GTP vertices. `I` is skipped to avoid confusion with `J`.
pub const COLUMN_LETTERS: &[u8; MAX_GTP_SIZE] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

// =============================================================================
// Rules
// =============================================================================

/// Ruleset used when none is given on the command line.
pub const DEFAULT_RULESET: Ruleset = Ruleset::Japanese;

// =============================================================================
// Playouts
// =============================================================================

/// Maximum playout length, as a multiple of the board area.
pub const PLAYOUT_LENGTH_FACTOR: usize = 3;

/// Default seed for self-check playouts.
pub const DEFAULT_SEED: u64 = 1;

/// Default number of self-check games.
pub const DEFAULT_SELFCHECK_GAMES: usize = 20;

// =============================================================================
// Printing
// =============================================================================

/// Glyph for an empty intersection.
pub const EMPTY_GLYPH: char = '.';
