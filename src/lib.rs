//! go-rules: a rules engine for the game of Go.
//!
//! This crate tracks board state, connected groups (strings) and their
//! liberties incrementally, resolving captures before checking suicide.
//!
//! ## Modules
//!
//! - [`game`] - Board state, move execution, captures and suicide
//! - [`coordinate`], [`color`], [`cell`], [`group`] - Building blocks of the board
//! - [`ruleset`] - Named rule variants (komi, suicide, draws)
//! - [`sgf`] - SGF game-record tokenizer
//! - [`judge`] - Flood-fill reference judge for cross-checking
//! - [`playout`] - Random playouts
//! - [`gtp`] - Go Text Protocol front end
//! - [`constants`] - Engine defaults
//!
//! ## Example
//!
//! ```
//! use go_rules::coordinate::Coordinate;
//! use go_rules::game::Game;
//! use go_rules::ruleset::Ruleset;
//!
//! let mut game = Game::new(Ruleset::Japanese, 9, 9).unwrap();
//! game.play(Coordinate::new(4, 4)).unwrap();
//! game.pass();
//!
//! let group = game.group_at(Coordinate::new(4, 4)).unwrap();
//! assert_eq!(group.liberties().len(), 4);
//! println!("{game}");
//! ```

pub mod cell;
pub mod color;
pub mod constants;
pub mod coordinate;
pub mod error;
pub mod game;
pub mod group;
pub mod gtp;
pub mod judge;
pub mod playout;
pub mod ruleset;
pub mod sgf;
