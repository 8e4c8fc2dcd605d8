//! Random playouts (random game simulation).
//!
//! A playout plays random legal moves until both players pass in a row or
//! the move cap is reached. It has no notion of score; it exists to drive
//! the engine through many positions, either for the demo or to compare
//! every move against the flood-fill [`Judge`].

use fastrand::Rng;
use tracing::info;

use crate::color::Color;
use crate::constants::PLAYOUT_LENGTH_FACTOR;
use crate::coordinate::Coordinate;
use crate::error::Divergence;
use crate::game::{Game, MoveResult};
use crate::judge::Judge;

/// Counters collected over a playout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayoutStats {
    pub moves: usize,
    pub passes: usize,
    pub captures: usize,
    pub suicides: usize,
    /// Placements the engine rejected (only probed during cross-checks)
    pub rejected: usize,
}

impl PlayoutStats {
    fn record(&mut self, result: MoveResult) {
        self.moves += 1;
        self.captures += result.captures;
        if result.suicide {
            self.suicides += 1;
        }
    }

    /// Add the counters of another playout.
    pub fn merge(&mut self, other: PlayoutStats) {
        self.moves += other.moves;
        self.passes += other.passes;
        self.captures += other.captures;
        self.suicides += other.suicides;
        self.rejected += other.rejected;
    }
}

/// Default move cap for a board.
pub fn default_max_moves(game: &Game) -> usize {
    game.width() * game.height() * PLAYOUT_LENGTH_FACTOR
}

/// Check if a point is "eyeish" for `color`: every on-board neighbor is a
/// `color` stone. May be true for false eyes.
pub fn is_eyeish(game: &Game, at: Coordinate, color: Color) -> bool {
    at.adjacent_coordinates(game.width(), game.height())
        .all(|n| game.cell(n).is_ok_and(|c| c.occupant() == Some(color)))
}

/// Choose a random legal move for the player to move that does not fill
/// one of its own eyes.
pub fn choose_random_move(game: &Game, rng: &mut Rng) -> Option<Coordinate> {
    let player = game.player_to_move();
    let candidates: Vec<Coordinate> = game
        .coordinates()
        .filter(|&c| game.is_legal(c) && !is_eyeish(game, c, player))
        .collect();

    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.usize(..candidates.len())])
}

/// Play random moves until two consecutive passes or `max_moves` moves.
pub fn playout(game: &mut Game, rng: &mut Rng, max_moves: usize) -> PlayoutStats {
    let mut stats = PlayoutStats::default();
    let mut passes = 0;

    while passes < 2 && stats.moves + stats.passes < max_moves {
        match choose_random_move(game, rng) {
            Some(at) => {
                // Candidates are legal by construction.
                if let Ok(result) = game.play(at) {
                    stats.record(result);
                    passes = 0;
                }
            }
            None => {
                game.pass();
                stats.passes += 1;
                passes += 1;
            }
        }
    }
    stats
}

/// Like [`playout`], but mirror every move on a [`Judge`] and stop at the
/// first disagreement.
///
/// Besides the random legal moves, one move in eight is a completely random
/// point so that rejected moves are compared too. After each move the
/// occupancy, capture counts, group invariants and liberty sets are checked.
pub fn cross_check(
    game: &mut Game,
    rng: &mut Rng,
    max_moves: usize,
) -> Result<PlayoutStats, Divergence> {
    let mut judge = Judge::from_game(game);
    let mut stats = PlayoutStats::default();
    let mut passes = 0;

    while passes < 2 && stats.moves + stats.passes < max_moves {
        let probe = rng.u8(..8) == 0;
        let pick = if probe {
            Some(Coordinate::new(
                rng.usize(..game.width()),
                rng.usize(..game.height()),
            ))
        } else {
            choose_random_move(game, rng)
        };

        let Some(at) = pick else {
            game.pass();
            stats.passes += 1;
            passes += 1;
            continue;
        };

        let player = game.player_to_move();
        let before = game.captures(player);
        let verdict = judge.play(at, player);

        match game.play(at) {
            Ok(result) => {
                if !verdict.legal {
                    return Err(diverged(game, format!("engine accepted {at}, judge rejected it")));
                }
                if result.captures != verdict.captures || result.suicide != verdict.suicide {
                    return Err(diverged(
                        game,
                        format!("{at}: engine {result:?}, judge {verdict:?}"),
                    ));
                }
                if game.captures(player) != before + verdict.captures {
                    return Err(diverged(game, format!("{at}: capture counter not updated")));
                }
                stats.record(result);
                passes = 0;
            }
            Err(err) => {
                if verdict.legal {
                    return Err(diverged(
                        game,
                        format!("engine rejected {at} ({err}), judge accepted"),
                    ));
                }
                stats.rejected += 1;
            }
        }

        compare(game, &judge)?;
    }

    info!(
        width = game.width(),
        height = game.height(),
        ruleset = %game.ruleset(),
        moves = stats.moves,
        captures = stats.captures,
        suicides = stats.suicides,
        rejected = stats.rejected,
        "cross-check playout finished"
    );
    Ok(stats)
}

fn diverged(game: &Game, detail: String) -> Divergence {
    Divergence {
        move_number: game.move_number(),
        detail,
    }
}

fn compare(game: &Game, judge: &Judge) -> Result<(), Divergence> {
    game.check_consistency()
        .map_err(|err| diverged(game, err.to_string()))?;

    for at in game.coordinates() {
        let occupant = game.cell(at).ok().and_then(|c| c.occupant());
        if occupant != judge.get(at) {
            return Err(diverged(
                game,
                format!(
                    "{at}: engine has {occupant:?}, judge has {:?}\n{game}\n{judge}",
                    judge.get(at)
                ),
            ));
        }
    }

    for (id, group) in game.groups() {
        let Some(&first) = group.stones().iter().next() else {
            return Err(diverged(game, format!("group {id} has no stones")));
        };
        if group.stones() != &judge.string(first) {
            return Err(diverged(game, format!("group {id} stones differ from judge")));
        }
        if group.liberties() != &judge.liberties(first) {
            return Err(diverged(game, format!("group {id} liberties differ from judge")));
        }
    }
    Ok(())
}
