//! Go game state and move execution.
//!
//! This module provides the core rules logic:
//! - Cell grid and the arena of live groups, keyed by [`GroupId`]
//! - Incremental group merging and liberty bookkeeping on every placement
//! - Capture resolution followed by the suicide check
//! - Move history, from which the player to move is derived
//!
//! Liberty sets are maintained eagerly. After every `play` or `pass`, each
//! group's liberties are exactly the empty points orthogonally adjacent to
//! its stones; [`Game::check_consistency`] re-derives this from the grid.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::{debug, trace};

use crate::cell::Cell;
use crate::color::Color;
use crate::constants::{COLUMN_LETTERS, EMPTY_GLYPH};
use crate::coordinate::Coordinate;
use crate::error::{GameError, MoveError};
use crate::group::{Group, GroupId};
use crate::ruleset::Ruleset;

/// An entry in the move history.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Place(Coordinate),
    Pass,
}

/// Summary of a legal placement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveResult {
    /// Opponent stones removed by this move
    pub captures: usize,
    /// The placed stone's own group was removed (only under rulesets allowing suicide)
    pub suicide: bool,
}

/// A game of Go on a `width` x `height` board.
#[derive(Clone, Debug)]
pub struct Game {
    ruleset: Ruleset,
    width: usize,
    height: usize,
    /// Row-major cell grid
    cells: Vec<Cell>,
    groups: BTreeMap<GroupId, Group>,
    next_group_id: u32,
    history: Vec<Move>,
    /// Opponent stones captured by each color, indexed by `Color::index`
    captures: [usize; 2],
}

impl Game {
    /// Create an empty board. Both dimensions must be positive.
    pub fn new(ruleset: Ruleset, width: usize, height: usize) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidSize { width, height });
        }
        Ok(Game {
            ruleset,
            width,
            height,
            cells: vec![Cell::default(); width * height],
            groups: BTreeMap::new(),
            next_group_id: 0,
            history: Vec::new(),
            captures: [0; 2],
        })
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The player whose turn it is: Black after an even number of moves, White otherwise.
    pub fn player_to_move(&self) -> Color {
        if self.history.len() % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Number of opponent stones captured so far by `color`.
    pub fn captures(&self, color: Color) -> usize {
        self.captures[color.index()]
    }

    /// Every move played so far, passes included.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Number of moves played so far (0 = start of game).
    pub fn move_number(&self) -> usize {
        self.history.len()
    }

    /// The cell at `coordinate`.
    pub fn cell(&self, coordinate: Coordinate) -> Result<&Cell, GameError> {
        self.check_bounds(coordinate)?;
        Ok(&self.cells[self.idx(coordinate)])
    }

    /// Look up a live group. Handles become stale once their group is captured or merged.
    pub fn group(&self, id: GroupId) -> Result<&Group, GameError> {
        self.groups.get(&id).ok_or(GameError::UnknownGroup(id))
    }

    /// The group owning the stone at `coordinate`, if any.
    pub fn group_at(&self, coordinate: Coordinate) -> Option<&Group> {
        let id = self.cell(coordinate).ok()?.group?;
        self.groups.get(&id)
    }

    /// All live groups in id order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups.iter().map(|(&id, g)| (id, g))
    }

    /// All board coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |column| Coordinate::new(column, row)))
    }

    /// Whether the player to move may place a stone at `coordinate`.
    ///
    /// This never mutates the game.
    pub fn is_legal(&self, coordinate: Coordinate) -> bool {
        self.check_move(coordinate).is_ok()
    }

    /// Place the next stone at `coordinate`.
    ///
    /// The stone's color is always [`Game::player_to_move`]. Opponent groups
    /// left without liberties are captured before the placed group's own
    /// liberties are examined. A rejected move leaves the game untouched.
    ///
    /// # Errors
    /// - [`MoveError::OutOfBounds`] - coordinate is off the board
    /// - [`MoveError::Occupied`] - the point already holds a stone
    /// - [`MoveError::Suicide`] - the move would leave its group without
    ///   liberties and the ruleset forbids suicide
    pub fn play(&mut self, at: Coordinate) -> Result<MoveResult, MoveError> {
        if let Err(err) = self.check_move(at) {
            debug!(%at, %err, "move rejected");
            return Err(err);
        }

        let player = self.player_to_move();
        let idx = self.idx(at);
        self.cells[idx].occupant = Some(player);

        // Join every friendly group touching the stone. The first one absorbs
        // the stone; each later one takes over the stone's group so far.
        for adjacent in self.adjacent_groups(at, player) {
            match self.cells[idx].group {
                None => {
                    self.cells[idx].group = Some(adjacent);
                    self.live_mut(adjacent).stones.insert(at);
                }
                Some(current) => {
                    let old = self.take_group(current);
                    for &stone in &old.stones {
                        let i = self.idx(stone);
                        self.cells[i].group = Some(adjacent);
                    }
                    trace!(from = %current, into = %adjacent, stones = old.len(), "merging groups");
                    self.live_mut(adjacent).absorb(old);
                }
            }
            self.live_mut(adjacent).liberties.remove(&at);
        }

        let own = match self.cells[idx].group {
            Some(id) => id,
            None => {
                let id = self.allocate(Group::single(player, at));
                self.cells[idx].group = Some(id);
                trace!(group = %id, %at, "new group");
                id
            }
        };

        let opponents = self.adjacent_groups(at, !player);
        for &id in &opponents {
            self.live_mut(id).liberties.remove(&at);
        }

        let fresh: Vec<Coordinate> = at
            .adjacent_coordinates(self.width, self.height)
            .filter(|&n| self.cells[self.idx(n)].is_empty())
            .collect();
        self.live_mut(own).liberties.extend(fresh);

        let mut captured = 0;
        for id in opponents {
            if self.live(id).liberties.is_empty() {
                captured += self.remove_group(id);
            }
        }
        if captured > 0 {
            self.captures[player.index()] += captured;
            debug!(%player, %at, captured, "captured stones");
        }

        // Only reachable when the ruleset allows suicide; check_move rejects it otherwise.
        let suicide = self.live(own).liberties.is_empty();
        if suicide {
            let lost = self.remove_group(own);
            debug!(%player, %at, lost, "suicide");
        }

        self.history.push(Move::Place(at));
        Ok(MoveResult { captures: captured, suicide })
    }

    /// Pass and place no stones.
    pub fn pass(&mut self) {
        trace!(player = %self.player_to_move(), "pass");
        self.history.push(Move::Pass);
    }

    /// Decide whether a placement is legal without touching any state.
    ///
    /// A stone survives if it has an empty neighbor, joins a friendly group
    /// with another liberty, or captures an opponent group in atari.
    fn check_move(&self, at: Coordinate) -> Result<(), MoveError> {
        if !at.in_bounds(self.width, self.height) {
            return Err(MoveError::OutOfBounds(at));
        }
        if !self.cells[self.idx(at)].is_empty() {
            return Err(MoveError::Occupied);
        }
        if self.ruleset.suicide_allowed() {
            return Ok(());
        }

        let player = self.player_to_move();
        let survives = at
            .adjacent_coordinates(self.width, self.height)
            .any(|n| match self.cells[self.idx(n)].group {
                None => true,
                Some(id) => {
                    let group = self.live(id);
                    if group.color == player {
                        group.liberties.len() > 1
                    } else {
                        group.liberties.len() == 1
                    }
                }
            });

        if survives {
            Ok(())
        } else {
            Err(MoveError::Suicide)
        }
    }

    /// Re-derive every group invariant from the grid.
    ///
    /// Checks that cells and groups agree, that each group is a maximal
    /// connected string, and that its liberty set is exact.
    pub fn check_consistency(&self) -> Result<(), GameError> {
        let fail = |at: Coordinate, reason: String| Err(GameError::Inconsistent { at, reason });

        for at in self.coordinates() {
            let cell = &self.cells[self.idx(at)];
            match (cell.occupant, cell.group) {
                (None, None) => {}
                (Some(color), Some(id)) => {
                    let Some(group) = self.groups.get(&id) else {
                        return fail(at, format!("cell refers to dead group {id}"));
                    };
                    if group.color != color {
                        return fail(at, format!("{color} stone in {} group {id}", group.color));
                    }
                    if !group.stones.contains(&at) {
                        return fail(at, format!("stone missing from group {id}"));
                    }
                    for n in at.adjacent_coordinates(self.width, self.height) {
                        let other = &self.cells[self.idx(n)];
                        if other.occupant == Some(color) && other.group != Some(id) {
                            return fail(at, format!("connected to {n} in another group"));
                        }
                    }
                }
                _ => return fail(at, "occupant and group disagree".to_string()),
            }
        }

        for (&id, group) in &self.groups {
            let Some(&first) = group.stones.iter().next() else {
                return fail(Coordinate::new(0, 0), format!("group {id} has no stones"));
            };
            let mut liberties = BTreeSet::new();
            for &stone in &group.stones {
                if self.cells.get(self.idx(stone)).and_then(|c| c.group) != Some(id) {
                    return fail(stone, format!("group {id} lists a stone it does not own"));
                }
                liberties.extend(
                    stone
                        .adjacent_coordinates(self.width, self.height)
                        .filter(|&n| self.cells[self.idx(n)].is_empty()),
                );
            }
            if liberties != group.liberties {
                return fail(first, format!("group {id} liberties out of date"));
            }
            if self.flood(first).len() != group.stones.len() {
                return fail(first, format!("group {id} is not connected"));
            }
        }
        Ok(())
    }

    /// Stones connected to `start` through same-colored stones.
    fn flood(&self, start: Coordinate) -> BTreeSet<Coordinate> {
        let color = self.cells[self.idx(start)].occupant;
        let mut seen = BTreeSet::from([start]);
        let mut stack = vec![start];
        while let Some(at) = stack.pop() {
            for n in at.adjacent_coordinates(self.width, self.height) {
                if self.cells[self.idx(n)].occupant == color && seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        seen
    }

    /// Remove a whole group, returning its stones' cells to empty and giving
    /// each vacated point back as a liberty to the neighbors that remain.
    fn remove_group(&mut self, id: GroupId) -> usize {
        let group = self.take_group(id);
        for &stone in &group.stones {
            let i = self.idx(stone);
            self.cells[i].clear();
        }
        for &stone in &group.stones {
            for n in stone.adjacent_coordinates(self.width, self.height) {
                if let Some(owner) = self.cells[self.idx(n)].group {
                    self.live_mut(owner).liberties.insert(stone);
                }
            }
        }
        group.len()
    }

    /// Distinct groups of `color` with a stone next to `at`.
    fn adjacent_groups(&self, at: Coordinate, color: Color) -> Vec<GroupId> {
        let mut ids = Vec::with_capacity(4);
        for n in at.adjacent_coordinates(self.width, self.height) {
            let cell = &self.cells[self.idx(n)];
            if let (Some(c), Some(id)) = (cell.occupant, cell.group) {
                if c == color && !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    fn allocate(&mut self, group: Group) -> GroupId {
        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;
        self.groups.insert(id, group);
        id
    }

    // Handles reached through the grid always name live groups; a miss here
    // is a broken invariant, not a recoverable error.
    fn live(&self, id: GroupId) -> &Group {
        self.groups.get(&id).expect("cell refers to a live group")
    }

    fn live_mut(&mut self, id: GroupId) -> &mut Group {
        self.groups.get_mut(&id).expect("cell refers to a live group")
    }

    fn take_group(&mut self, id: GroupId) -> Group {
        self.groups.remove(&id).expect("cell refers to a live group")
    }

    fn check_bounds(&self, coordinate: Coordinate) -> Result<(), GameError> {
        if coordinate.in_bounds(self.width, self.height) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                coordinate,
                width: self.width,
                height: self.height,
            })
        }
    }

    #[inline]
    fn idx(&self, c: Coordinate) -> usize {
        c.row * self.width + c.column
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place(at) => write!(f, "{at}"),
            Move::Pass => write!(f, "pass"),
        }
    }
}

/// Debug view: header, grid and move list. The alternate form (`{:#}`)
/// also lists every group with its stones and liberties.
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}x{} {} rules, {} to move, move {}, captures: black {} white {}",
            self.width,
            self.height,
            self.ruleset,
            self.player_to_move(),
            self.move_number(),
            self.captures(Color::Black),
            self.captures(Color::White),
        )?;

        let lettered = self.width <= COLUMN_LETTERS.len();
        if lettered {
            write!(f, "    ")?;
            for &letter in &COLUMN_LETTERS[..self.width] {
                write!(f, "{} ", letter as char)?;
            }
            writeln!(f)?;
        }
        for row in 0..self.height {
            write!(f, "{:>3} ", self.height - row)?;
            for column in 0..self.width {
                let ch = match self.cells[self.idx(Coordinate::new(column, row))].occupant {
                    Some(color) => color.glyph(),
                    None => EMPTY_GLYPH,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }

        let moves: Vec<String> = self
            .history
            .iter()
            .map(|m| match m {
                Move::Place(at) if lettered => at.to_vertex(self.height).unwrap_or_else(|| at.to_string()),
                other => other.to_string(),
            })
            .collect();
        writeln!(f, "moves: {}", moves.join(" "))?;

        if f.alternate() {
            for color in Color::ALL {
                for (id, group) in self.groups().filter(|(_, g)| g.color == color) {
                    let stones: Vec<String> = group.stones.iter().map(|c| c.to_string()).collect();
                    let libs: Vec<String> = group.liberties.iter().map(|c| c.to_string()).collect();
                    writeln!(f, "  {id} {color} {} stones: {}", group.len(), stones.join(" "))?;
                    writeln!(f, "    {} liberties: {}", libs.len(), libs.join(" "))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy(column: usize, row: usize) -> Coordinate {
        Coordinate::new(column, row)
    }

    #[test]
    fn test_new_game_is_empty() {
        let game = Game::new(Ruleset::Japanese, 9, 9).unwrap();
        assert_eq!(game.player_to_move(), Color::Black);
        assert_eq!(game.move_number(), 0);
        assert!(game.coordinates().all(|c| game.cell(c).unwrap().is_empty()));
        assert_eq!(game.groups().count(), 0);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Game::new(Ruleset::Japanese, 0, 9),
            Err(GameError::InvalidSize { .. })
        ));
        assert!(Game::new(Ruleset::Japanese, 9, 0).is_err());
    }

    #[test]
    fn test_single_stone_liberties() {
        let mut game = Game::new(Ruleset::Japanese, 9, 9).unwrap();
        game.play(xy(4, 4)).unwrap();
        assert_eq!(game.group_at(xy(4, 4)).unwrap().liberties().len(), 4);

        game.play(xy(0, 0)).unwrap();
        assert_eq!(game.group_at(xy(0, 0)).unwrap().liberties().len(), 2);
        game.check_consistency().unwrap();
    }

    #[test]
    fn test_out_of_bounds() {
        let mut game = Game::new(Ruleset::Japanese, 5, 5).unwrap();
        assert_eq!(game.play(xy(5, 0)), Err(MoveError::OutOfBounds(xy(5, 0))));
        assert!(matches!(game.cell(xy(0, 5)), Err(GameError::OutOfBounds { .. })));
        assert_eq!(game.move_number(), 0);
    }

    #[test]
    fn test_group_ids_are_sequential() {
        let mut game = Game::new(Ruleset::Japanese, 5, 5).unwrap();
        game.play(xy(0, 0)).unwrap();
        game.play(xy(4, 4)).unwrap();
        let ids: Vec<GroupId> = game.groups().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![GroupId(0), GroupId(1)]);
    }

    #[test]
    fn test_stale_group_lookup() {
        let mut game = Game::new(Ruleset::Japanese, 5, 5).unwrap();
        game.play(xy(1, 0)).unwrap(); // B
        game.play(xy(0, 0)).unwrap(); // W
        let white = game.cell(xy(0, 0)).unwrap().group().unwrap();
        game.play(xy(0, 1)).unwrap(); // B captures
        assert_eq!(game.group(white), Err(GameError::UnknownGroup(white)));
    }

    #[test]
    fn test_display_shows_board() {
        let mut game = Game::new(Ruleset::Japanese, 5, 5).unwrap();
        game.play(xy(0, 0)).unwrap();
        game.pass();
        let text = game.to_string();
        assert!(text.contains("5x5 Japanese rules, black to move, move 2"));
        assert!(text.contains("  5 X . . . . "));
        assert!(text.contains("moves: A5 pass"));

        let verbose = format!("{game:#}");
        assert!(verbose.contains("#0 black 1 stones: (0,0)"));
        assert!(verbose.contains("2 liberties: (0,1) (1,0)"));
    }
}
