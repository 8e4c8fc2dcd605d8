//! Reference rule judge.
//!
//! A deliberately plain board: no groups are stored, every question is
//! answered with a fresh flood fill. It shares nothing with
//! [`Game`](crate::game::Game) beyond the coordinate and color types, which
//! makes it a useful oracle for checking the incremental bookkeeping there.

use std::collections::BTreeSet;
use std::fmt;

use crate::color::Color;
use crate::constants::EMPTY_GLYPH;
use crate::coordinate::Coordinate;
use crate::game::Game;

pub struct Judge {
    pub width: usize,
    pub height: usize,
    suicide_allowed: bool,
    cells: Vec<Option<Color>>,
}

/// What the judge decided about a placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub legal: bool,
    pub captures: usize,
    pub suicide: bool,
}

impl Verdict {
    fn illegal() -> Self {
        Verdict {
            legal: false,
            captures: 0,
            suicide: false,
        }
    }
}

impl Judge {
    pub fn new(width: usize, height: usize, suicide_allowed: bool) -> Self {
        Self {
            width,
            height,
            suicide_allowed,
            cells: vec![None; width * height],
        }
    }

    /// A judge holding the same stones as `game`, under the same suicide rule.
    pub fn from_game(game: &Game) -> Self {
        let mut judge = Judge::new(
            game.width(),
            game.height(),
            game.ruleset().suicide_allowed(),
        );
        for at in game.coordinates() {
            let occupant = game.cell(at).ok().and_then(|c| c.occupant());
            judge.set(at, occupant);
        }
        judge
    }

    fn idx(&self, at: Coordinate) -> usize {
        at.row * self.width + at.column
    }

    pub fn get(&self, at: Coordinate) -> Option<Color> {
        if !at.in_bounds(self.width, self.height) {
            return None;
        }
        self.cells[self.idx(at)]
    }

    fn set(&mut self, at: Coordinate, value: Option<Color>) {
        let i = self.idx(at);
        self.cells[i] = value;
    }

    fn neighbors(&self, at: Coordinate) -> impl Iterator<Item = Coordinate> + use<> {
        at.adjacent_coordinates(self.width, self.height)
    }

    /// Place a `color` stone at `at`, resolving captures and then suicide.
    ///
    /// An illegal placement leaves the board unchanged.
    pub fn play(&mut self, at: Coordinate, color: Color) -> Verdict {
        if !at.in_bounds(self.width, self.height) || self.get(at).is_some() {
            return Verdict::illegal();
        }
        self.set(at, Some(color));

        let opp = !color;
        let mut to_remove = BTreeSet::new();
        for n in self.neighbors(at) {
            if self.get(n) == Some(opp) && self.liberties(n).is_empty() {
                to_remove.extend(self.string(n));
            }
        }
        let captures = to_remove.len();
        for &r in &to_remove {
            self.set(r, None);
        }

        if captures == 0 && self.liberties(at).is_empty() {
            if !self.suicide_allowed {
                self.set(at, None); // undo suicidal move
                return Verdict::illegal();
            }
            for r in self.string(at) {
                self.set(r, None);
            }
            return Verdict {
                legal: true,
                captures: 0,
                suicide: true,
            };
        }
        Verdict {
            legal: true,
            captures,
            suicide: false,
        }
    }

    /// The string of same-colored stones connected to `at`.
    pub fn string(&self, at: Coordinate) -> BTreeSet<Coordinate> {
        let Some(color) = self.get(at) else {
            return BTreeSet::new();
        };
        let mut seen = BTreeSet::from([at]);
        let mut stack = vec![at];
        while let Some(c) = stack.pop() {
            for n in self.neighbors(c) {
                if self.get(n) == Some(color) && seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        seen
    }

    /// Empty points adjacent to the string through `at`.
    pub fn liberties(&self, at: Coordinate) -> BTreeSet<Coordinate> {
        self.string(at)
            .into_iter()
            .flat_map(|s| self.neighbors(s))
            .filter(|&n| self.get(n).is_none())
            .collect()
    }
}

impl fmt::Display for Judge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for column in 0..self.width {
                let ch = match self.get(Coordinate::new(column, row)) {
                    Some(color) => color.glyph(),
                    None => EMPTY_GLYPH,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
