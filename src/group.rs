//! Connected groups (strings) of stones.

use std::collections::BTreeSet;
use std::fmt;

use crate::color::Color;
use crate::coordinate::Coordinate;

/// Compact handle of a live group, unique within one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub(crate) u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A connected set of same-colored stones and its liberties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub(crate) color: Color,
    pub(crate) stones: BTreeSet<Coordinate>,
    /// Empty points orthogonally adjacent to at least one stone.
    pub(crate) liberties: BTreeSet<Coordinate>,
}

impl Group {
    pub(crate) fn single(color: Color, stone: Coordinate) -> Self {
        Self {
            color,
            stones: BTreeSet::from([stone]),
            liberties: BTreeSet::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stones(&self) -> &BTreeSet<Coordinate> {
        &self.stones
    }

    pub fn liberties(&self) -> &BTreeSet<Coordinate> {
        &self.liberties
    }

    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// True when at least one stone of the group touches `coordinate`.
    pub fn touches(&self, coordinate: Coordinate) -> bool {
        self.stones.iter().any(|s| s.is_adjacent_to(coordinate))
    }

    /// Absorb every stone and liberty of `other`.
    pub(crate) fn absorb(&mut self, other: Group) {
        debug_assert_eq!(self.color, other.color);
        self.stones.extend(other.stones);
        self.liberties.extend(other.liberties);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_stone_group() {
        let g = Group::single(Color::Black, Coordinate::new(3, 3));
        assert_eq!(g.len(), 1);
        assert!(g.liberties().is_empty());
        assert!(g.touches(Coordinate::new(3, 4)));
        assert!(!g.touches(Coordinate::new(4, 4)));
    }

    #[test]
    fn test_absorb_unions_sets() {
        let mut a = Group::single(Color::White, Coordinate::new(0, 0));
        a.liberties.insert(Coordinate::new(1, 0));
        let mut b = Group::single(Color::White, Coordinate::new(2, 0));
        b.liberties.insert(Coordinate::new(1, 0));
        b.liberties.insert(Coordinate::new(3, 0));

        a.absorb(b);
        assert_eq!(a.len(), 2);
        assert_eq!(
            a.liberties().iter().copied().collect::<Vec<_>>(),
            vec![Coordinate::new(1, 0), Coordinate::new(3, 0)]
        );
    }
}
