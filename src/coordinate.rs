//! Board coordinates and GTP vertex notation.
//!
//! A [`Coordinate`] is a plain `(column, row)` pair with the origin at the
//! top-left intersection as printed. Nothing about a coordinate knows the
//! board size, so every bounds-dependent helper takes `width` and `height`.

use std::fmt;

use crate::constants::{COLUMN_LETTERS, MAX_GTP_SIZE};
use crate::error::ParseError;

/// A two-dimensional point on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub column: usize,
    pub row: usize,
}

impl Coordinate {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Returns whether two coordinates are orthogonally adjacent.
    pub fn is_adjacent_to(self, other: Coordinate) -> bool {
        (self.row == other.row && self.column.abs_diff(other.column) == 1)
            || (self.column == other.column && self.row.abs_diff(other.row) == 1)
    }

    /// Returns whether the coordinate lies on a `width` x `height` board.
    pub fn in_bounds(self, width: usize, height: usize) -> bool {
        self.column < width && self.row < height
    }

    /// The up-to-four orthogonal neighbors that lie on a `width` x `height` board.
    ///
    /// Order: up, down, left, right.
    pub fn adjacent_coordinates(
        self,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = Coordinate> {
        let Coordinate { column, row } = self;
        [
            row.checked_sub(1).map(|r| Coordinate::new(column, r)),
            Some(Coordinate::new(column, row + 1)),
            column.checked_sub(1).map(|c| Coordinate::new(c, row)),
            Some(Coordinate::new(column + 1, row)),
        ]
        .into_iter()
        .flatten()
        .filter(move |c| c.in_bounds(width, height))
    }

    /// Convert to a GTP vertex such as `D4` on a board with `height` rows.
    ///
    /// Row numbers count up from the bottom line, so row index 0 is the
    /// highest number. Returns `None` if the column has no letter.
    pub fn to_vertex(self, height: usize) -> Option<String> {
        let letter = *COLUMN_LETTERS.get(self.column)? as char;
        let number = height.checked_sub(self.row)?;
        Some(format!("{letter}{number}"))
    }
}

/// Parse a GTP vertex (e.g. `D4`, case-insensitive) for a board with `height` rows.
///
/// Bounds against the board width are not checked here; the game does that
/// when the move is played.
pub fn parse_vertex(s: &str, height: usize) -> Result<Coordinate, ParseError> {
    let invalid = || ParseError::Vertex(s.to_string());

    let mut chars = s.chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let column = COLUMN_LETTERS
        .iter()
        .position(|&b| b as char == letter)
        .ok_or_else(invalid)?;

    let number: usize = chars.as_str().parse().map_err(|_| invalid())?;
    if number == 0 || number > height || number > MAX_GTP_SIZE {
        return Err(invalid());
    }

    Ok(Coordinate::new(column, height - number))
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.column, self.row)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((column, row): (usize, usize)) -> Self {
        Coordinate::new(column, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_is_orthogonal_only() {
        let c = Coordinate::new(2, 2);
        assert!(c.is_adjacent_to(Coordinate::new(1, 2)));
        assert!(c.is_adjacent_to(Coordinate::new(2, 3)));
        assert!(!c.is_adjacent_to(Coordinate::new(3, 3)));
        assert!(!c.is_adjacent_to(Coordinate::new(2, 2)));
        assert!(!c.is_adjacent_to(Coordinate::new(4, 2)));
    }

    #[test]
    fn test_center_has_four_neighbors() {
        let n: Vec<_> = Coordinate::new(2, 2).adjacent_coordinates(5, 5).collect();
        assert_eq!(n.len(), 4);
        assert!(n.iter().all(|&m| m.is_adjacent_to(Coordinate::new(2, 2))));
    }

    #[test]
    fn test_corner_neighbors_stay_on_board() {
        let origin: Vec<_> = Coordinate::new(0, 0).adjacent_coordinates(5, 5).collect();
        assert_eq!(origin, vec![Coordinate::new(0, 1), Coordinate::new(1, 0)]);

        // The far corner must not leak to column/row == width/height.
        let far: Vec<_> = Coordinate::new(4, 4).adjacent_coordinates(5, 5).collect();
        assert_eq!(far, vec![Coordinate::new(4, 3), Coordinate::new(3, 4)]);
    }

    #[test]
    fn test_rectangular_bounds() {
        let n: Vec<_> = Coordinate::new(6, 0).adjacent_coordinates(7, 2).collect();
        assert_eq!(n, vec![Coordinate::new(6, 1), Coordinate::new(5, 0)]);
        assert!(!Coordinate::new(0, 2).in_bounds(7, 2));
    }

    #[test]
    fn test_vertex_roundtrip() {
        for row in 0..19 {
            for column in 0..19 {
                let c = Coordinate::new(column, row);
                let v = c.to_vertex(19).unwrap();
                assert_eq!(parse_vertex(&v, 19), Ok(c), "roundtrip failed for {v}");
            }
        }
    }

    #[test]
    fn test_vertex_skips_i() {
        assert_eq!(parse_vertex("H1", 9).unwrap().column, 7);
        assert_eq!(parse_vertex("J1", 9).unwrap().column, 8);
        assert!(parse_vertex("I1", 9).is_err());
    }

    #[test]
    fn test_vertex_rows_count_from_bottom() {
        assert_eq!(parse_vertex("a1", 9), Ok(Coordinate::new(0, 8)));
        assert_eq!(parse_vertex("A9", 9), Ok(Coordinate::new(0, 0)));
        assert!(parse_vertex("A10", 9).is_err());
        assert!(parse_vertex("A0", 9).is_err());
        assert!(parse_vertex("", 9).is_err());
    }
}
