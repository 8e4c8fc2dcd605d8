use crate::color::Color;
use crate::error::GameError;
use crate::group::GroupId;

/// The state of a single intersection.
///
/// A cell is empty exactly when it has no group; the game keeps the two
/// fields in step.
#[derive(Copy, Clone, Debug, Default)]
pub struct Cell {
    pub(crate) occupant: Option<Color>,
    pub(crate) group: Option<GroupId>,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// The stone color on this cell.
    ///
    /// Check [`Cell::is_empty`] first; an empty cell yields [`GameError::EmptyCell`].
    pub fn color(&self) -> Result<Color, GameError> {
        self.occupant.ok_or(GameError::EmptyCell)
    }

    /// The stone color, or `None` for an empty cell.
    pub fn occupant(&self) -> Option<Color> {
        self.occupant
    }

    /// Handle of the group owning the stone, `None` for an empty cell.
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub(crate) fn clear(&mut self) {
        self.occupant = None;
        self.group = None;
    }
}

/// State equality: two cells are equal when both are empty, both black, or
/// both white. Group membership is ignored.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.occupant == other.occupant
    }
}

impl Eq for Cell {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell() {
        let cell = Cell::default();
        assert!(cell.is_empty());
        assert_eq!(cell.color(), Err(GameError::EmptyCell));
        assert_eq!(cell.group(), None);
    }

    #[test]
    fn test_equality_ignores_group() {
        let a = Cell {
            occupant: Some(Color::Black),
            group: Some(GroupId(1)),
        };
        let b = Cell {
            occupant: Some(Color::Black),
            group: Some(GroupId(2)),
        };
        let w = Cell {
            occupant: Some(Color::White),
            group: Some(GroupId(1)),
        };
        assert_eq!(a, b);
        assert_ne!(a, w);
        assert_ne!(a, Cell::default());
    }

    #[test]
    fn test_clear() {
        let mut cell = Cell {
            occupant: Some(Color::White),
            group: Some(GroupId(3)),
        };
        assert_eq!(cell.color(), Ok(Color::White));
        cell.clear();
        assert!(cell.is_empty());
        assert_eq!(cell.group(), None);
    }
}
