//! Integration tests for the rules engine.
//!
//! Positions are set up by playing moves from an empty board; `pass` is used
//! wherever one color needs two stones in a row.

use go_rules::color::Color;
use go_rules::coordinate::Coordinate;
use go_rules::error::{GameError, MoveError};
use go_rules::game::{Game, Move, MoveResult};
use go_rules::ruleset::Ruleset;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

fn xy(column: usize, row: usize) -> Coordinate {
    Coordinate::new(column, row)
}

/// Play a sequence of moves alternating Black and White. `None` passes.
/// Panics if any move is illegal.
fn setup(ruleset: Ruleset, width: usize, height: usize, moves: &[Option<(usize, usize)>]) -> Game {
    let mut game = Game::new(ruleset, width, height).unwrap();
    for &mv in moves {
        match mv {
            Some((column, row)) => {
                if let Err(e) = game.play(xy(column, row)) {
                    panic!("illegal move ({column},{row}) in setup: {e}");
                }
            }
            None => game.pass(),
        }
    }
    game.check_consistency().unwrap();
    game
}

/// Everything observable about a game, for before/after comparisons.
fn snapshot(game: &Game) -> String {
    format!("{game:#}")
}

fn libs(game: &Game, at: Coordinate) -> Vec<Coordinate> {
    game.group_at(at)
        .unwrap()
        .liberties()
        .iter()
        .copied()
        .collect()
}

// =============================================================================
// Turn order and passing
// =============================================================================

#[test]
fn test_player_alternates() {
    let mut game = Game::new(Ruleset::Japanese, 9, 9).unwrap();
    assert_eq!(game.player_to_move(), Color::Black);

    game.play(xy(2, 2)).unwrap();
    assert_eq!(game.player_to_move(), Color::White);
    game.pass();
    assert_eq!(game.player_to_move(), Color::Black);
    game.pass();
    assert_eq!(game.player_to_move(), Color::White);
    game.play(xy(3, 3)).unwrap();
    assert_eq!(game.player_to_move(), Color::Black);

    assert_eq!(
        game.history(),
        &[Move::Place(xy(2, 2)), Move::Pass, Move::Pass, Move::Place(xy(3, 3))]
    );
    assert_eq!(game.cell(xy(3, 3)).unwrap().color(), Ok(Color::White));
}

#[test]
fn test_pass_changes_only_history() {
    let mut game = setup(
        Ruleset::Japanese,
        5,
        5,
        &[Some((1, 0)), Some((0, 0)), Some((0, 1))],
    );
    let board: Vec<_> = game.coordinates().map(|c| *game.cell(c).unwrap()).collect();
    let groups: Vec<_> = game.groups().map(|(id, g)| (id, g.clone())).collect();
    let captures = (game.captures(Color::Black), game.captures(Color::White));

    for n in 1..=5 {
        game.pass();
        assert_eq!(game.move_number(), 3 + n);
    }

    let board_after: Vec<_> = game.coordinates().map(|c| *game.cell(c).unwrap()).collect();
    let groups_after: Vec<_> = game.groups().map(|(id, g)| (id, g.clone())).collect();
    assert_eq!(board, board_after);
    assert_eq!(groups, groups_after);
    assert_eq!(captures, (game.captures(Color::Black), game.captures(Color::White)));
    assert_eq!(game.last_move(), Some(Move::Pass));
}

// =============================================================================
// Illegal moves
// =============================================================================

#[test]
fn test_occupied_point_is_rejected() {
    let mut game = setup(Ruleset::Japanese, 9, 9, &[Some((4, 4))]);
    let before = snapshot(&game);

    assert_eq!(game.play(xy(4, 4)), Err(MoveError::Occupied));
    assert!(!game.is_legal(xy(4, 4)));
    assert_eq!(snapshot(&game), before);
    assert_eq!(game.player_to_move(), Color::White);
}

#[test]
fn test_out_of_bounds_is_rejected() {
    let mut game = Game::new(Ruleset::Japanese, 7, 3).unwrap();
    assert_eq!(game.play(xy(7, 0)), Err(MoveError::OutOfBounds(xy(7, 0))));
    assert_eq!(game.play(xy(0, 3)), Err(MoveError::OutOfBounds(xy(0, 3))));
    assert!(matches!(game.cell(xy(7, 3)), Err(GameError::OutOfBounds { .. })));
    assert!(game.play(xy(6, 2)).is_ok());
}

#[test]
fn test_empty_cell_has_no_color() {
    let game = Game::new(Ruleset::Japanese, 3, 3).unwrap();
    let cell = game.cell(xy(1, 1)).unwrap();
    assert!(cell.is_empty());
    assert_eq!(cell.color(), Err(GameError::EmptyCell));
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn test_capture_surrounded_stone() {
    // White at (2,2); Black closes in from all four sides.
    let mut game = setup(
        Ruleset::Japanese,
        5,
        5,
        &[
            Some((1, 2)),
            Some((2, 2)),
            Some((3, 2)),
            None,
            Some((2, 1)),
            None,
        ],
    );
    assert_eq!(game.cell(xy(2, 2)).unwrap().color(), Ok(Color::White));

    let result = game.play(xy(2, 3)).unwrap();
    assert_eq!(
        result,
        MoveResult {
            captures: 1,
            suicide: false
        }
    );
    assert!(game.cell(xy(2, 2)).unwrap().is_empty());
    assert_eq!(game.captures(Color::Black), 1);
    assert_eq!(game.captures(Color::White), 0);

    // The vacated point is a liberty of every surrounding black stone.
    for at in [xy(1, 2), xy(3, 2), xy(2, 1), xy(2, 3)] {
        assert!(libs(&game, at).contains(&xy(2, 2)), "{at} lacks (2,2)");
    }
    game.check_consistency().unwrap();
}

#[test]
fn test_capture_in_corner() {
    let mut game = setup(Ruleset::Japanese, 9, 9, &[Some((1, 0)), Some((0, 0))]);
    let white = game.cell(xy(0, 0)).unwrap().group().unwrap();
    assert_eq!(game.group(white).unwrap().liberties().len(), 1);

    assert_eq!(game.play(xy(0, 1)).unwrap().captures, 1);
    assert!(game.group(white).is_err());
    assert_eq!(libs(&game, xy(1, 0)), vec![xy(0, 0), xy(1, 1), xy(2, 0)]);
}

#[test]
fn test_capture_multiple_groups() {
    // Two separate white stones on the edge share their last liberty at (2,0).
    let mut game = setup(
        Ruleset::Japanese,
        5,
        5,
        &[
            Some((0, 0)),
            Some((1, 0)),
            Some((1, 1)),
            Some((3, 0)),
            Some((3, 1)),
            None,
            Some((4, 0)),
            None,
        ],
    );
    assert_eq!(libs(&game, xy(1, 0)), vec![xy(2, 0)]);
    assert_eq!(libs(&game, xy(3, 0)), vec![xy(2, 0)]);

    let result = game.play(xy(2, 0)).unwrap();
    assert_eq!(result.captures, 2);
    assert_eq!(game.captures(Color::Black), 2);
    assert!(game.cell(xy(1, 0)).unwrap().is_empty());
    assert!(game.cell(xy(3, 0)).unwrap().is_empty());
    assert_eq!(game.groups().filter(|(_, g)| g.color() == Color::White).count(), 0);
    game.check_consistency().unwrap();
}

#[test]
fn test_capture_before_suicide_check() {
    // White fills the corner with no empty neighbor, but takes the black
    // stone at (1,0) first, so the move is legal.
    let mut game = setup(
        Ruleset::Japanese,
        5,
        5,
        &[
            Some((1, 0)),
            Some((2, 0)),
            Some((0, 1)),
            Some((1, 1)),
            Some((4, 4)),
        ],
    );
    assert!(game.is_legal(xy(0, 0)));

    let result = game.play(xy(0, 0)).unwrap();
    assert_eq!(result.captures, 1);
    assert!(!result.suicide);
    assert_eq!(game.captures(Color::White), 1);
    assert_eq!(libs(&game, xy(0, 0)), vec![xy(1, 0)]);
    game.check_consistency().unwrap();
}

// =============================================================================
// Suicide
// =============================================================================

fn corner_suicide_setup(ruleset: Ruleset) -> Game {
    // Black at (1,0) and (0,1); White to play at (0,0).
    setup(ruleset, 5, 5, &[Some((1, 0)), None, Some((0, 1))])
}

#[test]
fn test_suicide_forbidden_leaves_board_unchanged() {
    for ruleset in [Ruleset::Japanese, Ruleset::Aga, Ruleset::Chinese] {
        let mut game = corner_suicide_setup(ruleset);
        let before = snapshot(&game);

        assert!(!game.is_legal(xy(0, 0)));
        assert_eq!(game.play(xy(0, 0)), Err(MoveError::Suicide));
        assert_eq!(snapshot(&game), before);
        assert_eq!(game.player_to_move(), Color::White);
        game.check_consistency().unwrap();
    }
}

#[test]
fn test_suicide_allowed_removes_stone() {
    for ruleset in [Ruleset::NewZealand, Ruleset::TrompTaylor] {
        let mut game = corner_suicide_setup(ruleset);

        let result = game.play(xy(0, 0)).unwrap();
        assert!(result.suicide);
        assert_eq!(result.captures, 0);
        assert!(game.cell(xy(0, 0)).unwrap().is_empty());
        assert_eq!(game.captures(Color::Black), 0);
        assert_eq!(game.captures(Color::White), 0);
        assert_eq!(game.last_move(), Some(Move::Place(xy(0, 0))));
        assert_eq!(game.player_to_move(), Color::Black);

        // The black stones get their liberty back.
        assert!(libs(&game, xy(1, 0)).contains(&xy(0, 0)));
        assert!(libs(&game, xy(0, 1)).contains(&xy(0, 0)));
        game.check_consistency().unwrap();
    }
}

#[test]
fn test_multi_stone_suicide() {
    // 3x2 board: White (0,0) then (0,1) walls itself in against Black (1,0),(1,1).
    let moves = [Some((1, 0)), Some((0, 0)), Some((1, 1))];

    let mut game = setup(Ruleset::Japanese, 3, 2, &moves);
    assert_eq!(game.play(xy(0, 1)), Err(MoveError::Suicide));
    assert_eq!(game.cell(xy(0, 0)).unwrap().color(), Ok(Color::White));

    let mut game = setup(Ruleset::TrompTaylor, 3, 2, &moves);
    let result = game.play(xy(0, 1)).unwrap();
    assert!(result.suicide);
    assert!(game.cell(xy(0, 0)).unwrap().is_empty());
    assert!(game.cell(xy(0, 1)).unwrap().is_empty());
    assert_eq!(game.captures(Color::Black), 0);
    assert_eq!(libs(&game, xy(1, 0)), vec![xy(0, 0), xy(0, 1), xy(2, 0), xy(2, 1)]);
    game.check_consistency().unwrap();
}

#[test]
fn test_filling_own_last_liberty_is_suicide() {
    // Both black corner stones are left with (0,0) as their only liberty.
    let mut game = setup(
        Ruleset::Japanese,
        4,
        4,
        &[
            Some((1, 0)),
            Some((2, 0)),
            Some((0, 1)),
            Some((1, 1)),
            None,
            Some((0, 2)),
        ],
    );
    assert_eq!(game.play(xy(0, 0)), Err(MoveError::Suicide));
}

// =============================================================================
// Groups
// =============================================================================

#[test]
fn test_merge_two_groups() {
    let mut game = setup(
        Ruleset::Japanese,
        5,
        5,
        &[Some((0, 0)), Some((4, 4)), Some((2, 0)), Some((4, 3))],
    );
    let left = game.cell(xy(0, 0)).unwrap().group().unwrap();
    let right = game.cell(xy(2, 0)).unwrap().group().unwrap();
    assert_ne!(left, right);

    game.play(xy(1, 0)).unwrap();

    let id = game.cell(xy(1, 0)).unwrap().group().unwrap();
    assert_eq!(game.cell(xy(0, 0)).unwrap().group(), Some(id));
    assert_eq!(game.cell(xy(2, 0)).unwrap().group(), Some(id));
    assert_eq!(game.groups().filter(|(_, g)| g.color() == Color::Black).count(), 1);

    let group = game.group(id).unwrap();
    assert_eq!(
        group.stones().iter().copied().collect::<Vec<_>>(),
        vec![xy(0, 0), xy(1, 0), xy(2, 0)]
    );
    // Prior liberties {(0,1),(1,0)} and {(1,0),(2,1),(3,0)}, minus (1,0),
    // plus the new stone's own empty neighbor (1,1).
    assert_eq!(libs(&game, xy(1, 0)), vec![xy(0, 1), xy(1, 1), xy(2, 1), xy(3, 0)]);

    // One of the two old handles is now stale.
    assert!(game.group(left).is_err() || game.group(right).is_err());
    game.check_consistency().unwrap();
}

#[test]
fn test_merge_four_groups() {
    let mut game = setup(
        Ruleset::Japanese,
        5,
        5,
        &[
            Some((1, 2)),
            None,
            Some((3, 2)),
            None,
            Some((2, 1)),
            None,
            Some((2, 3)),
            None,
        ],
    );
    assert_eq!(game.groups().count(), 4);

    game.play(xy(2, 2)).unwrap();
    assert_eq!(game.groups().count(), 1);
    let group = game.group_at(xy(2, 2)).unwrap();
    assert_eq!(group.len(), 5);
    assert_eq!(group.liberties().len(), 8);
    game.check_consistency().unwrap();
}

#[test]
fn test_liberty_shared_by_opponents() {
    let mut game = setup(Ruleset::Japanese, 5, 5, &[Some((1, 1)), Some((3, 1))]);
    assert!(libs(&game, xy(1, 1)).contains(&xy(2, 1)));
    assert!(libs(&game, xy(3, 1)).contains(&xy(2, 1)));

    game.play(xy(2, 1)).unwrap();
    assert!(!libs(&game, xy(3, 1)).contains(&xy(2, 1)));
    assert_eq!(libs(&game, xy(3, 1)).len(), 3);
    assert_eq!(libs(&game, xy(1, 1)).len(), 5);
    game.check_consistency().unwrap();
}

#[test]
fn test_rectangular_board_edges() {
    let mut game = Game::new(Ruleset::Chinese, 7, 2).unwrap();
    game.play(xy(6, 1)).unwrap();
    assert_eq!(libs(&game, xy(6, 1)), vec![xy(5, 1), xy(6, 0)]);

    let mut line = Game::new(Ruleset::Chinese, 1, 1).unwrap();
    assert_eq!(line.play(xy(0, 0)), Err(MoveError::Suicide));
    line.pass();
    assert_eq!(line.move_number(), 1);
}
