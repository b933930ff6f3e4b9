//! Integration tests - full click cycles through GameState

use cube_blast::core::{GameState, LevelSpec, Rules, SimpleRng};
use cube_blast::types::{GameEvent, GameStatus, ObstacleKind, Position, RejectReason};

fn level(width: usize, height: usize, moves: u32, codes: &[&str]) -> LevelSpec {
    LevelSpec::new(width, height, moves, codes.iter().copied())
}

#[test]
fn test_box_level_won_in_one_move() {
    let mut codes = vec!["r"; 16];
    codes[0] = "bo";
    let mut game = GameState::new(level(4, 4, 5, &codes), 12345).unwrap();
    assert_eq!(game.goals().remaining(ObstacleKind::Box), Some(1));

    let events = game.click(Position::new(3, 3)).unwrap();

    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.moves_left(), 4);
    assert_eq!(game.grid().count_empty(), 0);

    // Goal update, then 16 clears, then gravity/refill, then bookkeeping.
    assert_eq!(
        events[0],
        GameEvent::GoalChanged {
            kind: ObstacleKind::Box,
            remaining: 0
        }
    );
    let clears = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CellCleared { .. }))
        .count();
    assert_eq!(clears, 16);
    let fills = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CellFilled { from: None, .. }))
        .count();
    assert_eq!(fills, 16);
    let n = events.len();
    assert_eq!(events[n - 2], GameEvent::MovesChanged { moves_left: 4 });
    assert_eq!(events[n - 1], GameEvent::GameEnded { status: GameStatus::Won });
}

#[test]
fn test_last_move_without_goal_loses() {
    // Row 1: g b bo
    // Row 0: r r g
    let mut game = GameState::new(level(3, 2, 1, &["r", "r", "g", "g", "b", "bo"]), 1).unwrap();
    let events = game.click(Position::new(0, 0)).unwrap();

    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(game.moves_left(), 0);
    assert_eq!(events.last(), Some(&GameEvent::GameEnded { status: GameStatus::Lost }));

    // Further clicks are rejected and change nothing.
    let before = game.snapshot();
    let events = game.click(Position::new(1, 0)).unwrap();
    assert_eq!(
        events,
        vec![GameEvent::MoveRejected {
            reason: RejectReason::GameOver
        }]
    );
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_clearing_goal_on_last_move_wins() {
    // Row 1: bo g
    // Row 0: r  r
    let mut game = GameState::new(level(2, 2, 1, &["r", "r", "bo", "g"]), 1).unwrap();
    game.click(Position::new(1, 0)).unwrap();
    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.moves_left(), 0);
}

#[test]
fn test_rejected_click_keeps_move_budget() {
    let mut game = GameState::new(level(3, 1, 2, &["r", "g", "b"]), 1).unwrap();
    for x in 0..3 {
        let events = game.click(Position::new(x, 0)).unwrap();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::MoveRejected {
                reason: RejectReason::MatchTooSmall { size: 1 }
            }]
        ));
    }
    assert_eq!(game.moves_left(), 2);
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn test_larger_minimum_match() {
    let rules = Rules {
        min_match: 3,
        ..Rules::default()
    };
    let mut game = GameState::with_rules(level(3, 1, 2, &["r", "r", "g"]), 1, rules).unwrap();
    let events = game.click(Position::new(0, 0)).unwrap();
    assert_eq!(
        events,
        vec![GameEvent::MoveRejected {
            reason: RejectReason::MatchTooSmall { size: 2 }
        }]
    );
}

#[test]
fn test_malformed_level_is_refused() {
    assert!(GameState::new(level(3, 3, 5, &["r"; 8]), 1).is_err());
}

#[test]
fn test_same_seed_same_game() {
    let spec = level(5, 5, 20, &["rand"; 25]);
    let mut a = GameState::new(spec.clone(), 77).unwrap();
    let mut b = GameState::new(spec, 77).unwrap();

    for i in 0..25 {
        let pos = Position::new(i % 5, i / 5);
        assert_eq!(a.click(pos).unwrap(), b.click(pos).unwrap());
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

/// Random level with a sprinkling of every obstacle.
fn random_level(rng: &mut SimpleRng, width: usize, height: usize, moves: u32) -> LevelSpec {
    const CODES: [&str; 9] = ["r", "g", "b", "y", "rand", "bo", "s", "v", "t"];
    let codes: Vec<&str> = (0..width * height)
        .map(|_| CODES[rng.next_range(CODES.len() as u32) as usize])
        .collect();
    LevelSpec::new(width, height, moves, codes)
}

#[test]
fn test_random_play_keeps_invariants() {
    for seed in 1..60u32 {
        let mut rng = SimpleRng::new(seed);
        let spec = random_level(&mut rng, 6, 7, 15);
        let mut game = GameState::new(spec, seed).unwrap();

        for _ in 0..40 {
            let before_total = game.goals().total_remaining();
            let before_moves = game.moves_left();
            let was_terminal = game.status().is_terminal();
            let pos = Position::new(rng.next_range(6) as i32, rng.next_range(7) as i32);

            let events = game.click(pos).unwrap();
            let accepted = !matches!(events.as_slice(), [GameEvent::MoveRejected { .. }]);

            // No empty cell survives a cycle.
            assert_eq!(game.grid().count_empty(), 0, "seed {}", seed);

            // Goal counts track exactly the goal obstacles still on the grid.
            for goal in game.goals().goals() {
                let on_grid = game
                    .grid()
                    .cells()
                    .iter()
                    .filter(|c| c.obstacle() == Some(goal.kind))
                    .count() as u32;
                assert_eq!(goal.remaining, on_grid, "seed {}", seed);
            }
            assert!(game.goals().total_remaining() <= before_total);

            assert_eq!(game.moves_left() + game.moves_made(), 15);
            if was_terminal {
                assert!(!accepted);
            }
            if accepted {
                assert_eq!(game.moves_left(), before_moves - 1);
                let ended = events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::GameEnded { .. }))
                    .count();
                assert_eq!(ended, usize::from(game.status().is_terminal()));
                if game.status() == GameStatus::Won {
                    assert!(game.goals().is_cleared());
                }
            } else {
                assert_eq!(events.len(), 1);
                assert_eq!(game.moves_left(), before_moves);
            }
        }
    }
}
