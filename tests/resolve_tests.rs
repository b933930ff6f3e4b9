//! Destruction tests - obstacles, TNT chains and goal counting

use cube_blast::core::{find_match, resolve, GoalTracker, Grid, LevelSpec, Rules, SimpleRng};
use cube_blast::types::{GameEvent, ObstacleKind, Occupant, Position};

fn build(width: usize, height: usize, codes: &[&str]) -> Grid {
    LevelSpec::new(width, height, 10, codes.iter().copied())
        .build_grid(&mut SimpleRng::new(1))
        .unwrap()
}

fn resolve_click(
    grid: &mut Grid,
    goals: &mut GoalTracker,
    pos: Position,
    rules: &Rules,
) -> (cube_blast::core::Resolution, Vec<GameEvent>) {
    let matched = find_match(grid, pos).unwrap();
    let mut events = Vec::new();
    let res = resolve(grid, goals, &matched, rules, &mut events).unwrap();
    (res, events)
}

#[test]
fn test_tnt_chain_clears_union_of_blasts() {
    // 7x5. Two TNTs in row 0, within each other's radius.
    #[rustfmt::skip]
    let codes = [
        "r", "r", "t", "g", "t", "b", "g",
        "b", "g", "b", "g", "b", "g", "b",
        "g", "b", "g", "b", "g", "b", "g",
        "b", "g", "b", "g", "b", "g", "b",
        "g", "b", "g", "b", "g", "b", "g",
    ];
    let mut grid = build(7, 5, &codes);
    let mut goals = GoalTracker::from_grid(&grid);
    let (res, events) = resolve_click(&mut grid, &mut goals, Position::new(0, 0), &Rules::default());

    assert_eq!(res.detonated, vec![Position::new(2, 0), Position::new(4, 0)]);
    // Rows 0..=2 across the full width.
    assert_eq!(res.cleared.len(), 21);
    for x in 0..7 {
        for y in 0..5 {
            let empty = grid.get(Position::new(x, y)).unwrap().is_empty();
            assert_eq!(empty, y <= 2, "cell ({}, {})", x, y);
        }
    }
    let cleared_events = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CellCleared { .. }))
        .count();
    assert_eq!(cleared_events, 21);
}

#[test]
fn test_each_tnt_cleared_once() {
    // Three TNTs packed together: every one is inside every other blast.
    let codes = ["r", "r", "t", "t", "t"];
    let mut grid = build(5, 1, &codes);
    let mut goals = GoalTracker::from_grid(&grid);
    let (res, events) = resolve_click(&mut grid, &mut goals, Position::new(0, 0), &Rules::default());

    assert_eq!(res.detonated.len(), 3);
    let tnt_clears = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                GameEvent::CellCleared {
                    occupant: Occupant::Tnt,
                    ..
                }
            )
        })
        .count();
    assert_eq!(tnt_clears, 3);
}

#[test]
fn test_blast_counts_goal_obstacles_once() {
    // Row 1: s bo s
    // Row 0: r r t
    let mut grid = build(3, 2, &["r", "r", "t", "s", "bo", "s"]);
    let mut goals = GoalTracker::from_grid(&grid);
    let (res, _) = resolve_click(&mut grid, &mut goals, Position::new(0, 0), &Rules::default());

    // The box and the left stone break by adjacency before the blast reaches
    // them. Each still counts once.
    assert_eq!(res.goals_hit, 3);
    assert_eq!(goals.remaining(ObstacleKind::Stone), Some(0));
    assert_eq!(goals.remaining(ObstacleKind::Box), Some(0));
    assert!(goals.is_cleared());
}

#[test]
fn test_stone_survives_adjacency_when_tnt_required() {
    let rules = Rules {
        stone_requires_tnt: true,
        ..Rules::default()
    };
    // Row 1: s g
    // Row 0: r r
    let mut grid = build(2, 2, &["r", "r", "s", "g"]);
    let mut goals = GoalTracker::from_grid(&grid);
    let (res, _) = resolve_click(&mut grid, &mut goals, Position::new(0, 0), &rules);

    assert_eq!(res.goals_hit, 0);
    assert_eq!(grid.get(Position::new(0, 1)).unwrap(), Occupant::Stone);
    assert_eq!(goals.remaining(ObstacleKind::Stone), Some(1));
}

#[test]
fn test_single_hit_vase_rule() {
    let rules = Rules {
        vase_hits: 1,
        ..Rules::default()
    };
    let mut grid = build(3, 1, &["b", "b", "v"]);
    let mut goals = GoalTracker::from_grid(&grid);
    let (res, events) = resolve_click(&mut grid, &mut goals, Position::new(0, 0), &rules);

    assert!(res.damaged.is_empty());
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::CellDamaged { .. })));
    assert_eq!(goals.remaining(ObstacleKind::Vase), Some(0));
}

#[test]
fn test_events_follow_stage_order() {
    // Row 1: v bo
    // Row 0: y y
    let mut grid = build(2, 2, &["y", "y", "v", "bo"]);
    let mut goals = GoalTracker::from_grid(&grid);
    let (_, events) = resolve_click(&mut grid, &mut goals, Position::new(1, 0), &Rules::default());

    let rank = |e: &GameEvent| match e {
        GameEvent::CellDamaged { .. } => 0,
        GameEvent::GoalChanged { .. } => 1,
        GameEvent::CellCleared { .. } => 2,
        _ => 3,
    };
    let ranks: Vec<_> = events.iter().map(rank).collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted);
    assert_eq!(ranks.first(), Some(&0));
    assert!(events.contains(&GameEvent::GoalChanged {
        kind: ObstacleKind::Box,
        remaining: 0
    }));
}
