//! Destruction resolver - turns a matched group into cleared cells
//!
//! The stages run in a fixed order and the order is part of the contract:
//!
//! 1. Every matched cube joins the destroy-set.
//! 2. Obstacles next to a matched cube take a hit. Boxes and stones break,
//!    vases break once their hit count reaches [`Rules::vase_hits`], TNT is
//!    queued for detonation.
//! 3. Queued TNT detonates: the TNT and every occupant within the blast
//!    radius join the destroy-set. A TNT caught in a blast detonates as well,
//!    each TNT at most once.
//! 4. Each destroyed goal obstacle decrements its goal.
//! 5. Every cell in the destroy-set is cleared.
//!
//! Swapping stages 2 and 3 or interleaving 4 with 5 changes chain reactions and
//! goal counts.

use std::collections::VecDeque;

use log::debug;

use crate::error::CoreResult;
use crate::goals::GoalTracker;
use crate::grid::Grid;
use crate::rules::Rules;
use crate::types::{GameEvent, Occupant, Position};

/// Summary of one resolver pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Cleared cells in destroy-set order, with the occupant each held.
    pub cleared: Vec<(Position, Occupant)>,
    /// Vases that took a hit and survived.
    pub damaged: Vec<(Position, Occupant)>,
    /// TNT positions in detonation order.
    pub detonated: Vec<Position>,
    /// Goal obstacles destroyed (each one decremented a goal).
    pub goals_hit: u32,
}

/// Insertion-ordered set of grid positions.
struct CellSet {
    width: usize,
    member: Vec<bool>,
    order: Vec<Position>,
}

impl CellSet {
    fn new(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            member: vec![false; grid.width() * grid.height()],
            order: Vec::new(),
        }
    }

    fn slot(&self, pos: Position) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    fn contains(&self, pos: Position) -> bool {
        self.member[self.slot(pos)]
    }

    /// Returns false if `pos` was already present.
    fn insert(&mut self, pos: Position) -> bool {
        let slot = self.slot(pos);
        if self.member[slot] {
            return false;
        }
        self.member[slot] = true;
        self.order.push(pos);
        true
    }
}

/// Apply the destruction stages for `matched`, mutating `grid` and `goals` and
/// appending events in stage order.
pub fn resolve(
    grid: &mut Grid,
    goals: &mut GoalTracker,
    matched: &[Position],
    rules: &Rules,
    events: &mut Vec<GameEvent>,
) -> CoreResult<Resolution> {
    let mut resolution = Resolution::default();
    let mut destroy = CellSet::new(grid);

    // Stage 1
    for &pos in matched {
        destroy.insert(pos);
    }

    // Stage 2
    let mut vase_hit = CellSet::new(grid);
    let mut fuses: VecDeque<Position> = VecDeque::new();
    for &pos in matched {
        for n in grid.neighbors(pos)? {
            match grid.get(n)? {
                Occupant::Box => {
                    destroy.insert(n);
                }
                Occupant::Stone if !rules.stone_requires_tnt => {
                    destroy.insert(n);
                }
                Occupant::Vase { hits } => {
                    if !vase_hit.insert(n) {
                        continue;
                    }
                    let hits = hits.saturating_add(1);
                    if hits >= rules.vase_hits {
                        destroy.insert(n);
                    } else {
                        let cracked = Occupant::Vase { hits };
                        grid.set(n, cracked)?;
                        resolution.damaged.push((n, cracked));
                    }
                }
                Occupant::Tnt => fuses.push_back(n),
                _ => {}
            }
        }
    }
    debug!(
        "resolve: {} matched, {} in destroy-set after adjacency, {} fuse(s) lit",
        matched.len(),
        destroy.order.len(),
        fuses.len()
    );

    // Stage 3
    let mut detonated = CellSet::new(grid);
    while let Some(tnt) = fuses.pop_front() {
        if !detonated.insert(tnt) {
            continue;
        }
        resolution.detonated.push(tnt);
        destroy.insert(tnt);

        let blast: Vec<Position> = grid.area(tnt, rules.blast_radius).collect();
        for pos in blast {
            let occupant = grid.get(pos)?;
            if occupant.is_empty() {
                continue;
            }
            if occupant == Occupant::Tnt && !detonated.contains(pos) {
                fuses.push_back(pos);
            }
            destroy.insert(pos);
        }
    }
    if !resolution.detonated.is_empty() {
        debug!(
            "resolve: {} TNT detonated, destroy-set now {}",
            resolution.detonated.len(),
            destroy.order.len()
        );
    }

    // A vase cracked in stage 2 and then caught in a blast is simply destroyed.
    resolution.damaged.retain(|(pos, _)| !destroy.contains(*pos));
    for &(pos, occupant) in &resolution.damaged {
        events.push(GameEvent::CellDamaged { pos, occupant });
    }

    // Stage 4
    for &pos in &destroy.order {
        let Some(kind) = grid.get(pos)?.obstacle() else {
            continue;
        };
        if let Some(remaining) = goals.decrement(kind) {
            resolution.goals_hit += 1;
            events.push(GameEvent::GoalChanged { kind, remaining });
        }
    }

    // Stage 5
    for &pos in &destroy.order {
        let occupant = grid.set(pos, Occupant::Empty)?;
        events.push(GameEvent::CellCleared { pos, occupant });
        resolution.cleared.push((pos, occupant));
    }

    debug!(
        "resolve: cleared {} cell(s), {} goal obstacle(s), {} goal(s) left",
        resolution.cleared.len(),
        resolution.goals_hit,
        goals.total_remaining()
    );
    Ok(resolution)
}
