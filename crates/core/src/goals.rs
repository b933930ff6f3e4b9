//! Goal tracker - per-obstacle destruction quotas
//!
//! Goals are created once from the initial grid: one goal for every goal kind
//! (box, stone, vase) that appears at least once. Membership never changes
//! afterwards; only `remaining` counts down.

use crate::grid::Grid;
use crate::types::ObstacleKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub kind: ObstacleKind,
    pub remaining: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalTracker {
    goals: Vec<Goal>,
}

impl GoalTracker {
    /// Count every goal-kind obstacle in `grid`.
    pub fn from_grid(grid: &Grid) -> Self {
        let goals = ObstacleKind::ALL
            .into_iter()
            .filter(ObstacleKind::is_goal)
            .filter_map(|kind| {
                let count = grid
                    .cells()
                    .iter()
                    .filter(|c| c.obstacle() == Some(kind))
                    .count() as u32;
                (count > 0).then_some(Goal {
                    kind,
                    remaining: count,
                })
            })
            .collect();
        Self { goals }
    }

    /// Count one destroyed obstacle of `kind`.
    ///
    /// Returns the new remaining count, or `None` if no goal tracks `kind`.
    /// Counts never go below zero.
    pub fn decrement(&mut self, kind: ObstacleKind) -> Option<u32> {
        let goal = self.goals.iter_mut().find(|g| g.kind == kind)?;
        goal.remaining = goal.remaining.saturating_sub(1);
        Some(goal.remaining)
    }

    /// True once every goal has reached zero. Vacuously true with no goals.
    pub fn is_cleared(&self) -> bool {
        self.goals.iter().all(|g| g.remaining == 0)
    }

    pub fn remaining(&self, kind: ObstacleKind) -> Option<u32> {
        self.goals.iter().find(|g| g.kind == kind).map(|g| g.remaining)
    }

    pub fn total_remaining(&self) -> u32 {
        self.goals.iter().map(|g| g.remaining).sum()
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}
