//! Match finder - breadth-first flood fill over same-colored cubes
//!
//! The result is the maximal 4-connected group of cubes sharing the seed's
//! color. Neighbors are explored left, right, down, up, so the output order is
//! reproducible for a given grid.

use std::collections::VecDeque;

use crate::error::{CoreError, CoreResult};
use crate::grid::Grid;
use crate::types::Position;

/// Find the connected same-color group containing `seed`.
///
/// Fails with `OutOfBounds` for a seed outside the grid and `InvalidOccupant`
/// if the seed is not a cube. The seed is always the first element.
pub fn find_match(grid: &Grid, seed: Position) -> CoreResult<Vec<Position>> {
    let color = grid
        .get(seed)?
        .color()
        .ok_or(CoreError::InvalidOccupant {
            x: seed.x,
            y: seed.y,
        })?;

    let width = grid.width();
    let slot = |p: Position| p.y as usize * width + p.x as usize;

    let mut visited = vec![false; width * grid.height()];
    let mut matched = Vec::new();
    let mut queue = VecDeque::new();

    visited[slot(seed)] = true;
    queue.push_back(seed);

    while let Some(current) = queue.pop_front() {
        matched.push(current);
        for n in grid.neighbors(current)? {
            if visited[slot(n)] {
                continue;
            }
            if grid.get(n)?.color() == Some(color) {
                visited[slot(n)] = true;
                queue.push_back(n);
            }
        }
    }

    Ok(matched)
}
