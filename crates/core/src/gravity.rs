//! Gravity & refill - compacts columns and tops them up with new cubes
//!
//! Every occupant falls, obstacles included, keeping its vertical order within
//! the column. Only cubes are ever generated: a destroyed obstacle never comes
//! back. After [`settle`] no cell is empty.

use log::debug;

use crate::error::CoreResult;
use crate::grid::Grid;
use crate::rng::ColorSource;
use crate::types::{GameEvent, Occupant, Position};

/// Counts from one gravity + refill pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settle {
    pub moved: usize,
    pub refilled: usize,
}

/// Drop every occupant down to the lowest free cell in its column.
///
/// Two-pointer pass per column: `write` trails `read` and marks the next slot
/// to fill from the bottom.
pub fn collapse(grid: &mut Grid, events: &mut Vec<GameEvent>) -> CoreResult<usize> {
    let mut moved = 0;
    for x in 0..grid.width() as i32 {
        let mut write = 0i32;
        for read in 0..grid.height() as i32 {
            let from = Position::new(x, read);
            let occupant = grid.get(from)?;
            if occupant.is_empty() {
                continue;
            }
            if read != write {
                let to = Position::new(x, write);
                grid.set(to, occupant)?;
                grid.set(from, Occupant::Empty)?;
                events.push(GameEvent::CellFilled {
                    pos: to,
                    occupant,
                    from: Some(from),
                });
                moved += 1;
            }
            write += 1;
        }
    }
    Ok(moved)
}

/// Fill every empty cell with a fresh cube, column by column from the bottom.
pub fn refill<S: ColorSource + ?Sized>(
    grid: &mut Grid,
    source: &mut S,
    events: &mut Vec<GameEvent>,
) -> CoreResult<usize> {
    let mut refilled = 0;
    for x in 0..grid.width() as i32 {
        for y in 0..grid.height() as i32 {
            let pos = Position::new(x, y);
            if !grid.get(pos)?.is_empty() {
                continue;
            }
            let occupant = Occupant::Cube(source.next_color());
            grid.set(pos, occupant)?;
            events.push(GameEvent::CellFilled {
                pos,
                occupant,
                from: None,
            });
            refilled += 1;
        }
    }
    Ok(refilled)
}

/// Collapse then refill.
pub fn settle<S: ColorSource + ?Sized>(
    grid: &mut Grid,
    source: &mut S,
    events: &mut Vec<GameEvent>,
) -> CoreResult<Settle> {
    let moved = collapse(grid, events)?;
    let refilled = refill(grid, source, events)?;
    debug!("settle: {} moved, {} refilled", moved, refilled);
    Ok(Settle { moved, refilled })
}
