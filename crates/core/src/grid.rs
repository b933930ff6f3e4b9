//! Grid module - owns the occupant of every cell
//!
//! The grid is `width x height` cells stored in a flat row-major vector
//! (`y * width + x`). Row 0 is the bottom row, so gravity pulls toward `y = 0`.
//! Occupants carry no position of their own; a cell's coordinate is its slot.

use arrayvec::ArrayVec;
use log::warn;

use crate::error::{CoreError, CoreResult};
use crate::types::{Occupant, Position};

/// Neighbor enumeration order: left, right, down, up.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Largest accepted width or height. Coordinates are `i32`.
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// Number of cells in a `width x height` grid.
///
/// `None` when a side is zero or above [`MAX_DIMENSION`], or the product
/// overflows `usize`.
pub fn cell_count(width: usize, height: usize) -> Option<usize> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return None;
    }
    width.checked_mul(height)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Occupant>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Occupant::Empty; width * height],
        }
    }

    /// Build a grid from row-major occupants (row 0 first).
    pub fn from_occupants(width: usize, height: usize, cells: Vec<Occupant>) -> CoreResult<Self> {
        match cell_count(width, height) {
            Some(expected) if expected == cells.len() => Ok(Self {
                width,
                height,
                cells,
            }),
            expected => Err(CoreError::MalformedLevel {
                width,
                height,
                expected: expected.unwrap_or(0),
                actual: cells.len(),
            }),
        }
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    fn out_of_bounds(&self, pos: Position) -> CoreError {
        warn!(
            "grid access at ({}, {}) outside {}x{}",
            pos.x, pos.y, self.width, self.height
        );
        CoreError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Occupant at `pos`
    pub fn get(&self, pos: Position) -> CoreResult<Occupant> {
        match self.index(pos) {
            Some(idx) => Ok(self.cells[idx]),
            None => Err(self.out_of_bounds(pos)),
        }
    }

    /// Replace the occupant at `pos`, returning what was there before
    pub fn set(&mut self, pos: Position, occupant: Occupant) -> CoreResult<Occupant> {
        match self.index(pos) {
            Some(idx) => Ok(std::mem::replace(&mut self.cells[idx], occupant)),
            None => Err(self.out_of_bounds(pos)),
        }
    }

    /// In-bounds 4-neighbors of `pos`, in [`NEIGHBOR_OFFSETS`] order
    pub fn neighbors(&self, pos: Position) -> CoreResult<ArrayVec<Position, 4>> {
        if !self.contains(pos) {
            return Err(self.out_of_bounds(pos));
        }
        let mut out = ArrayVec::new();
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let n = pos.offset(dx, dy);
            if self.contains(n) {
                out.push(n);
            }
        }
        Ok(out)
    }

    /// In-bounds positions within Chebyshev `radius` of `center` (center included),
    /// bottom row first.
    pub fn area(&self, center: Position, radius: u8) -> impl Iterator<Item = Position> + '_ {
        let r = radius as i32;
        (-r..=r)
            .flat_map(move |dy| (-r..=r).map(move |dx| center.offset(dx, dy)))
            .filter(move |p| self.contains(*p))
    }

    /// Every coordinate, row-major from the bottom row
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        (0..self.cells.len()).map(move |i| Position::new((i % width) as i32, (i / width) as i32))
    }

    /// Every `(position, occupant)` pair, row-major from the bottom row
    pub fn iter(&self) -> impl Iterator<Item = (Position, Occupant)> + '_ {
        self.positions().zip(self.cells.iter().copied())
    }

    /// Column `x` from bottom to top
    pub fn column(&self, x: usize) -> CoreResult<Vec<Occupant>> {
        if x >= self.width {
            return Err(self.out_of_bounds(Position::new(
                i32::try_from(x).unwrap_or(i32::MAX),
                0,
            )));
        }
        Ok((0..self.height)
            .map(|y| self.cells[y * self.width + x])
            .collect())
    }

    pub fn cells(&self) -> &[Occupant] {
        &self.cells
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }
}
