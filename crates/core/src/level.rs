//! Level parameters and grid construction from item codes.

use log::info;

use crate::error::{CoreError, CoreResult};
use crate::grid::{cell_count, Grid};
use crate::rng::ColorSource;
use crate::types::{ItemCode, Occupant};

/// Level input as handed over by the loader.
///
/// `grid` is row-major with row 0 the bottom row and column 0 the left column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSpec {
    pub width: usize,
    pub height: usize,
    pub move_count: u32,
    pub grid: Vec<String>,
}

impl LevelSpec {
    pub fn new<S: Into<String>>(
        width: usize,
        height: usize,
        move_count: u32,
        grid: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            width,
            height,
            move_count,
            grid: grid.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the cell count against the declared dimensions.
    pub fn validate(&self) -> CoreResult<()> {
        match cell_count(self.width, self.height) {
            Some(expected) if expected == self.grid.len() => Ok(()),
            expected => Err(CoreError::MalformedLevel {
                width: self.width,
                height: self.height,
                expected: expected.unwrap_or(0),
                actual: self.grid.len(),
            }),
        }
    }

    /// Build the initial grid. `"rand"` cells draw from `source` in grid order.
    pub fn build_grid<S: ColorSource + ?Sized>(&self, source: &mut S) -> CoreResult<Grid> {
        self.validate()?;
        let cells = self
            .grid
            .iter()
            .map(|code| match ItemCode::parse(code) {
                ItemCode::Cube(color) => Occupant::Cube(color),
                ItemCode::RandomCube => Occupant::Cube(source.next_color()),
                ItemCode::Obstacle(kind) => Occupant::from_obstacle(kind),
                ItemCode::Empty => Occupant::Empty,
            })
            .collect();
        let grid = Grid::from_occupants(self.width, self.height, cells)?;
        info!(
            "built {}x{} level grid, {} move(s)",
            self.width, self.height, self.move_count
        );
        Ok(grid)
    }
}
