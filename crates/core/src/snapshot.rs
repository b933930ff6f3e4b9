use crate::goals::Goal;
use crate::types::GameStatus;

/// Read-only view of a game at one instant.
///
/// `cells` holds item codes row-major with the bottom row first; empty cells
/// are `"-"`. `hits` is index-aligned with `cells` and carries vase damage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<&'static str>,
    pub hits: Vec<u8>,
    pub goals: Vec<Goal>,
    pub moves_left: u32,
    pub moves_made: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Rows from the top row down, for printing.
    pub fn rows_top_down(&self) -> Vec<&[&'static str]> {
        if self.width == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.width).rev().collect()
    }
}
