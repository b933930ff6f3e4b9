//! Error kinds surfaced by the core.
//!
//! Gameplay outcomes (too-small match, exhausted moves) are not errors; they are
//! reported as events and status transitions.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("cell ({x}, {y}) does not hold a cube")]
    InvalidOccupant { x: i32, y: i32 },

    #[error("level grid has {actual} cells, which does not fit a {width}x{height} grid")]
    MalformedLevel {
        width: usize,
        height: usize,
        /// `width * height`, or 0 when that is not a valid grid size.
        expected: usize,
        actual: usize,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;
