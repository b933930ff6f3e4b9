//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, level loading, the JSON protocol).
//!
//! # Coordinates
//!
//! - `x` increases to the right, column 0 is the left column
//! - `y` increases upward, row 0 is the **bottom** row
//!
//! # Item Codes
//!
//! Levels describe their grid with short string codes:
//!
//! | Code | Occupant |
//! |------|----------|
//! | `r` `g` `b` `y` | Cube of a fixed color |
//! | `rand` | Cube of a random color |
//! | `bo` | Box |
//! | `s` | Stone |
//! | `v` | Vase |
//! | `t` | TNT |
//!
//! Anything else becomes an empty cell.
//!
//! # Examples
//!
//! ```
//! use cube_blast_types::{CubeColor, ItemCode, ObstacleKind, Occupant, Position};
//!
//! assert_eq!(ItemCode::parse("r"), ItemCode::Cube(CubeColor::Red));
//! assert_eq!(ItemCode::parse("bo"), ItemCode::Obstacle(ObstacleKind::Box));
//! assert_eq!(ItemCode::parse("??"), ItemCode::Empty);
//!
//! let vase = Occupant::from_obstacle(ObstacleKind::Vase);
//! assert_eq!(vase.obstacle(), Some(ObstacleKind::Vase));
//! assert!(vase.color().is_none());
//!
//! let a = Position::new(1, 1);
//! assert_eq!(a.chebyshev(Position::new(3, 0)), 2);
//! ```

/// Smallest connected group a click must hit to be accepted.
pub const MIN_MATCH_SIZE: usize = 2;

/// Chebyshev radius of a TNT blast (2 => a 5x5 block).
pub const TNT_BLAST_RADIUS: u8 = 2;

/// Cumulative hits a vase absorbs before it breaks.
pub const VASE_HIT_POINTS: u8 = 2;

/// Grid coordinate. Row 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chessboard distance between two positions.
    pub fn chebyshev(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// The fixed cube palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl CubeColor {
    pub const ALL: [CubeColor; 4] = [
        CubeColor::Red,
        CubeColor::Green,
        CubeColor::Blue,
        CubeColor::Yellow,
    ];

    /// Color for a palette index, wrapping around the palette size.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Parse a single-letter color code (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_blast_types::CubeColor;
    ///
    /// assert_eq!(CubeColor::from_str("g"), Some(CubeColor::Green));
    /// assert_eq!(CubeColor::from_str("Y"), Some(CubeColor::Yellow));
    /// assert_eq!(CubeColor::from_str("rand"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "r" => Some(CubeColor::Red),
            "g" => Some(CubeColor::Green),
            "b" => Some(CubeColor::Blue),
            "y" => Some(CubeColor::Yellow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CubeColor::Red => "r",
            CubeColor::Green => "g",
            CubeColor::Blue => "b",
            CubeColor::Yellow => "y",
        }
    }
}

/// Non-matchable occupants.
///
/// - **Box**: breaks on one hit from an adjacent match or a blast
/// - **Stone**: breaks on one hit
/// - **Vase**: needs [`VASE_HIT_POINTS`] adjacent hits, or one blast
/// - **Tnt**: detonates when hit, clearing a 5x5 block around itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObstacleKind {
    Box,
    Stone,
    Vase,
    Tnt,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Box,
        ObstacleKind::Stone,
        ObstacleKind::Vase,
        ObstacleKind::Tnt,
    ];

    /// Level item code for this obstacle.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Box => "bo",
            ObstacleKind::Stone => "s",
            ObstacleKind::Vase => "v",
            ObstacleKind::Tnt => "t",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bo" => Some(ObstacleKind::Box),
            "s" => Some(ObstacleKind::Stone),
            "v" => Some(ObstacleKind::Vase),
            "t" => Some(ObstacleKind::Tnt),
            _ => None,
        }
    }

    /// Whether destroying this kind counts toward level goals.
    pub fn is_goal(&self) -> bool {
        !matches!(self, ObstacleKind::Tnt)
    }
}

/// What sits in a grid cell.
///
/// Occupants are passive data. Their position is the slot they sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    Empty,
    Cube(CubeColor),
    Box,
    Stone,
    /// `hits` is the damage taken so far.
    Vase { hits: u8 },
    Tnt,
}

impl Occupant {
    /// Fresh, undamaged occupant for an obstacle kind.
    pub fn from_obstacle(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Box => Occupant::Box,
            ObstacleKind::Stone => Occupant::Stone,
            ObstacleKind::Vase => Occupant::Vase { hits: 0 },
            ObstacleKind::Tnt => Occupant::Tnt,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }

    pub fn is_cube(&self) -> bool {
        matches!(self, Occupant::Cube(_))
    }

    pub fn color(&self) -> Option<CubeColor> {
        match self {
            Occupant::Cube(color) => Some(*color),
            _ => None,
        }
    }

    pub fn obstacle(&self) -> Option<ObstacleKind> {
        match self {
            Occupant::Box => Some(ObstacleKind::Box),
            Occupant::Stone => Some(ObstacleKind::Stone),
            Occupant::Vase { .. } => Some(ObstacleKind::Vase),
            Occupant::Tnt => Some(ObstacleKind::Tnt),
            Occupant::Empty | Occupant::Cube(_) => None,
        }
    }

    /// Hits taken so far. Only vases accumulate damage.
    pub fn hits(&self) -> u8 {
        match self {
            Occupant::Vase { hits } => *hits,
            _ => 0,
        }
    }

    /// Item code for this occupant. Empty cells render as `"-"`.
    pub fn code(&self) -> &'static str {
        match self {
            Occupant::Empty => "-",
            Occupant::Cube(color) => color.as_str(),
            other => other.obstacle().map_or("-", |kind| kind.as_str()),
        }
    }
}

/// A parsed level item code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCode {
    Cube(CubeColor),
    RandomCube,
    Obstacle(ObstacleKind),
    /// Unrecognized codes are not an error; they leave the cell empty.
    Empty,
}

impl ItemCode {
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        if code.eq_ignore_ascii_case("rand") {
            return ItemCode::RandomCube;
        }
        if let Some(color) = CubeColor::from_str(code) {
            return ItemCode::Cube(color);
        }
        match ObstacleKind::from_str(code) {
            Some(kind) => ItemCode::Obstacle(kind),
            None => ItemCode::Empty,
        }
    }
}

/// Lifecycle of a level.
///
/// `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}

/// Why a click did not start a resolve cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The connected group is smaller than the minimum.
    MatchTooSmall { size: usize },
    /// The clicked cell does not hold a cube.
    NotACube,
    /// The clicked coordinate lies outside the grid.
    OutOfBounds,
    /// The level has already been won or lost.
    GameOver,
}

impl RejectReason {
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::MatchTooSmall { .. } => "match_too_small",
            RejectReason::NotACube => "not_a_cube",
            RejectReason::OutOfBounds => "out_of_bounds",
            RejectReason::GameOver => "game_over",
        }
    }
}

/// Events pushed to the presentation layer, in order, for one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A vase took a hit but survived. `occupant` carries the new hit count.
    CellDamaged { pos: Position, occupant: Occupant },
    /// `occupant` is what the cell held right before it was cleared.
    CellCleared { pos: Position, occupant: Occupant },
    /// `from` is the origin of a gravity move, `None` for a refill.
    CellFilled {
        pos: Position,
        occupant: Occupant,
        from: Option<Position>,
    },
    GoalChanged { kind: ObstacleKind, remaining: u32 },
    MovesChanged { moves_left: u32 },
    GameEnded { status: GameStatus },
    MoveRejected { reason: RejectReason },
}
