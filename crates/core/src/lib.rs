//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every rule of the puzzle: the grid, match search,
//! destruction with obstacles and TNT chains, gravity and refill, goals, and
//! win/loss. It has **no** dependency on rendering, input or I/O:
//!
//! - **Deterministic**: same level + seed + clicks yields the same event stream
//! - **Synchronous**: one click is one complete resolve cycle
//! - **Event driven**: presentation layers consume [`GameEvent`](types::GameEvent)s
//!   instead of inspecting engine internals
//!
//! # Module Structure
//!
//! - [`grid`]: bounds-checked cell storage, row 0 at the bottom
//! - [`matching`]: flood fill for the clicked color group
//! - [`resolve`]: staged destruction, obstacle damage and TNT chains
//! - [`gravity`]: column compaction and refill
//! - [`goals`]: per-obstacle destruction quotas
//! - [`game_state`]: move budget and the InProgress/Won/Lost machine
//! - [`level`]: level parameters and item-code parsing
//! - [`rng`]: seedable color source
//! - [`rules`]: tunable gameplay constants
//!
//! # Example
//!
//! ```
//! use cube_blast_core::{GameState, LevelSpec};
//! use cube_blast_types::{GameStatus, ObstacleKind, Position};
//!
//! // 4x4 of red with a box in the bottom-left corner.
//! let mut codes = vec!["r"; 16];
//! codes[0] = "bo";
//! let mut game = GameState::new(LevelSpec::new(4, 4, 5, codes), 12345).unwrap();
//!
//! let events = game.click(Position::new(3, 3)).unwrap();
//! assert!(!events.is_empty());
//! assert_eq!(game.goals().remaining(ObstacleKind::Box), Some(0));
//! assert_eq!(game.status(), GameStatus::Won);
//! ```

pub mod error;
pub mod game_state;
pub mod goals;
pub mod gravity;
pub mod grid;
pub mod level;
pub mod matching;
pub mod resolve;
pub mod rng;
pub mod rules;
pub mod snapshot;

pub use cube_blast_types as types;

// Re-export commonly used types for convenience
pub use error::{CoreError, CoreResult};
pub use game_state::GameState;
pub use goals::{Goal, GoalTracker};
pub use gravity::{collapse, refill, settle, Settle};
pub use grid::Grid;
pub use level::LevelSpec;
pub use matching::find_match;
pub use resolve::{resolve, Resolution};
pub use rng::{ColorSource, CyclingColors, SimpleRng};
pub use rules::Rules;
pub use snapshot::GameSnapshot;
