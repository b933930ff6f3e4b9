//! Game state module - runs resolve cycles and tracks win/loss
//!
//! This module ties together all core components: grid, match finder,
//! destruction resolver, gravity, goals and the move budget. One accepted click
//! is one complete, synchronous cycle:
//!
//! match -> destroy -> collapse -> refill -> evaluate
//!
//! The grid after [`GameState::click`] returns is final; presentation layers
//! animate from the event stream but never wait on the engine.

use log::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::goals::GoalTracker;
use crate::gravity::settle;
use crate::grid::Grid;
use crate::level::LevelSpec;
use crate::matching::find_match;
use crate::resolve::resolve;
use crate::rng::SimpleRng;
use crate::rules::Rules;
use crate::snapshot::GameSnapshot;
use crate::types::{GameEvent, GameStatus, Position, RejectReason};

/// Complete state of one level in play
#[derive(Debug, Clone)]
pub struct GameState {
    level: LevelSpec,
    seed: u32,
    rules: Rules,
    grid: Grid,
    goals: GoalTracker,
    rng: SimpleRng,
    moves_left: u32,
    /// Accepted moves so far.
    moves_made: u32,
    status: GameStatus,
}

impl GameState {
    /// Load a level with the default rules
    pub fn new(level: LevelSpec, seed: u32) -> CoreResult<Self> {
        Self::with_rules(level, seed, Rules::default())
    }

    /// Load a level. Fails with `MalformedLevel` if the grid does not match the
    /// declared dimensions.
    pub fn with_rules(level: LevelSpec, seed: u32, rules: Rules) -> CoreResult<Self> {
        let rules = rules.normalized();
        let mut rng = SimpleRng::new(seed);
        let grid = level.build_grid(&mut rng)?;
        let goals = GoalTracker::from_grid(&grid);

        let status = if level.move_count == 0 && !goals.is_empty() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };
        info!(
            "level loaded: {}x{}, {} move(s), {} goal(s), seed {}",
            level.width,
            level.height,
            level.move_count,
            goals.goals().len(),
            seed
        );

        Ok(Self {
            moves_left: level.move_count,
            level,
            seed,
            rules,
            grid,
            goals,
            rng,
            moves_made: 0,
            status,
        })
    }

    /// Reload the current level from scratch with the original seed.
    pub fn restart(&mut self) -> CoreResult<()> {
        *self = Self::with_rules(self.level.clone(), self.seed, self.rules)?;
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn goals(&self) -> &GoalTracker {
        &self.goals
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn level(&self) -> &LevelSpec {
        &self.level
    }

    /// Handle a click and return the events it produced.
    pub fn click(&mut self, pos: Position) -> CoreResult<Vec<GameEvent>> {
        let mut events = Vec::new();
        self.click_into(pos, &mut events)?;
        Ok(events)
    }

    /// Handle a click, appending events to `events`.
    ///
    /// Returns `Ok(true)` if the click ran a resolve cycle and `Ok(false)` if it
    /// was rejected (a single `MoveRejected` event is appended and nothing else
    /// changes). Errors only surface broken grid invariants.
    pub fn click_into(&mut self, pos: Position, events: &mut Vec<GameEvent>) -> CoreResult<bool> {
        let matched = match self.check_click(pos)? {
            Ok(matched) => matched,
            Err(reason) => {
                debug!("click at ({}, {}) rejected: {}", pos.x, pos.y, reason.code());
                events.push(GameEvent::MoveRejected { reason });
                return Ok(false);
            }
        };

        self.run_cycle(&matched, events)?;
        Ok(true)
    }

    /// The matched group for an acceptable click, or why it is not acceptable.
    fn check_click(&self, pos: Position) -> CoreResult<Result<Vec<Position>, RejectReason>> {
        if self.status.is_terminal() {
            return Ok(Err(RejectReason::GameOver));
        }
        if !self.grid.contains(pos) {
            warn!(
                "click at ({}, {}) outside {}x{} grid",
                pos.x,
                pos.y,
                self.grid.width(),
                self.grid.height()
            );
            return Ok(Err(RejectReason::OutOfBounds));
        }
        let matched = match find_match(&self.grid, pos) {
            Ok(matched) => matched,
            Err(CoreError::InvalidOccupant { .. }) => return Ok(Err(RejectReason::NotACube)),
            Err(e) => return Err(e),
        };
        if matched.len() < self.rules.min_match {
            return Ok(Err(RejectReason::MatchTooSmall {
                size: matched.len(),
            }));
        }
        Ok(Ok(matched))
    }

    fn run_cycle(&mut self, matched: &[Position], events: &mut Vec<GameEvent>) -> CoreResult<()> {
        let resolution = resolve(
            &mut self.grid,
            &mut self.goals,
            matched,
            &self.rules,
            events,
        )?;
        let goals_cleared = self.goals.is_cleared();

        settle(&mut self.grid, &mut self.rng, events)?;

        self.moves_left = self.moves_left.saturating_sub(1);
        self.moves_made += 1;
        events.push(GameEvent::MovesChanged {
            moves_left: self.moves_left,
        });

        // Goals are checked first so a last-move win is still a win.
        if goals_cleared {
            self.status = GameStatus::Won;
        } else if self.moves_left == 0 {
            self.status = GameStatus::Lost;
        }

        debug!(
            "move {}: {} cleared, {} TNT, {} move(s) left",
            self.moves_made,
            resolution.cleared.len(),
            resolution.detonated.len(),
            self.moves_left
        );
        if self.status.is_terminal() {
            info!(
                "level ended: {} after {} move(s)",
                self.status.as_str(),
                self.moves_made
            );
            events.push(GameEvent::GameEnded {
                status: self.status,
            });
        }
        Ok(())
    }

    /// Point-in-time copy of everything a presentation layer needs.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            cells: self.grid.cells().iter().map(|c| c.code()).collect(),
            hits: self.grid.cells().iter().map(|c| c.hits()).collect(),
            goals: self.goals.goals().to_vec(),
            moves_left: self.moves_left,
            moves_made: self.moves_made,
            status: self.status,
        }
    }
}
