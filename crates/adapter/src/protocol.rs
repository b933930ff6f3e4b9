//! Protocol module - JSON message types for remote play
//!
//! Line-delimited JSON, one message per line. Every message carries a `type`
//! tag. Positions are `x`/`y` with `y = 0` the bottom row; item codes use the
//! level file notation (`r`, `bo`, `v`, ...), with `-` for an empty cell.

use serde::{Deserialize, Serialize};

use crate::core::GameSnapshot;
use crate::level_file::LevelFile;
use crate::types::{GameEvent, Position, RejectReason};

pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Client -> Host Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Start (or replace) the shared game.
    Load {
        level: LevelFile,
        #[serde(default)]
        seed: Option<u32>,
    },
    Click {
        #[serde(default)]
        seq: u64,
        x: i32,
        y: i32,
    },
    Restart,
    Snapshot,
}

// ============== Host -> Client Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol_version: String,
    },
    /// Everything one click produced, in order.
    Events {
        seq: u64,
        events: Vec<EventMessage>,
    },
    Snapshot(SnapshotMessage),
    Error {
        code: ErrorCode,
        message: String,
    },
}

impl ServerMessage {
    pub fn welcome() -> Self {
        Self::Welcome {
            protocol_version: PROTOCOL_VERSION.to_string(),
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    NoLevel,
    MalformedLevel,
    Internal,
}

/// Wire form of a [`GameEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventMessage {
    CellDamaged {
        x: i32,
        y: i32,
        item: String,
        hits: u8,
    },
    CellCleared {
        x: i32,
        y: i32,
        item: String,
    },
    CellFilled {
        x: i32,
        y: i32,
        item: String,
        /// `[x, y]` the occupant fell from; absent for refills.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<[i32; 2]>,
    },
    GoalChanged {
        goal: String,
        remaining: u32,
    },
    MovesChanged {
        moves_left: u32,
    },
    GameEnded {
        status: String,
    },
    MoveRejected {
        reason: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<usize>,
    },
}

impl From<&GameEvent> for EventMessage {
    fn from(event: &GameEvent) -> Self {
        match *event {
            GameEvent::CellDamaged { pos, occupant } => Self::CellDamaged {
                x: pos.x,
                y: pos.y,
                item: occupant.code().to_string(),
                hits: occupant.hits(),
            },
            GameEvent::CellCleared { pos, occupant } => Self::CellCleared {
                x: pos.x,
                y: pos.y,
                item: occupant.code().to_string(),
            },
            GameEvent::CellFilled { pos, occupant, from } => Self::CellFilled {
                x: pos.x,
                y: pos.y,
                item: occupant.code().to_string(),
                from: from.map(|Position { x, y }| [x, y]),
            },
            GameEvent::GoalChanged { kind, remaining } => Self::GoalChanged {
                goal: kind.as_str().to_string(),
                remaining,
            },
            GameEvent::MovesChanged { moves_left } => Self::MovesChanged { moves_left },
            GameEvent::GameEnded { status } => Self::GameEnded {
                status: status.as_str().to_string(),
            },
            GameEvent::MoveRejected { reason } => Self::MoveRejected {
                reason: reason.code().to_string(),
                size: match reason {
                    RejectReason::MatchTooSmall { size } => Some(size),
                    _ => None,
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalMessage {
    pub goal: String,
    pub remaining: u32,
}

/// Wire form of a [`GameSnapshot`]. `cells` is row-major, bottom row first;
/// `hits` lines up with `cells` and is non-zero only for cracked vases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMessage {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<String>,
    pub hits: Vec<u8>,
    pub goals: Vec<GoalMessage>,
    pub moves_left: u32,
    pub moves_made: u32,
    pub status: String,
}

impl From<&GameSnapshot> for SnapshotMessage {
    fn from(snap: &GameSnapshot) -> Self {
        Self {
            width: snap.width,
            height: snap.height,
            cells: snap.cells.iter().map(|c| c.to_string()).collect(),
            hits: snap.hits.clone(),
            goals: snap
                .goals
                .iter()
                .map(|g| GoalMessage {
                    goal: g.kind.as_str().to_string(),
                    remaining: g.remaining,
                })
                .collect(),
            moves_left: snap.moves_left,
            moves_made: snap.moves_made,
            status: snap.status.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CubeColor, GameStatus, ObstacleKind, Occupant};
    use serde_json::json;

    #[test]
    fn test_parse_click() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"click","seq":7,"x":2,"y":0}"#).unwrap();
        assert_eq!(msg, ClientMessage::Click { seq: 7, x: 2, y: 0 });
    }

    #[test]
    fn test_parse_load_without_seed() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"load","level":{"grid_width":1,"grid_height":1,"move_count":3,"grid":["r"]}}"#,
        )
        .unwrap();
        match msg {
            ClientMessage::Load { level, seed } => {
                assert_eq!(level.grid_width, 1);
                assert_eq!(seed, None);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_fails() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"drop"}"#).is_err());
    }

    #[test]
    fn test_event_mapping() {
        let filled = GameEvent::CellFilled {
            pos: Position::new(1, 0),
            occupant: Occupant::Cube(CubeColor::Green),
            from: Some(Position::new(1, 2)),
        };
        assert_eq!(
            serde_json::to_value(EventMessage::from(&filled)).unwrap(),
            json!({"event":"cell_filled","x":1,"y":0,"item":"g","from":[1,2]})
        );

        let refill = GameEvent::CellFilled {
            pos: Position::new(0, 3),
            occupant: Occupant::Cube(CubeColor::Red),
            from: None,
        };
        assert_eq!(
            serde_json::to_value(EventMessage::from(&refill)).unwrap(),
            json!({"event":"cell_filled","x":0,"y":3,"item":"r"})
        );

        let goal = GameEvent::GoalChanged {
            kind: ObstacleKind::Vase,
            remaining: 4,
        };
        assert_eq!(
            serde_json::to_value(EventMessage::from(&goal)).unwrap(),
            json!({"event":"goal_changed","goal":"v","remaining":4})
        );

        let ended = GameEvent::GameEnded {
            status: GameStatus::Won,
        };
        assert_eq!(
            serde_json::to_value(EventMessage::from(&ended)).unwrap(),
            json!({"event":"game_ended","status":"won"})
        );
    }

    #[test]
    fn test_rejection_carries_size() {
        let rejected = GameEvent::MoveRejected {
            reason: RejectReason::MatchTooSmall { size: 1 },
        };
        let value = serde_json::to_value(EventMessage::from(&rejected)).unwrap();
        assert_eq!(value["event"], "move_rejected");
        assert_eq!(value["size"], 1);
    }

    #[test]
    fn test_error_serializes_snake_case() {
        let msg = ServerMessage::error(ErrorCode::NoLevel, "load a level first");
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"type":"error","code":"no_level","message":"load a level first"})
        );
    }
}
