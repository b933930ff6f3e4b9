//! Cube Blast adapter - level files and network play
//!
//! Everything that touches the outside world lives here: JSON level files on
//! disk, the line-delimited JSON protocol, and the TCP server that shares one
//! game between clients. The engine itself stays in `cube-blast-core`.

pub mod level_file;
pub mod protocol;
pub mod server;

pub use cube_blast_core as core;
pub use cube_blast_types as types;

pub use level_file::{LevelFile, LevelFileError, LevelLibrary};
pub use protocol::{ClientMessage, ErrorCode, EventMessage, ServerMessage, SnapshotMessage};
pub use server::{run_server, ServerConfig, Session};
