//! Cube Blast (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof: `cube_blast::{types, core, adapter}`.

pub use cube_blast_adapter as adapter;
pub use cube_blast_core as core;
pub use cube_blast_types as types;
