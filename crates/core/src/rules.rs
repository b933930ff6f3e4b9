//! Tunable gameplay rules.
//!
//! The defaults are the canonical rule set. `vase_hits = 1` gives the one-hit
//! vase and `stone_requires_tnt` restricts stones to blasts.

use crate::types::{MIN_MATCH_SIZE, TNT_BLAST_RADIUS, VASE_HIT_POINTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Smallest group a click must hit to count as a move.
    pub min_match: usize,
    /// Chebyshev radius of a TNT blast.
    pub blast_radius: u8,
    /// Adjacent hits a vase absorbs before breaking. Blasts always break it.
    pub vase_hits: u8,
    /// When set, stones ignore adjacent matches and only break in a blast.
    pub stone_requires_tnt: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            min_match: MIN_MATCH_SIZE,
            blast_radius: TNT_BLAST_RADIUS,
            vase_hits: VASE_HIT_POINTS,
            stone_requires_tnt: false,
        }
    }
}

impl Rules {
    /// Clamp values that would make the rules meaningless.
    pub fn normalized(mut self) -> Self {
        self.min_match = self.min_match.max(1);
        self.vase_hits = self.vase_hits.max(1);
        self
    }
}
