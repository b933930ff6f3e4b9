//! RNG module - deterministic cube colors
//!
//! Random cubes (`"rand"` level codes and refills after gravity) draw their
//! color from a [`ColorSource`]. The default source is a small LCG so that a
//! seed plus a click sequence always reproduces the same game.

use crate::types::CubeColor;

/// Anything that can hand out cube colors.
pub trait ColorSource {
    fn next_color(&mut self) -> CubeColor;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG cycle with a short period; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl ColorSource for SimpleRng {
    fn next_color(&mut self) -> CubeColor {
        let index = self.next_range(CubeColor::ALL.len() as u32);
        CubeColor::from_index(index as usize)
    }
}

/// Replays a fixed color sequence, cycling when exhausted.
///
/// Handy for tests that need to know exactly what a refill produces.
#[derive(Debug, Clone)]
pub struct CyclingColors {
    colors: Vec<CubeColor>,
    next: usize,
}

impl CyclingColors {
    pub fn new(colors: Vec<CubeColor>) -> Self {
        Self { colors, next: 0 }
    }
}

impl ColorSource for CyclingColors {
    fn next_color(&mut self) -> CubeColor {
        if self.colors.is_empty() {
            return CubeColor::Red;
        }
        let color = self.colors[self.next % self.colors.len()];
        self.next += 1;
        color
    }
}
