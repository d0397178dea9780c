//! RNG module - seeded pipe shape generation
//!
//! New pool tiles get their shape from a [`ShapeGenerator`], which applies a
//! [`GenerationPolicy`] on top of a small LCG. The same seed and policy always
//! produce the same sequence of shapes, which keeps games replayable and
//! tests deterministic.

use serde::{Deserialize, Serialize};

use crate::types::Connections;

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
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// True with probability `percent / 100`.
    pub fn chance(&mut self, percent: u8) -> bool {
        self.next_range(100) < u32::from(percent)
    }
}

/// How new pool tiles pick their shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationPolicy {
    /// Uniform over the six two-edge pipes.
    #[default]
    Classic,
    /// Classic pipes, replaced by a junction (tee or cross) with the given
    /// percentage chance.
    Junctions { junction_percent: u8 },
    /// Cycle through a fixed list of shapes. Ignores the RNG.
    Sequence { shapes: Vec<Connections> },
}

/// Produces pipe shapes according to a [`GenerationPolicy`].
#[derive(Debug, Clone)]
pub struct ShapeGenerator {
    policy: GenerationPolicy,
    rng: SimpleRng,
    /// Position in the `Sequence` list.
    cursor: usize,
}

impl ShapeGenerator {
    pub fn new(policy: GenerationPolicy, seed: u32) -> Self {
        Self {
            policy,
            rng: SimpleRng::new(seed),
            cursor: 0,
        }
    }

    /// Draw the next shape.
    pub fn next_shape(&mut self) -> Connections {
        match &self.policy {
            GenerationPolicy::Classic => classic(&mut self.rng),
            GenerationPolicy::Junctions { junction_percent } => {
                if self.rng.chance(*junction_percent) {
                    let i = self.rng.next_range(Connections::JUNCTIONS.len() as u32) as usize;
                    Connections::JUNCTIONS[i]
                } else {
                    classic(&mut self.rng)
                }
            }
            GenerationPolicy::Sequence { shapes } if shapes.is_empty() => classic(&mut self.rng),
            GenerationPolicy::Sequence { shapes } => {
                let shape = shapes[self.cursor % shapes.len()];
                self.cursor = self.cursor.wrapping_add(1);
                shape
            }
        }
    }
}

fn classic(rng: &mut SimpleRng) -> Connections {
    let i = rng.next_range(Connections::CLASSIC.len() as u32) as usize;
    Connections::CLASSIC[i]
}
