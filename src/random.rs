use std::{f32::consts::TAU, ops::Range};

use glam::Vec2;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Deterministic random source for effect spawners. Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: SmallRng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// In `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    /// In `[range.start, range.end)`. An empty range returns `range.start`.
    #[inline]
    pub fn range(&mut self, range: Range<f32>) -> f32 {
        if range.end <= range.start {
            return range.start;
        }
        self.rng.gen_range(range)
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    pub fn unit_vector(&mut self) -> Vec2 {
        Vec2::from_angle(self.range(0.0..TAU))
    }

    /// A point in the ring between `min` and `max` radius around the origin.
    pub fn vector_in_disc(&mut self, min: f32, max: f32) -> Vec2 {
        self.unit_vector() * self.range(min..max)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        Some(&items[self.rng.gen_range(0..items.len())])
    }

    /// Uniform in the rectangle spanned by `min` and `max`.
    pub fn point_in(&mut self, min: Vec2, max: Vec2) -> Vec2 {
        let t: Vec2 = self.rng.gen();
        min + (max - min) * t
    }
}
