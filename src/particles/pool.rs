use std::{fmt::Debug, ops::Index};

use glam::Vec2;
use log::{debug, trace};

use crate::{time::FIXED_STEP, CircularArray, Color, Time};

use super::{BlendCategory, DrawSink, Particle, RenderHandle};

/// Per particle behavior, called once per live particle per update with the elapsed seconds.
pub type UpdateFn<H, S> = Box<dyn FnMut(&mut Particle<H, S>, f32)>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticlePoolConfig {
    pub capacity: usize,
    /// Seconds advanced by [`ParticlePool::update_fixed_step`].
    pub fixed_step: f32,
}

impl ParticlePoolConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn fixed_step(mut self, seconds: f32) -> Self {
        self.fixed_step = seconds;
        self
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.capacity > 0,
            "particle pool capacity must be positive, got {}",
            self.capacity
        );
        anyhow::ensure!(
            self.fixed_step.is_finite() && self.fixed_step > 0.0,
            "particle pool fixed step must be a positive number of seconds, got {}",
            self.fixed_step
        );
        Ok(())
    }
}

impl Default for ParticlePoolConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            fixed_step: FIXED_STEP,
        }
    }
}

/// Fixed capacity particle container that does not allocate after construction.
///
/// Particles live in a ring of slots. Logical index 0 is always the oldest particle. When the
/// pool is full, creating a particle overwrites the oldest one. Updating and culling remove
/// particles by compacting survivors towards the front, keeping their order.
pub struct ParticlePool<H, S> {
    slots: CircularArray<Particle<H, S>>,
    count: usize,
    fixed_step: f32,
    evicted: u64,
    update_fn: UpdateFn<H, S>,
}

impl<H: Debug, S: Debug> Debug for ParticlePool<H, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticlePool")
            .field("capacity", &self.capacity())
            .field("count", &self.count)
            .field("start", &self.slots.start())
            .field("fixed_step", &self.fixed_step)
            .field("evicted", &self.evicted)
            .field("particles", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<H, S> ParticlePool<H, S> {
    pub fn new(
        capacity: usize,
        update: impl FnMut(&mut Particle<H, S>, f32) + 'static,
    ) -> anyhow::Result<Self> {
        Self::with_config(ParticlePoolConfig::new(capacity), update)
    }

    /// For behaviors that do not depend on the elapsed time, e.g. fixed per frame drag.
    pub fn without_delta(
        capacity: usize,
        mut update: impl FnMut(&mut Particle<H, S>) + 'static,
    ) -> anyhow::Result<Self> {
        Self::new(capacity, move |particle, _| update(particle))
    }

    pub fn with_config(
        config: ParticlePoolConfig,
        update: impl FnMut(&mut Particle<H, S>, f32) + 'static,
    ) -> anyhow::Result<Self> {
        config.validate()?;
        debug!(
            "creating particle pool with capacity {} and fixed step {}s",
            config.capacity, config.fixed_step
        );
        Ok(ParticlePool {
            slots: CircularArray::new(config.capacity),
            count: 0,
            fixed_step: config.fixed_step,
            evicted: 0,
            update_fn: Box::new(update),
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of live particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Particles dropped by overwrite-oldest since construction or the last
    /// [`Self::reset_evicted`].
    #[inline]
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Returns the eviction counter and sets it back to zero.
    pub fn reset_evicted(&mut self) -> u64 {
        std::mem::take(&mut self.evicted)
    }

    /// Writes a new particle with full life, orientation 0 and [`BlendCategory::Alpha`].
    ///
    /// If the pool is full the oldest particle is overwritten, whatever life it has left.
    /// Use the returned reference to set the remaining fields, e.g.
    /// `pool.create(..).with_orientation(angle).with_blend(BlendCategory::Additive);`
    pub fn create(
        &mut self,
        handle: H,
        position: Vec2,
        tint: Color,
        duration: f32,
        scale: Vec2,
        state: S,
    ) -> &mut Particle<H, S> {
        let i = if self.is_full() {
            // the oldest slot rotates to the back and is reused as the newest.
            self.slots.set_start(self.slots.start() + 1);
            self.evicted += 1;
            trace!(
                "particle pool full ({}), evicted oldest particle, {} evicted so far",
                self.count,
                self.evicted
            );
            self.count - 1
        } else {
            self.count += 1;
            self.count - 1
        };
        self.slots
            .put(i, Particle::new(handle, position, tint, duration, scale, state));
        &mut self.slots[i]
    }

    /// Runs the update callback on every live particle in order, ages them by `dt` seconds and
    /// removes the ones that died, in a single pass.
    pub fn update(&mut self, dt: f32) {
        let update_fn = &mut self.update_fn;
        self.count = self.slots.compact(self.count, |particle| {
            update_fn(particle, dt);
            particle.age_by(dt)
        });
    }

    /// [`Self::update`] with the configured fixed step, 1/60s by default.
    pub fn update_fixed_step(&mut self) {
        self.update(self.fixed_step);
    }

    /// [`Self::update`] with the last frame delta of `time`.
    pub fn update_from(&mut self, time: &Time) {
        self.update(time.delta_secs());
    }

    /// Permanently removes every particle farther than `sqrt(max_distance_squared)` from `center`.
    /// No update callback runs and no lifetime passes. A non-positive or NaN limit empties the
    /// pool.
    pub fn cull_by_distance_squared(&mut self, center: Vec2, max_distance_squared: f32) {
        if max_distance_squared.is_nan() || max_distance_squared <= 0.0 {
            if self.count != 0 {
                debug!(
                    "culling all {} particles, max distance squared is {max_distance_squared}",
                    self.count
                );
            }
            self.count = 0;
            return;
        }
        self.count = self.slots.compact(self.count, |particle| {
            center.distance_squared(particle.position) <= max_distance_squared
        });
    }

    /// Drops every particle. Slots stay allocated.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    pub fn get(&self, i: usize) -> Option<&Particle<H, S>> {
        (i < self.count).then(|| &self.slots[i])
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut Particle<H, S>> {
        if i < self.count {
            Some(&mut self.slots[i])
        } else {
            None
        }
    }

    /// Live particles from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Particle<H, S>> + '_ {
        let (head, tail) = self.slots.as_slices(self.count);
        head.iter().chain(tail.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle<H, S>> + '_ {
        let (head, tail) = self.slots.as_mut_slices(self.count);
        head.iter_mut().chain(tail.iter_mut())
    }
}

impl<H: RenderHandle, S> ParticlePool<H, S> {
    /// Submits every live particle to `sink`, oldest first.
    pub fn draw(&self, sink: &mut impl DrawSink<H>) {
        self.draw_where(sink, |_| true);
    }

    /// Only particles of the given blend category.
    pub fn draw_blend(&self, sink: &mut impl DrawSink<H>, blend: BlendCategory) {
        self.draw_where(sink, |p| p.blend == blend);
    }

    /// Only particles within `sqrt(max_distance_squared)` of `center`. Nothing is removed,
    /// a non-positive or NaN limit draws nothing.
    pub fn draw_within(
        &self,
        sink: &mut impl DrawSink<H>,
        center: Vec2,
        max_distance_squared: f32,
    ) {
        if max_distance_squared.is_nan() || max_distance_squared <= 0.0 {
            return;
        }
        self.draw_where(sink, |p| {
            center.distance_squared(p.position) <= max_distance_squared
        });
    }

    pub fn draw_blend_within(
        &self,
        sink: &mut impl DrawSink<H>,
        blend: BlendCategory,
        center: Vec2,
        max_distance_squared: f32,
    ) {
        if max_distance_squared.is_nan() || max_distance_squared <= 0.0 {
            return;
        }
        self.draw_where(sink, |p| {
            p.blend == blend && center.distance_squared(p.position) <= max_distance_squared
        });
    }

    fn draw_where(
        &self,
        sink: &mut impl DrawSink<H>,
        mut visible: impl FnMut(&Particle<H, S>) -> bool,
    ) {
        // the origin is only looked up again when the handle changes between neighbors.
        let mut current: Option<(u64, Vec2)> = None;
        for p in self.iter() {
            if !visible(p) {
                continue;
            }
            let key = p.handle.batch_key();
            let origin = match current {
                Some((current_key, origin)) if current_key == key => origin,
                _ => {
                    let origin = p.handle.origin();
                    current = Some((key, origin));
                    origin
                }
            };
            sink.draw(&p.handle, p.position, p.tint, p.orientation, origin, p.scale);
        }
    }
}

impl<H, S> Index<usize> for ParticlePool<H, S> {
    type Output = Particle<H, S>;

    /// Panics if `i` is not a live particle.
    fn index(&self, i: usize) -> &Self::Output {
        assert!(
            i < self.count,
            "particle index {i} out of bounds, pool holds {}",
            self.count
        );
        &self.slots[i]
    }
}
