use glam::Vec2;

use crate::Color;

use super::BlendCategory;

/// One slot of a [`ParticlePool`](super::ParticlePool).
///
/// Plain data: behavior lives in the pool's update callback, which reads and writes `state`
/// and the public fields. Only the remaining life is owned by the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle<H, S> {
    pub handle: H,
    pub position: Vec2,
    /// radians
    pub orientation: f32,
    pub scale: Vec2,
    pub tint: Color,
    pub blend: BlendCategory,
    /// Lifespan in seconds. `<= 0.0` dies on the next update.
    pub duration: f32,
    pub state: S,
    pub(crate) percent_life: f32,
}

impl<H, S> Particle<H, S> {
    pub(crate) fn new(
        handle: H,
        position: Vec2,
        tint: Color,
        duration: f32,
        scale: Vec2,
        state: S,
    ) -> Self {
        Particle {
            handle,
            position,
            orientation: 0.0,
            scale,
            tint,
            blend: BlendCategory::Alpha,
            duration,
            state,
            percent_life: 1.0,
        }
    }

    /// Remaining fraction of the lifespan: 1.0 when created, negative once dead.
    #[inline]
    pub fn percent_life(&self) -> f32 {
        self.percent_life
    }

    /// 0.0 when created, 1.0 at the end of the lifespan. Handy for [`KeyFrames`](crate::KeyFrames).
    #[inline]
    pub fn age(&self) -> f32 {
        (1.0 - self.percent_life).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.percent_life >= 0.0
    }

    pub fn with_orientation(&mut self, orientation: f32) -> &mut Self {
        self.orientation = orientation;
        self
    }

    pub fn with_blend(&mut self, blend: BlendCategory) -> &mut Self {
        self.blend = blend;
        self
    }

    /// Advances the lifetime by `dt` seconds, returns whether the particle survived.
    #[inline]
    pub(crate) fn age_by(&mut self, dt: f32) -> bool {
        if self.duration > 0.0 {
            self.percent_life -= dt / self.duration;
        } else {
            self.percent_life = -1.0;
        }
        self.is_alive()
    }
}
