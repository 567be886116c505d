use glam::Vec2;

use crate::Color;

mod batch;
pub use batch::{InstanceBatcher, ParticleBatch};

mod draw;
pub use draw::{DrawSink, RenderHandle, SpriteHandle};

mod particle;
pub use particle::Particle;

mod pool;
pub use pool::{ParticlePool, ParticlePoolConfig, UpdateFn};

/// Which compositing mode a particle is drawn with. Draw passes filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendCategory {
    #[default]
    Alpha,
    Additive,
    Opaque,
}

/// Per instance data of one particle draw, laid out for direct upload into an instance buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RawParticle {
    pub pos: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
    /// pivot in pixels
    pub origin: Vec2,
    /// pixel size of the sprite
    pub size: Vec2,
    pub color: Color,
}
