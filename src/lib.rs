pub mod circular_array;
pub mod color;
pub mod effects;
pub mod key_frames;
pub mod lerp;
pub mod particles;
pub mod random;
pub mod time;

pub use circular_array::CircularArray;
pub use color::Color;
pub use effects::{Burst, Fade, Motion};
pub use key_frames::{Easing, KeyFrame, KeyFrames};
pub use lerp::Lerp;
pub use particles::{
    BlendCategory, DrawSink, InstanceBatcher, Particle, ParticleBatch, ParticlePool,
    ParticlePoolConfig, RawParticle, RenderHandle, SpriteHandle, UpdateFn,
};
pub use random::SeededRng;
pub use time::{Time, TimeStats, FIXED_STEP};

pub mod ext {
    pub use anyhow;
    pub use bytemuck;
    pub use glam;
    pub use log;
    pub use smallvec;
}
