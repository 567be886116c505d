use std::ops::Range;

use glam::Vec2;

use crate::Color;

use super::{DrawSink, RawParticle, RenderHandle};

/// A run of instances that share one handle and can go out in a single instanced draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBatch<H> {
    pub range: Range<u32>,
    pub handle: H,
}

impl<H: RenderHandle> ParticleBatch<H> {
    fn batch_key(&self) -> u64 {
        self.handle.batch_key()
    }
}

/// Collects particle draws into [`RawParticle`] instances grouped into batches.
///
/// Meant to be kept around and [`InstanceBatcher::clear`]ed every frame, the buffers keep their
/// capacity so a warmed up batcher does not allocate.
#[derive(Debug)]
pub struct InstanceBatcher<H> {
    instances: Vec<RawParticle>,
    batches: Vec<ParticleBatch<H>>,
}

impl<H> Default for InstanceBatcher<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> InstanceBatcher<H> {
    pub fn new() -> Self {
        InstanceBatcher {
            instances: vec![],
            batches: vec![],
        }
    }

    pub fn with_capacity(instances: usize) -> Self {
        InstanceBatcher {
            instances: Vec::with_capacity(instances),
            batches: vec![],
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.batches.clear();
    }

    pub fn instances(&self) -> &[RawParticle] {
        &self.instances
    }

    /// The instances as bytes, ready for a buffer write.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn batches(&self) -> &[ParticleBatch<H>] {
        &self.batches
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<H: RenderHandle> DrawSink<H> for InstanceBatcher<H> {
    fn draw(
        &mut self,
        handle: &H,
        position: Vec2,
        tint: Color,
        orientation: f32,
        origin: Vec2,
        scale: Vec2,
    ) {
        let index = self.instances.len() as u32;
        self.instances.push(RawParticle {
            pos: position,
            rotation: orientation,
            scale,
            origin,
            size: handle.extent(),
            color: tint,
        });

        match self.batches.last_mut() {
            Some(batch) if batch.batch_key() == handle.batch_key() => batch.range.end += 1,
            _ => self.batches.push(ParticleBatch {
                range: index..index + 1,
                handle: handle.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec2, Vec2};

    use super::InstanceBatcher;
    use crate::{BlendCategory, Color, ParticlePool, RawParticle, SpriteHandle};

    const SMOKE: SpriteHandle = SpriteHandle::new(1, Vec2::splat(16.0));
    const SPARK: SpriteHandle = SpriteHandle::pixel(2);

    fn pool_with(handles: &[SpriteHandle]) -> ParticlePool<SpriteHandle, ()> {
        let mut pool = ParticlePool::new(handles.len(), |_, _| {}).unwrap();
        for (i, h) in handles.iter().enumerate() {
            pool.create(*h, vec2(i as f32, 0.0), Color::WHITE, 1.0, Vec2::ONE, ());
        }
        pool
    }

    #[test]
    fn consecutive_handles_share_a_batch() {
        let pool = pool_with(&[SMOKE, SMOKE, SPARK, SPARK, SPARK, SMOKE]);
        let mut batcher = InstanceBatcher::new();
        pool.draw(&mut batcher);

        let batches: Vec<_> = batcher
            .batches()
            .iter()
            .map(|b| (b.handle.id, b.range.clone()))
            .collect();
        assert_eq!(batches, vec![(1, 0..2), (2, 2..5), (1, 5..6)]);
        assert_eq!(batcher.instances().len(), 6);
        assert_eq!(batcher.instances()[0].origin, vec2(8.0, 8.0));
        assert_eq!(batcher.instances()[2].origin, Vec2::ZERO);
        assert_eq!(batcher.instances()[2].size, Vec2::ONE);
        assert_eq!(
            batcher.bytes().len(),
            6 * std::mem::size_of::<RawParticle>()
        );
    }

    #[test]
    fn clear_keeps_capacity() {
        let pool = pool_with(&[SMOKE; 32]);
        let mut batcher = InstanceBatcher::with_capacity(8);
        pool.draw(&mut batcher);
        let capacity = batcher.instances.capacity();
        assert!(capacity >= 32);

        batcher.clear();
        assert!(batcher.is_empty());
        assert!(batcher.batches().is_empty());
        pool.draw(&mut batcher);
        assert_eq!(batcher.instances.capacity(), capacity);
    }

    #[test]
    fn one_batcher_per_blend_category() {
        let mut pool: ParticlePool<SpriteHandle, ()> = ParticlePool::new(4, |_, _| {}).unwrap();
        for i in 0..4 {
            let blend = if i % 2 == 0 {
                BlendCategory::Alpha
            } else {
                BlendCategory::Additive
            };
            pool.create(SPARK, Vec2::ZERO, Color::WHITE, 1.0, Vec2::ONE, ())
                .with_blend(blend);
        }
        let mut alpha = InstanceBatcher::new();
        let mut additive = InstanceBatcher::new();
        pool.draw_blend(&mut alpha, BlendCategory::Alpha);
        pool.draw_blend(&mut additive, BlendCategory::Additive);
        assert_eq!(alpha.instances().len(), 2);
        assert_eq!(additive.instances().len(), 2);
        assert_eq!(alpha.batches().len(), 1);
    }
}
