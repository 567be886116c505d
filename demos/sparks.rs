//! Headless fireworks: bursts of sparks around a moving center, culled and batched every frame.
//!
//! Run with `RUST_LOG=trace` to also see every eviction.

use std::time::Duration;

use ember::{
    effects::motion_update,
    key_frames, BlendCategory, Burst, Color, Fade, InstanceBatcher, ParticlePool,
    ParticlePoolConfig, SeededRng, SpriteHandle, Time, FIXED_STEP,
};
use glam::{vec2, Vec2};
use log::info;

const FRAMES: u32 = 600;
const VIEW_RADIUS: f32 = 300.0;
const KEEP_RADIUS: f32 = 400.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ParticlePoolConfig::new(2048);
    let fade = Fade::new(key_frames!(
        0.0 => Color::YELLOW,
        0.3 => Color::ORANGE,
        1.0 => Color::RED.with_alpha_scaled(0.0)
    ));
    let mut pool: ParticlePool<SpriteHandle, _> =
        ParticlePool::with_config(config, motion_update(fade))?;
    let mut rng = SeededRng::new(7);

    let spark = SpriteHandle::pixel(0);
    let glow = SpriteHandle::new(1, Vec2::splat(32.0));
    let sparks = Burst::default().count(200);
    let glows = Burst {
        count: 8,
        speed: 5.0..20.0,
        blend: BlendCategory::Alpha,
        scale: Vec2::splat(2.0),
        ..Burst::default()
    }
    .spin(1.5);

    let mut alpha = InstanceBatcher::with_capacity(config.capacity);
    let mut additive = InstanceBatcher::with_capacity(config.capacity);

    let mut time = Time::new();
    let start = time.frame_time();

    for frame in 0..FRAMES {
        time.advance(start + Duration::from_secs_f32((frame + 1) as f32 * FIXED_STEP));
        let angle = frame as f32 * 0.02;
        let center = vec2(angle.cos(), angle.sin()) * 200.0;

        if frame % 30 == 0 {
            sparks.spawn(&mut pool, &mut rng, &spark, center);
            glows.spawn(&mut pool, &mut rng, &glow, center);
        }

        pool.update_from(&time);
        if frame % 60 == 0 {
            pool.cull_by_distance_squared(center, KEEP_RADIUS * KEEP_RADIUS);
        }

        alpha.clear();
        additive.clear();
        pool.draw_blend_within(&mut alpha, BlendCategory::Alpha, center, VIEW_RADIUS * VIEW_RADIUS);
        pool.draw_blend(&mut additive, BlendCategory::Additive);

        if frame % 60 == 0 {
            info!(
                "frame {frame}: {} live, {} alpha instances in {} batches, {} additive instances in {} batches, {} bytes to upload",
                pool.len(),
                alpha.instances().len(),
                alpha.batches().len(),
                additive.instances().len(),
                additive.batches().len(),
                alpha.bytes().len() + additive.bytes().len(),
            );
        }
    }

    info!(
        "done after {} frames, {} particles evicted by overflow",
        time.frame_count(),
        pool.evicted()
    );
    Ok(())
}
