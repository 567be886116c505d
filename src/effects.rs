//! A ready made particle behavior: particles that fly off with some velocity, slow down and fade.

use std::ops::Range;

use glam::Vec2;

use crate::{BlendCategory, Color, KeyFrames, Particle, ParticlePool, SeededRng};

/// State payload of a moving particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// units per second
    pub velocity: Vec2,
    /// Fraction of the velocity lost per second, 0.0 keeps the speed.
    pub drag: f32,
    /// radians per second. 0.0 points the particle in its direction of travel instead.
    pub spin: f32,
}

impl Motion {
    pub fn new(velocity: Vec2) -> Self {
        Motion {
            velocity,
            drag: 0.0,
            spin: 0.0,
        }
    }
}

/// Speeds below this are snapped to zero, so particles come to rest instead of creeping.
const REST_SPEED_SQUARED: f32 = 1e-6;

/// Moves the particle along its velocity, turns it and applies drag.
pub fn apply_motion<H>(particle: &mut Particle<H, Motion>, dt: f32) {
    let motion = &mut particle.state;
    particle.position += motion.velocity * dt;
    if motion.spin != 0.0 {
        particle.orientation += motion.spin * dt;
    } else if motion.velocity != Vec2::ZERO {
        particle.orientation = motion.velocity.y.atan2(motion.velocity.x);
    }

    let keep = (1.0 - motion.drag).clamp(0.0, 1.0).powf(dt);
    motion.velocity *= keep;
    if motion.velocity.length_squared() < REST_SPEED_SQUARED {
        motion.velocity = Vec2::ZERO;
    }
}

/// Tint of a particle over its age, 0.0 new and 1.0 expired.
#[derive(Debug, Clone)]
pub struct Fade {
    colors: KeyFrames<Color>,
}

impl Fade {
    pub fn new(colors: KeyFrames<Color>) -> Self {
        Fade { colors }
    }

    /// Full `color` for the first half of the life, then a linear fade to transparent.
    pub fn out(color: Color) -> Self {
        Fade::new(crate::key_frames!(
            0.0 => color,
            0.5 => color,
            1.0 => color.with_alpha_scaled(0.0)
        ))
    }

    pub fn get(&self, age: f32) -> Color {
        self.colors.get(age)
    }

    pub fn apply<H, S>(&self, particle: &mut Particle<H, S>) {
        particle.tint = self.get(particle.age());
    }
}

/// Update callback for moving particles: [`apply_motion`] followed by the tint of `fade`.
pub fn motion_update<H>(fade: Fade) -> impl FnMut(&mut Particle<H, Motion>, f32) {
    move |particle, dt| {
        apply_motion(particle, dt);
        fade.apply(particle);
    }
}

/// Spawns a ring of particles in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    pub count: usize,
    pub speed: Range<f32>,
    /// seconds
    pub duration: Range<f32>,
    pub drag: f32,
    pub spin: f32,
    /// Tint until the first update, after that the pool's callback owns it.
    pub tint: Color,
    pub scale: Vec2,
    pub blend: BlendCategory,
}

impl Default for Burst {
    fn default() -> Self {
        Self {
            count: 32,
            speed: 40.0..160.0,
            duration: 0.6..1.4,
            drag: 0.9,
            spin: 0.0,
            tint: Color::ORANGE,
            scale: Vec2::ONE,
            blend: BlendCategory::Additive,
        }
    }
}

impl Burst {
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    /// Creates `count` particles at `center`. On a full pool the oldest particles make room.
    pub fn spawn<H: Clone>(
        &self,
        pool: &mut ParticlePool<H, Motion>,
        rng: &mut SeededRng,
        handle: &H,
        center: Vec2,
    ) {
        for _ in 0..self.count {
            let velocity = rng.vector_in_disc(self.speed.start, self.speed.end);
            let duration = rng.range(self.duration.clone());
            let motion = Motion {
                velocity,
                drag: self.drag,
                spin: self.spin,
            };
            pool.create(handle.clone(), center, self.tint, duration, self.scale, motion)
                .with_orientation(velocity.y.atan2(velocity.x))
                .with_blend(self.blend);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec2, Vec2};

    use super::{apply_motion, motion_update, Burst, Fade, Motion};
    use crate::{key_frames, BlendCategory, Color, Particle, ParticlePool, SeededRng, SpriteHandle};

    const DOT: SpriteHandle = SpriteHandle::pixel(0);

    fn motion_pool(capacity: usize) -> ParticlePool<SpriteHandle, Motion> {
        ParticlePool::new(capacity, motion_update(Fade::out(Color::WHITE))).unwrap()
    }

    fn moving(motion: Motion) -> Particle<SpriteHandle, Motion> {
        Particle::new(DOT, Vec2::ZERO, Color::WHITE, 1.0, Vec2::ONE, motion)
    }

    #[test]
    fn particles_move_and_face_their_velocity() {
        let mut pool = motion_pool(4);
        let motion = Motion::new(vec2(0.0, 10.0));
        pool.create(DOT, Vec2::ZERO, Color::WHITE, 10.0, Vec2::ONE, motion);
        pool.update(0.5);
        assert_eq!(pool[0].position, vec2(0.0, 5.0));
        assert!((pool[0].orientation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(pool[0].state.velocity, vec2(0.0, 10.0));
    }

    #[test]
    fn spin_overrides_facing() {
        let mut p = moving(Motion {
            velocity: vec2(0.0, 10.0),
            drag: 0.0,
            spin: 2.0,
        });
        apply_motion(&mut p, 0.25);
        assert!((p.orientation - 0.5).abs() < 1e-6);
        apply_motion(&mut p, 0.25);
        assert!((p.orientation - 1.0).abs() < 1e-6);
        assert_eq!(p.position, vec2(0.0, 5.0));
    }

    #[test]
    fn drag_slows_down_to_rest() {
        let mut pool = motion_pool(1);
        let motion = Motion {
            drag: 0.5,
            ..Motion::new(vec2(1.0, 0.0))
        };
        pool.create(DOT, Vec2::ZERO, Color::WHITE, 1000.0, Vec2::ONE, motion);
        pool.update(1.0);
        assert!((pool[0].state.velocity.x - 0.5).abs() < 1e-6);
        for _ in 0..100 {
            pool.update(1.0);
        }
        assert_eq!(pool[0].state.velocity, Vec2::ZERO);
    }

    #[test]
    fn full_drag_stops_at_once() {
        let mut p = moving(Motion {
            drag: 1.0,
            ..Motion::new(vec2(3.0, 4.0))
        });
        apply_motion(&mut p, 0.1);
        assert_eq!(p.state.velocity, Vec2::ZERO);
        assert!((p.position - vec2(0.3, 0.4)).length() < 1e-6);
    }

    #[test]
    fn fade_follows_color_frames() {
        let fade = Fade::new(key_frames!(0.0 => Color::RED, 1.0 => Color::BLUE));
        assert_eq!(fade.get(0.0), Color::RED);
        assert_eq!(fade.get(0.5), Color::rgba(0.5, 0.0, 0.5, 1.0));
        assert_eq!(fade.get(1.0), Color::BLUE);

        let out = Fade::out(Color::ORANGE);
        assert_eq!(out.get(0.25), Color::ORANGE);
        assert_eq!(out.get(0.75), Color::ORANGE.with_alpha_scaled(0.5));
    }

    #[test]
    fn tint_fades_over_age() {
        let mut pool = ParticlePool::new(1, motion_update(Fade::out(Color::RED))).unwrap();
        let motion = Motion::new(Vec2::ZERO);
        pool.create(DOT, Vec2::ZERO, Color::WHITE, 1.0, Vec2::ONE, motion);
        // the callback sees the age before this update's aging
        pool.update(0.75);
        assert_eq!(pool[0].tint, Color::RED);
        pool.update(0.1);
        // age 0.75 is halfway through the fade
        let tint = pool[0].tint;
        assert_eq!((tint.r, tint.g), (1.0, 0.0));
        assert!((tint.a - 0.5).abs() < 1e-5);
    }

    #[test]
    fn burst_spawns_with_settings() {
        let mut pool = motion_pool(64);
        let mut rng = SeededRng::new(99);
        let burst = Burst::default().count(20).tint(Color::BLUE).spin(3.0);
        burst.spawn(&mut pool, &mut rng, &DOT, vec2(5.0, 5.0));
        assert_eq!(pool.len(), 20);
        for p in pool.iter() {
            assert_eq!(p.position, vec2(5.0, 5.0));
            assert_eq!(p.blend, BlendCategory::Additive);
            assert_eq!(p.tint, Color::BLUE);
            assert_eq!(p.state.spin, 3.0);
            let speed = p.state.velocity.length();
            assert!(speed >= 40.0 - 1e-3 && speed <= 160.0 + 1e-3);
            assert!(p.duration >= 0.6 && p.duration < 1.4);
        }
    }

    #[test]
    fn burst_is_deterministic_per_seed() {
        let burst = Burst::default();
        let run = |seed| {
            let mut pool = motion_pool(16);
            burst.spawn(&mut pool, &mut SeededRng::new(seed), &DOT, Vec2::ZERO);
            pool.iter().map(|p| p.state).collect::<Vec<_>>()
        };
        assert_eq!(run(1), run(1));
        assert_ne!(run(1), run(2));
    }

    #[test]
    fn burst_overflow_evicts() {
        let mut pool = motion_pool(10);
        let mut rng = SeededRng::new(0);
        Burst::default()
            .count(25)
            .spawn(&mut pool, &mut rng, &DOT, Vec2::ZERO);
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.evicted(), 15);
    }
}
