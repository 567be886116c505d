use smallvec::SmallVec;

use crate::Lerp;

/// A value curve over time, e.g. the tint of a particle over its age.
///
/// Frames are sorted by time and evaluated with the easing of the frame to the left.
#[derive(Debug, Clone)]
pub struct KeyFrames<T: Clone + Lerp> {
    frames: SmallVec<[KeyFrame<T>; 4]>,
}

#[derive(Debug, Clone)]
pub struct KeyFrame<T> {
    pub t: f32,
    pub value: T,
    pub easing: Easing,
}

impl<T: Clone + Lerp> KeyFrames<T> {
    /// Panics if `frames` is empty or the times are not strictly ascending.
    pub fn new(frames: SmallVec<[KeyFrame<T>; 4]>) -> Self {
        assert!(!frames.is_empty(), "KeyFrames need at least one frame");
        for pair in frames.windows(2) {
            assert!(
                pair[1].t > pair[0].t,
                "KeyFrames times must be strictly ascending: {} then {}",
                pair[0].t,
                pair[1].t
            );
        }
        Self { frames }
    }

    pub fn constant(value: T) -> Self {
        let mut frames = SmallVec::new();
        frames.push(KeyFrame {
            t: 0.0,
            value,
            easing: Easing::Linear,
        });
        Self { frames }
    }

    /// Remaps the frame times onto 0.0..=1.0.
    pub fn normalize_time(mut self) -> Self {
        if self.frames.len() == 1 {
            self.frames[0].t = 0.0;
            return self;
        }

        let min = self.frames[0].t;
        let span = self.frames[self.frames.len() - 1].t - min;
        for frame in self.frames.iter_mut() {
            frame.t = (frame.t - min) / span;
        }
        self
    }

    pub fn get(&self, t: f32) -> T {
        // index of the first frame strictly after t
        let i = self.frames.partition_point(|f| f.t <= t);
        if i == 0 {
            return self.frames[0].value.clone();
        }
        if i == self.frames.len() {
            return self.frames[i - 1].value.clone();
        }

        let left = &self.frames[i - 1];
        let right = &self.frames[i];
        let factor = (t - left.t) / (right.t - left.t);
        left.value.lerp(&right.value, left.easing.y(factor))
    }
}

#[macro_export]
macro_rules! key_frames {
    ($($t:expr => $v:expr),+) => {
      {
        use $crate::key_frames::{Easing, KeyFrame, KeyFrames};
        let frames = $crate::ext::smallvec::smallvec![
            $(KeyFrame { t: $t, value: $v, easing: Easing::Linear }),+
        ];
        KeyFrames::new(frames)
      }
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    Step,
    EaseInCubic,
    EaseOutCubic,
    EaseInOut,
}

impl Easing {
    #[inline(always)]
    pub fn y(&self, x: f32) -> f32 {
        match self {
            Easing::Linear => x,
            Easing::Step => x.round(),
            Easing::EaseInCubic => simple_easing::cubic_in(x),
            Easing::EaseOutCubic => simple_easing::cubic_out(x),
            Easing::EaseInOut => simple_easing::sine_in_out(x),
        }
    }
}
