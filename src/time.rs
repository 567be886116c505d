use std::time::{Duration, Instant};

use smallvec::SmallVec;

const CACHED_DELTA_TIMES_COUNT: usize = 20;

/// The frame step used when no measured delta is at hand: one frame at 60 fps.
pub const FIXED_STEP: f32 = 1.0 / 60.0;

/// Frame clock. Call [`Time::start_frame`] once at the top of every frame.
#[derive(Debug)]
pub struct Time {
    frame_count: usize,
    frame_time: Instant,
    delta_time: Duration,
    total_time: Duration,
    start_time: Instant,
    /// newest first, never spills to the heap.
    delta_times: SmallVec<[Duration; CACHED_DELTA_TIMES_COUNT]>,
    stats: TimeStats,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TimeStats {
    pub fps: Stats,
    pub delta_ms: Stats,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
    pub max: f64,
    pub min: f64,
    pub avg: f64,
    pub std: f64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        let initial_delta = Duration::from_secs_f32(FIXED_STEP);
        let mut delta_times = SmallVec::new();
        delta_times.push(initial_delta);
        let mut stats = TimeStats::default();
        stats.recalculate(&delta_times);
        Time {
            start_time: now,
            total_time: Duration::ZERO,
            frame_count: 0,
            frame_time: now,
            delta_time: initial_delta,
            delta_times,
            stats,
        }
    }

    pub fn start_frame(&mut self) {
        self.advance(Instant::now());
    }

    /// Same as [`Time::start_frame`] with an explicit timestamp, for replays and tests.
    pub fn advance(&mut self, this_frame: Instant) {
        self.total_time = this_frame.saturating_duration_since(self.start_time);
        self.delta_time = this_frame.saturating_duration_since(self.frame_time);
        if self.delta_times.len() >= CACHED_DELTA_TIMES_COUNT {
            self.delta_times.pop();
        }
        self.delta_times.insert(0, self.delta_time);
        self.frame_time = this_frame;
        self.frame_count += 1;
        self.stats.recalculate(&self.delta_times);
    }

    pub fn frame_time(&self) -> Instant {
        self.frame_time
    }

    #[inline(always)]
    pub fn delta(&self) -> &Duration {
        &self.delta_time
    }

    #[inline(always)]
    pub fn delta_secs(&self) -> f32 {
        self.delta_time.as_secs_f32()
    }

    pub fn total(&self) -> &Duration {
        &self.total_time
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn fps(&self) -> f64 {
        self.stats.fps.avg
    }

    pub fn worst_fps(&self) -> f64 {
        self.stats.fps.min
    }

    pub fn stats(&self) -> &TimeStats {
        &self.stats
    }
}

impl TimeStats {
    fn recalculate(&mut self, delta_times: &[Duration]) {
        assert!(!delta_times.is_empty());
        assert!(delta_times.len() <= CACHED_DELTA_TIMES_COUNT);

        let mut delta_ms: SmallVec<[f64; CACHED_DELTA_TIMES_COUNT]> = SmallVec::new();
        let mut fps: SmallVec<[f64; CACHED_DELTA_TIMES_COUNT]> = SmallVec::new();
        for d in delta_times {
            // a zero delta would turn into infinite fps.
            let secs = d.as_secs_f64().max(1e-6);
            delta_ms.push(secs * 1000.0);
            fps.push(1.0 / secs);
        }

        self.delta_ms = Stats::new(&delta_ms);
        self.fps = Stats::new(&fps);
    }
}

impl Stats {
    fn new(nums: &[f64]) -> Self {
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        let mut sum = 0.0;
        let mut sqsum = 0.0;
        for e in nums {
            sum += *e;
            sqsum += *e * *e;
            max = max.max(*e);
            min = min.min(*e);
        }
        let len = nums.len() as f64;
        let avg = sum / len;
        let var = (sqsum / len) - avg * avg;
        let std = var.max(0.0).sqrt();
        Stats { max, min, avg, std }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Time, FIXED_STEP};

    #[test]
    fn advance_measures_delta() {
        let mut time = Time::new();
        let t0 = time.frame_time();
        time.advance(t0 + Duration::from_millis(20));
        assert_eq!(*time.delta(), Duration::from_millis(20));
        assert!((time.delta_secs() - 0.02).abs() < 1e-6);
        assert_eq!(time.frame_count(), 1);

        time.advance(t0 + Duration::from_millis(30));
        assert_eq!(*time.delta(), Duration::from_millis(10));
        assert_eq!(time.frame_count(), 2);
        assert!(time.worst_fps() <= time.fps());
    }

    #[test]
    fn stats_keep_a_bounded_window() {
        let mut time = Time::new();
        let mut t = time.frame_time();
        for _ in 0..100 {
            t += Duration::from_millis(10);
            time.advance(t);
        }
        // only 10ms frames are left in the window.
        assert!((time.fps() - 100.0).abs() < 1e-6);
        assert!((time.stats().delta_ms.max - 10.0).abs() < 1e-6);
    }

    #[test]
    fn starts_with_fixed_step() {
        let time = Time::new();
        assert!((time.delta_secs() - FIXED_STEP).abs() < 1e-6);
    }
}
