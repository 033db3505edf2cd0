use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous processed tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic tick counter.
    pub frame_index: u64,
}

/// Fixed-timestep gate.
///
/// A tick is eligible once at least `interval` has elapsed since the last
/// processed tick. The baseline only moves when a tick is actually taken, so
/// early checks never shorten the following interval.
#[derive(Debug, Clone)]
pub struct FrameGate {
    last: Instant,
    interval: Duration,
    frame_index: u64,
}

impl FrameGate {
    /// Creates a gate targeting `fps` ticks per second.
    ///
    /// `fps == 0` is treated as 1.
    pub fn new(fps: u32) -> Self {
        Self {
            last: Instant::now(),
            interval: Self::interval_for(fps),
            frame_index: 0,
        }
    }

    /// Frame interval for a target rate.
    pub fn interval_for(fps: u32) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Earliest instant at which the next tick becomes eligible.
    pub fn next_deadline(&self) -> Instant {
        self.last + self.interval
    }

    /// Resets the baseline to now.
    ///
    /// Called once the window exists so the first tick is a full interval away.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub fn reset_at(&mut self, now: Instant) {
        self.last = now;
    }

    /// Takes a tick if one is due.
    pub fn try_tick(&mut self) -> Option<FrameTime> {
        self.try_tick_at(Instant::now())
    }

    /// Takes a tick at `now` if at least one interval has elapsed.
    ///
    /// Returns `None` without touching the baseline otherwise.
    pub fn try_tick_at(&mut self, now: Instant) -> Option<FrameTime> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.interval {
            return None;
        }

        self.last = now;

        let ft = FrameTime {
            dt: elapsed.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        Some(ft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_at(fps: u32) -> (FrameGate, Instant) {
        let start = Instant::now();
        let mut gate = FrameGate::new(fps);
        gate.reset_at(start);
        (gate, start)
    }

    #[test]
    fn interval_matches_target_rate() {
        let (gate, _) = gate_at(60);
        let expected = 1.0 / 60.0;
        assert!((gate.interval().as_secs_f64() - expected).abs() < 1e-9);
    }

    #[test]
    fn zero_fps_falls_back_to_one_per_second() {
        assert_eq!(FrameGate::interval_for(0), Duration::from_secs(1));
    }

    #[test]
    fn early_check_does_not_tick_or_move_baseline() {
        let (mut gate, start) = gate_at(60);
        assert!(gate.try_tick_at(start + Duration::from_millis(5)).is_none());
        assert!(gate.try_tick_at(start + Duration::from_millis(16)).is_none());
        assert_eq!(gate.next_deadline(), start + gate.interval());
    }

    #[test]
    fn tick_after_interval_updates_baseline() {
        let (mut gate, start) = gate_at(60);
        let at = start + Duration::from_millis(17);
        let ft = gate.try_tick_at(at).expect("tick should be due");
        assert_eq!(ft.frame_index, 0);
        assert_eq!(gate.next_deadline(), at + gate.interval());
        assert!(ft.dt >= 0.016);
    }

    #[test]
    fn frame_index_increments_per_tick() {
        let (mut gate, start) = gate_at(10);
        let a = gate.try_tick_at(start + Duration::from_millis(100)).unwrap();
        let b = gate.try_tick_at(start + Duration::from_millis(200)).unwrap();
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
    }

    #[test]
    fn processed_ticks_are_never_closer_than_interval() {
        let (mut gate, start) = gate_at(60);
        let interval = gate.interval();

        // Irregular polling: steps between 1 and 12 ms.
        let mut t = start;
        let mut ticks = Vec::new();
        let mut seed: u32 = 0x1234_5678;
        for _ in 0..2_000 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            t += Duration::from_micros(1_000 + u64::from(seed % 11_000));
            if let Some(ft) = gate.try_tick_at(t) {
                ticks.push(ft.now);
            }
        }

        assert!(ticks.len() > 10);
        assert!(ticks[0] - start >= interval);
        for pair in ticks.windows(2) {
            assert!(pair[1] - pair[0] >= interval);
        }
    }

    #[test]
    fn time_going_backwards_is_not_a_tick() {
        let (mut gate, start) = gate_at(60);
        gate.reset_at(start + Duration::from_secs(1));
        assert!(gate.try_tick_at(start).is_none());
    }
}
