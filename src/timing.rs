use std::time::Instant;

// 窗口被拖动或调试暂停后，单帧时间按这个上限计算，避免相机瞬移
const MAX_FRAME_TIME: f32 = 0.1;

/// 每帧调用一次 tick()，同一帧内的所有移动都用这一个 delta
pub struct FrameClock {
    last_frame: Instant,
    delta: f32,
    smoothed_fps: f32,
    smoothing: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame: start,
            delta: 0.0,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            // 指数滑动平均
            self.smoothed_fps =
                self.smoothed_fps * (1.0 - self.smoothing) + (1.0 / frame_time) * self.smoothing;
        }
        self.delta = frame_time.min(MAX_FRAME_TIME);
        self.delta
    }

    /// 本帧的 delta，不会重新计时
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn delta_is_time_since_previous_tick() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-4);
        assert_eq!(clock.delta(), dt);

        let dt = clock.tick_at(start + Duration::from_millis(48));
        assert!((dt - 0.032).abs() < 1e-4);
    }

    #[test]
    fn delta_is_stable_within_a_frame() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.tick_at(start + Duration::from_millis(20));
        let first = clock.delta();
        let second = clock.delta();
        assert_eq!(first, second);
    }

    #[test]
    fn long_stalls_are_clamped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let dt = clock.tick_at(start + Duration::from_secs(3));
        assert_eq!(dt, MAX_FRAME_TIME);
    }

    #[test]
    fn fps_moves_towards_frame_rate() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let mut now = start;
        for _ in 0..200 {
            now += Duration::from_millis(10);
            clock.tick_at(now);
        }
        assert!((clock.fps() - 100.0).abs() < 2.0);
    }

    #[test]
    fn time_going_backwards_gives_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.tick_at(start - Duration::from_millis(500)), 0.0);
    }
}
