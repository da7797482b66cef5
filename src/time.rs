//! Fixed-timestep game clock using an accumulator pattern.
//!
//! `draw_web()` fires at the display refresh rate with a variable delta.
//! `GameTime` turns that into a whole number of ticks, so the dungeon's enemy
//! cooldowns and elapsed-time display depend only on tick counts.

/// Game ticks per real-time second. 100 ms per tick.
pub const TICKS_PER_SEC: u32 = 10;

/// Longest frame gap honoured, in ms. A backgrounded tab would otherwise
/// replay a burst of enemy moves when it comes back.
const MAX_FRAME_DELTA_MS: f64 = 500.0;

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks.
    accumulator: f64,
    /// None until the first frame arrives.
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (`performance.now()`), get back the number
    /// of ticks to run this frame. The first call only primes the clock.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        assert_eq!(gt.update(1234.0), 0);
    }

    #[test]
    fn whole_ticks_and_remainder() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(0.0);
        assert_eq!(gt.update(350.0), 3); // 50ms left over
        assert_eq!(gt.update(400.0), 1); // 50 + 50
        assert_eq!(gt.update(450.0), 0);
    }

    #[test]
    fn backgrounded_tab_is_clamped() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(0.0);
        assert_eq!(gt.update(10_000.0), 5);
    }

    #[test]
    fn clock_going_backwards_yields_nothing() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(1000.0);
        assert_eq!(gt.update(900.0), 0);
        assert_eq!(gt.update(1000.0), 1);
    }

    #[test]
    fn one_second_at_60fps_is_about_one_enemy_step() {
        let mut gt = GameTime::new(TICKS_PER_SEC);
        gt.update(0.0);
        let total: u32 = (1..=60).map(|i| gt.update(i as f64 * 16.667)).sum();
        assert!((9..=11).contains(&total), "expected ~10 ticks, got {}", total);
    }
}
