use std::time::Duration;

/// Longest frame gap that gets simulated. Anything above is dropped so a
/// suspended process does not wake up to a burst of thousands of steps.
const MAX_FRAME: Duration = Duration::from_secs(1);

/// Fixed-timestep accumulator: real time goes in, whole simulation steps
/// come out at a constant rate.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    pending: Duration,
}

impl FixedStep {
    pub fn new(steps_per_second: u32) -> Self {
        FixedStep {
            step: Duration::from_secs(1) / steps_per_second.max(1),
            pending: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn accumulate(&mut self, elapsed: Duration) {
        self.pending += elapsed.min(MAX_FRAME);
    }

    /// Consumes one step if a whole one is pending.
    pub fn take(&mut self) -> bool {
        if self.pending >= self.step {
            self.pending -= self.step;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut FixedStep) -> usize {
        std::iter::from_fn(|| clock.take().then_some(())).count()
    }

    #[test]
    fn test_step_duration() {
        assert_eq!(FixedStep::new(60).step(), Duration::from_nanos(16_666_666));
        assert_eq!(FixedStep::new(10).step(), Duration::from_millis(100));
    }

    #[test]
    fn test_whole_steps_are_drained() {
        let mut clock = FixedStep::new(10);
        clock.accumulate(Duration::from_millis(350));
        assert_eq!(drain(&mut clock), 3);

        // The 50ms remainder carries over
        clock.accumulate(Duration::from_millis(50));
        assert_eq!(drain(&mut clock), 1);
        assert_eq!(drain(&mut clock), 0);
    }

    #[test]
    fn test_rate_independent_of_frame_rate() {
        let mut fast = FixedStep::new(60);
        let mut slow = FixedStep::new(60);
        let mut fast_steps = 0;
        let mut slow_steps = 0;

        for _ in 0..144 {
            fast.accumulate(Duration::from_secs(1) / 144);
            fast_steps += drain(&mut fast);
        }
        for _ in 0..30 {
            slow.accumulate(Duration::from_secs(1) / 30);
            slow_steps += drain(&mut slow);
        }
        assert!((59..=60).contains(&fast_steps));
        assert!((59..=60).contains(&slow_steps));
    }

    #[test]
    fn test_long_gaps_are_clamped() {
        let mut clock = FixedStep::new(10);
        clock.accumulate(Duration::from_secs(30));
        assert_eq!(drain(&mut clock), 10);
    }
}
