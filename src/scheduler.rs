// ── Fixed-timestep driver ────────────────────────────────────────────────────
//
// The host calls `advance` once per display frame with the wall-clock time
// since the previous frame.  Time is banked in an accumulator and spent in
// whole `dt` slices, so the simulation runs at the same rate no matter how
// often the host redraws.

/// A simulation that moves forward by consuming itself and returning its
/// successor.
pub trait Step: Sized {
    fn step(self, dt: f32) -> Self;
}

/// Longest frame time fed into the accumulator; anything above is dropped so
/// a stalled window does not trigger a burst of catch-up steps.
pub const MAX_FRAME_TIME: f32 = 0.25;

pub struct FixedStep<S> {
    /// Always `Some` outside of `map`.
    state: Option<S>,
    dt: f32,
    accumulator: f32,
    ticks: u64,
}

impl<S: Step> FixedStep<S> {
    /// Drive `state` at `ups` updates per second.
    pub fn new(state: S, ups: u32) -> Self {
        Self {
            state: Some(state),
            dt: 1.0 / ups.max(1) as f32,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    pub fn dt(&self) -> f32 { self.dt }
    pub fn ticks(&self) -> u64 { self.ticks }
    pub fn state(&self) -> &S {
        self.state.as_ref().expect("state is only vacated inside map")
    }

    /// Replace the state with `f(state)`, outside of the fixed-step cadence.
    /// Used for input commands.
    pub fn map(&mut self, f: impl FnOnce(S) -> S) {
        self.state = self.state.take().map(f);
    }

    /// Bank `elapsed` seconds and run as many whole steps as fit.
    /// Returns the number of steps taken.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);
        let mut steps = 0;
        while self.accumulator >= self.dt {
            let dt = self.dt;
            self.map(|s| s.step(dt));
            self.accumulator -= self.dt;
            self.ticks += 1;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Clock(f32);

    impl Step for Clock {
        fn step(self, dt: f32) -> Self { Clock(self.0 + dt) }
    }

    #[test]
    fn partial_frames_accumulate() {
        let mut fs = FixedStep::new(Clock::default(), 10);
        assert_eq!(fs.advance(0.05), 0);
        assert_eq!(fs.advance(0.06), 1);
        assert_eq!(fs.ticks(), 1);
        assert!((fs.state().0 - 0.1).abs() < 1e-6);
    }

    #[test]
    fn whole_multiples_of_dt_run_exactly_that_many_steps() {
        // 1/64 is exact in binary, so no rounding can hide a step.
        let mut fs = FixedStep::new(Clock::default(), 64);
        let total: u32 = (0..64).map(|_| fs.advance(1.0 / 64.0)).sum();
        assert_eq!(total, 64);
        assert_eq!(fs.advance(3.0 / 64.0), 3);
    }

    #[test]
    fn long_frames_are_capped() {
        let mut fs = FixedStep::new(Clock::default(), 100);
        let steps = fs.advance(10.0);
        assert!(steps <= 26, "capped to MAX_FRAME_TIME worth of steps, got {steps}");
    }

    /// A state with no empty value: the driver must never need one.
    struct Tally(Vec<u32>);

    impl Step for Tally {
        fn step(mut self, _dt: f32) -> Self {
            self.0.push(self.0.len() as u32);
            self
        }
    }

    #[test]
    fn map_and_advance_thread_the_same_value() {
        let mut fs = FixedStep::new(Tally(vec![]), 10);
        fs.map(|mut t| { t.0.push(99); t });
        assert_eq!(fs.advance(0.2), 2);
        assert_eq!(fs.state().0, vec![99, 1, 2]);
    }

    #[test]
    fn negative_elapsed_is_ignored() {
        let mut fs = FixedStep::new(Clock::default(), 60);
        assert_eq!(fs.advance(-1.0), 0);
    }
}
