//! The fixed-timestep driver with exact remainder accumulation.
//!
//! The rendering shell calls [`StepDriver::on_frame`] once per animation
//! frame with the elapsed wall-clock seconds. The driver converts that
//! continuous signal into a whole number of `step_time_delta`-sized scene
//! steps and carries the exact fractional remainder to the next frame --
//! never double-counting or dropping time, however irregular the frames
//! are. The delta passed to [`crate::scene::Scene::step`] is always exactly
//! `step_time_delta`; only the call count varies.
//!
//! The elapsed float is ingested through [`Rational::from_f64`], which is
//! lossless for every finite `f64`, so the remainder arithmetic is exact
//! even though the host reports time as a float.

use crate::rational::Rational;
use crate::scene::Scene;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StepDriver {
    step_time_delta: Rational,
    remainder: Rational,
}

impl StepDriver {
    pub fn new(step_time_delta: Rational) -> Self {
        Self {
            step_time_delta,
            remainder: Rational::ZERO,
        }
    }

    /// A driver matching the scene's configured tick size.
    pub fn for_scene(scene: &Scene) -> Self {
        Self::new(scene.config.step_time_delta)
    }

    /// Feed one frame's elapsed seconds and run the steps that fit.
    /// Returns the number of steps run. Non-finite or negative elapsed
    /// time contributes nothing.
    pub fn on_frame(&mut self, scene: &mut Scene, elapsed_seconds: f64) -> u64 {
        let Some(elapsed) = Rational::from_f64(elapsed_seconds) else {
            return 0;
        };
        if elapsed < Rational::ZERO {
            return 0;
        }
        self.advance(scene, elapsed)
    }

    /// Exact-rational form of [`StepDriver::on_frame`]: runs
    /// `floor((elapsed + remainder) / step_time_delta)` steps and keeps the
    /// rest.
    pub fn advance(&mut self, scene: &mut Scene, elapsed: Rational) -> u64 {
        if self.step_time_delta <= Rational::ZERO {
            // A non-positive tick size would never drain the accumulator.
            return 0;
        }
        self.remainder += elapsed;
        let mut steps = 0;
        while self.remainder >= self.step_time_delta {
            self.remainder -= self.step_time_delta;
            scene.step(self.step_time_delta);
            steps += 1;
        }
        steps
    }

    /// The fractional time carried to the next frame. Always in
    /// `[0, step_time_delta)` after an `advance`.
    pub fn remainder(&self) -> Rational {
        self.remainder
    }

    pub fn step_time_delta(&self) -> Rational {
        self.step_time_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{empty_scene, rat};

    #[test]
    fn remainder_carries_across_frames() {
        // step 0.6: six frames of 1s yield 1,2,2,1,2,2 steps
        // (cumulative 1,3,5,6,8,10).
        let mut scene = empty_scene();
        let mut driver = StepDriver::new(rat(3, 5));
        let counts: Vec<u64> = (0..6).map(|_| driver.on_frame(&mut scene, 1.0)).collect();
        assert_eq!(counts, [1, 2, 2, 1, 2, 2]);
        assert_eq!(driver.remainder(), Rational::ZERO);
    }

    #[test]
    fn remainder_is_exact_between_frames() {
        let mut scene = empty_scene();
        let mut driver = StepDriver::new(rat(3, 5));
        driver.on_frame(&mut scene, 1.0);
        assert_eq!(driver.remainder(), rat(2, 5));
        driver.on_frame(&mut scene, 1.0);
        assert_eq!(driver.remainder(), rat(1, 5));
    }

    #[test]
    fn short_frames_accumulate_into_a_step() {
        let mut scene = empty_scene();
        let mut driver = StepDriver::new(Rational::ONE);
        // Four quarter-second frames: no step until the total reaches 1.
        assert_eq!(driver.on_frame(&mut scene, 0.25), 0);
        assert_eq!(driver.on_frame(&mut scene, 0.25), 0);
        assert_eq!(driver.on_frame(&mut scene, 0.25), 0);
        assert_eq!(driver.on_frame(&mut scene, 0.25), 1);
        assert_eq!(driver.remainder(), Rational::ZERO);
    }

    #[test]
    fn large_frame_runs_many_steps() {
        let mut scene = empty_scene();
        let mut driver = StepDriver::new(rat(1, 10));
        assert_eq!(driver.on_frame(&mut scene, 2.5), 25);
    }

    #[test]
    fn rejects_non_finite_and_negative_elapsed() {
        let mut scene = empty_scene();
        let mut driver = StepDriver::new(Rational::ONE);
        assert_eq!(driver.on_frame(&mut scene, f64::NAN), 0);
        assert_eq!(driver.on_frame(&mut scene, f64::INFINITY), 0);
        assert_eq!(driver.on_frame(&mut scene, -3.0), 0);
        assert_eq!(driver.remainder(), Rational::ZERO);
    }

    #[test]
    fn non_positive_step_size_runs_nothing() {
        let mut scene = empty_scene();
        let mut driver = StepDriver::new(Rational::ZERO);
        assert_eq!(driver.on_frame(&mut scene, 10.0), 0);
    }

    #[test]
    fn advance_matches_floor_division() {
        let mut scene = empty_scene();
        let mut driver = StepDriver::new(rat(3, 5));
        // 17/5 elapsed over a 3/5 step: floor(17/3) = 5 steps, 2/5 left.
        assert_eq!(driver.advance(&mut scene, rat(17, 5)), 5);
        assert_eq!(driver.remainder(), rat(2, 5));
    }
}
