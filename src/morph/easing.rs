use easer::functions::{Cubic, Easing as _, Expo, Linear, Quad, Sine};

/// Easing profile used to pace a morph
///
/// Every profile is an ease-in-out curve normalized to `value(0) == 0` and `value(1) == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    Quadratic,
    #[default]
    Cubic,
    Sine,
    Exponential,
}

/// Step used to estimate the slope of an easing curve
const DERIVATIVE_STEP: f64 = 1e-4;

impl Easing {
    fn raw(&self, x: f64) -> f64 {
        match self {
            Easing::Linear => Linear::ease_in_out(x, 0., 1., 1.),
            Easing::Quadratic => Quad::ease_in_out(x, 0., 1., 1.),
            Easing::Cubic => Cubic::ease_in_out(x, 0., 1., 1.),
            Easing::Sine => Sine::ease_in_out(x, 0., 1., 1.),
            Easing::Exponential => Expo::ease_in_out(x, 0., 1., 1.),
        }
    }

    /// Eased progress at normalized time `x`, clamped to [0, 1]
    /// # Example
    /// ```
    /// use coons::prelude::*;
    ///
    /// assert_eq!(Easing::Cubic.value(0.), 0.);
    /// assert_eq!(Easing::Cubic.value(1.), 1.);
    /// assert!(Easing::Cubic.value(0.25) < 0.25);
    /// ```
    pub fn value(&self, x: f64) -> f64 {
        let x = x.clamp(0., 1.);
        if x == 0. {
            return 0.;
        }
        if x == 1. {
            return 1.;
        }
        let (start, end) = (self.raw(0.), self.raw(1.));
        (self.raw(x) - start) / (end - start)
    }

    /// Rate of change of the eased progress at normalized time `x`, see `MorphEngine::rate`
    pub fn derivative(&self, x: f64) -> f64 {
        let lo = (x - DERIVATIVE_STEP).max(0.);
        let hi = (x + DERIVATIVE_STEP).min(1.);
        (self.value(hi) - self.value(lo)) / (hi - lo)
    }

    /// Fraction of the total motion covered by step `t` of a morph lasting `duration` steps:
    /// the discrete derivative `value(t / d) - value((t - 1) / d)`, zero at `t == 0`.
    ///
    /// The increments of steps `0..=duration` sum to exactly the whole motion.
    pub fn increment(&self, t: usize, duration: usize) -> f64 {
        if t == 0 || duration == 0 {
            return 0.;
        }
        let d = duration as f64;
        self.value(t as f64 / d) - self.value((t - 1) as f64 / d)
    }
}
