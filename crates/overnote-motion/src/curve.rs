use serde::{Deserialize, Serialize};

/// Acceptable distance between the requested progress and the progress
/// found on the Bézier curve.
const CUBIC_ERROR_BOUND: f64 = 0.001;

/// Upper bound on bisection steps; 0.5^64 is far below the error bound.
const MAX_BISECTION_STEPS: usize = 64;

/// Cubic Bézier easing curve through `(0, 0)`, `(a, b)`, `(c, d)`, `(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Cubic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Cubic {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    fn evaluate(first: f64, second: f64, m: f64) -> f64 {
        3.0 * first * (1.0 - m) * (1.0 - m) * m + 3.0 * second * (1.0 - m) * m * m + m * m * m
    }

    /// Maps linear progress `t` through the curve by bisecting for the curve
    /// parameter whose x coordinate matches `t`.
    pub fn transform(&self, t: f64) -> f64 {
        let mut start = 0.0;
        let mut end = 1.0;
        let mut midpoint = 0.5;
        for _ in 0..MAX_BISECTION_STEPS {
            midpoint = (start + end) / 2.0;
            let estimate = Self::evaluate(self.a, self.c, midpoint);
            if (t - estimate).abs() < CUBIC_ERROR_BOUND {
                break;
            }
            if estimate < t {
                start = midpoint;
            } else {
                end = midpoint;
            }
        }
        Self::evaluate(self.b, self.d, midpoint)
    }
}

/// Easing function applied to the driver's linear progress.
///
/// Named curves match the CSS timing functions of the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    Linear,
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material "standard" curve: quick start, long settle.
    FastOutSlowIn,
    Cubic(Cubic),
}

impl Curve {
    /// Returns the Bézier control points backing this curve, or `None` for
    /// the identity curve.
    pub fn control_points(self) -> Option<Cubic> {
        match self {
            Curve::Linear => None,
            Curve::Ease => Some(Cubic::new(0.25, 0.1, 0.25, 1.0)),
            Curve::EaseIn => Some(Cubic::new(0.42, 0.0, 1.0, 1.0)),
            Curve::EaseOut => Some(Cubic::new(0.0, 0.0, 0.58, 1.0)),
            Curve::EaseInOut => Some(Cubic::new(0.42, 0.0, 0.58, 1.0)),
            Curve::FastOutSlowIn => Some(Cubic::new(0.4, 0.0, 0.2, 1.0)),
            Curve::Cubic(cubic) => Some(cubic),
        }
    }

    /// Maps linear progress in `[0, 1]` to eased progress. Out-of-range input
    /// is clamped and both end points are preserved exactly.
    pub fn transform(self, t: f64) -> f64 {
        let t = crate::clamp_unit(t);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self.control_points() {
            Some(cubic) => cubic.transform(t),
            None => t,
        }
    }
}
