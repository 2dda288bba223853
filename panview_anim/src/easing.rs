// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Timing curve mapping linear progress in `[0, 1]` to eased progress.
///
/// The named presets use the CSS cubic-bezier control points.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// CSS `ease`.
    Ease,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    #[default]
    EaseInOut,
    /// Custom curve through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    ///
    /// `x1` and `x2` are expected in `[0, 1]` so the curve is a function of time.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Control points `(x1, y1, x2, y2)` of this curve.
    #[must_use]
    pub fn control_points(self) -> (f64, f64, f64, f64) {
        match self {
            Self::Linear => (0.0, 0.0, 1.0, 1.0),
            Self::Ease => (0.25, 0.1, 0.25, 1.0),
            Self::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Self::CubicBezier(x1, y1, x2, y2) => (x1, y1, x2, y2),
        }
    }

    /// Eased progress for linear progress `t` (clamped to `[0, 1]`).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if self == Self::Linear {
            return t;
        }
        let (x1, y1, x2, y2) = self.control_points();
        if x1 == y1 && x2 == y2 {
            return t;
        }
        // Invert x(s) = t by bisection; x is monotonic for x1, x2 in [0, 1].
        let mut lo = 0.0_f64;
        let mut hi = 1.0_f64;
        let mut s = t;
        for _ in 0..40 {
            let x = bezier(x1, x2, s);
            if (x - t).abs() < 1e-9 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        bezier(y1, y2, s)
    }
}

/// One-dimensional cubic bezier with fixed end points 0 and 1.
fn bezier(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

#[cfg(test)]
mod tests {
    use super::Easing;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::CubicBezier(0.3, -0.2, 0.7, 1.2),
    ];

    #[test]
    fn end_points_are_fixed() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::EaseIn.apply(-3.0), Easing::EaseIn.apply(0.0));
        assert_eq!(Easing::EaseOut.apply(7.0), Easing::EaseOut.apply(1.0));
        assert_eq!(Easing::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn ease_in_lags_and_ease_out_leads() {
        assert!(Easing::EaseIn.apply(0.3) < 0.3);
        assert!(Easing::EaseOut.apply(0.3) > 0.3);
        let mid = Easing::EaseInOut.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-6, "symmetric curve, got {mid}");
    }

    #[test]
    fn presets_are_monotonic() {
        for easing in &ALL[..5] {
            let mut last = 0.0;
            for i in 0..=100 {
                let v = easing.apply(f64::from(i) / 100.0);
                assert!(v + 1e-9 >= last, "{easing:?} decreased at step {i}");
                last = v;
            }
        }
    }
}
