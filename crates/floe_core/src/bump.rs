//! Smooth non-analytic step and bump functions.
//!
//! These build the continuous ice/water albedo transition: `smooth_step`
//! is the classic `exp(-1/t)` mollifier seed and `bump` normalizes it
//! into a monotone transition from 0 to 1 on the unit interval.

/// Smooth non-analytic step: `0` for `t <= 0`, `exp(-1/t)` for `t > 0`.
///
/// Infinitely differentiable everywhere, including at `t = 0` where all
/// derivatives vanish. For `t` below roughly `1.4e-3` the exponential
/// underflows to `0.0`; callers that divide by sums of these values
/// must handle that (see [`bump`]).
pub fn smooth_step(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else {
        (-t.recip()).exp()
    }
}

/// Smooth transition from 0 (`t <= 0`) to 1 (`t >= 1`), monotone
/// non-decreasing on `[0, 1]`.
///
/// Computed as `s(t) / (s(t) + s(1-t))` with `s = smooth_step`. The
/// denominator can underflow to exactly `0.0` only when both terms
/// underflow at once; the quotient is then pinned to the limiting
/// value on the nearer side rather than letting `0/0` produce NaN,
/// which would otherwise corrupt every downstream sample.
pub fn bump(t: f64) -> f64 {
    let rising = smooth_step(t);
    let falling = smooth_step(1.0 - t);
    let denom = rising + falling;
    if denom == 0.0 {
        return if t >= 0.5 { 1.0 } else { 0.0 };
    }
    rising / denom
}

#[cfg(test)]
mod tests {
    use super::{bump, smooth_step};

    #[test]
    fn smooth_step_vanishes_for_nonpositive_inputs() {
        for &t in &[-10.0, -1.0, -1e-12, 0.0] {
            assert_eq!(smooth_step(t), 0.0);
        }
    }

    #[test]
    fn smooth_step_is_positive_for_positive_inputs() {
        for &t in &[0.01, 0.5, 1.0, 100.0] {
            assert!(smooth_step(t) > 0.0, "smooth_step({t}) should be positive");
        }
    }

    #[test]
    fn bump_hits_endpoints() {
        assert_eq!(bump(0.0), 0.0);
        assert_eq!(bump(-3.0), 0.0);
        assert!((bump(1.0) - 1.0).abs() < 1e-15);
        assert!((bump(5.0) - 1.0).abs() < 1e-15);
        assert!((bump(0.5) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn bump_is_monotone_on_unit_interval() {
        let samples = 1000;
        let mut prev = bump(0.0);
        for i in 1..=samples {
            let t = i as f64 / samples as f64;
            let value = bump(t);
            // Allow a one-ulp wiggle from rounding in the quotient.
            assert!(
                value >= prev - 1e-15,
                "bump not monotone at t = {t}: {value} < {prev}"
            );
            prev = value;
        }
    }

    #[test]
    fn bump_never_produces_nan_near_boundaries() {
        // Dense scan through the underflow regions on both sides.
        for i in 0..10_000 {
            let t = -0.01 + 0.000102 * i as f64;
            let value = bump(t);
            assert!(value.is_finite(), "bump({t}) produced {value}");
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
