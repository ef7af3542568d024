//! Clamped linear interpolation for tabulated dispersion data.
//!
//! Dispersion tables are sparsely sampled; the provider resamples them onto
//! the measurement grid with piecewise-linear interpolation. Points outside
//! the table's range take the nearest edge value, matching the platform
//! convention the original data pipelines were built on.

/// Interpolate a single point from the knots `(xp, fp)`.
///
/// `xp` must be strictly increasing and non-empty; `fp` has the same
/// length. Out-of-range `x` clamps to the boundary values.
pub fn interp_one(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }

    // First knot strictly greater than x; the bracket is [hi - 1, hi].
    let hi = xp.partition_point(|&knot| knot <= x);
    let lo = hi - 1;
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] + t * (fp[hi] - fp[lo])
}

/// Interpolate every point of `x` from the knots `(xp, fp)`.
pub fn interp(x: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    x.iter().map(|&xi| interp_one(xi, xp, fp)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_hits_knots_and_midpoints() {
        let xp = [400.0, 500.0, 600.0];
        let fp = [1.48, 1.46, 1.45];

        assert_eq!(interp_one(500.0, &xp, &fp), 1.46);
        let mid = interp_one(450.0, &xp, &fp);
        assert!((mid - 1.47).abs() < 1e-12);
    }

    #[test]
    fn test_interp_clamps_at_edges() {
        let xp = [400.0, 500.0, 600.0];
        let fp = [1.48, 1.46, 1.45];

        let out = interp(&[300.0, 700.0], &xp, &fp);
        assert_eq!(out, vec![1.48, 1.45]);
    }

    #[test]
    fn test_interp_single_knot() {
        assert_eq!(interp_one(123.0, &[550.0], &[1.5]), 1.5);
    }
}
