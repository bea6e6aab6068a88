//! Inverse of the standard normal CDF
//!
//! This module provides a rational polynomial approximation of the standard
//! normal quantile function `Φ⁻¹(p)`, plus the shrunk variant used when ranks
//! are converted into Gaussian quantiles by [`fit`](crate::fit).
//!
//! The approximation is the classic three-term rational form (Abramowitz &
//! Stegun 26.2.23) evaluated on `t = sqrt(-2 ln p)`. Its absolute error is
//! below `4.5e-4` over the whole open interval `(0, 1)`.
//!
//! # Examples
//!
//! ```
//! use rgn_stats::inverse_cdf::normal_cdf_inverse;
//!
//! let z = normal_cdf_inverse(0.975).unwrap();
//! assert!((z - 1.959_964).abs() < 4.5e-4);
//!
//! assert!(normal_cdf_inverse(0.0).is_err());
//! assert!(normal_cdf_inverse(1.0).is_err());
//! ```

/// Numerator coefficients `c0, c1, c2` of the rational approximation.
const NUMERATOR: [f64; 3] = [2.515_517, 0.802_853, 0.010_328];

/// Denominator coefficients `d0, d1, d2` of the rational approximation.
const DENOMINATOR: [f64; 3] = [1.432_788, 0.189_269, 0.001_308];

/// Empirical dampening applied to every quantile produced for the rank table.
pub const QUANTILE_SHRINKAGE: f64 = 0.7;

/// Error returned when the inverse CDF is evaluated outside its domain.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InverseCdfError {
    /// The probability is not strictly inside `(0, 1)` (or is NaN).
    #[display("probability must lie strictly inside (0, 1), got {p}")]
    OutOfDomain { p: f64 },
}

/// Evaluates the rational step `t - (c2·t² + c1·t + c0) / (d2·t³ + d1·t² + d0·t + 1)`.
///
/// # Examples
///
/// ```
/// use rgn_stats::inverse_cdf::rational_approximation;
///
/// // At t = 0 only the constant terms remain: -c0 / 1
/// assert_eq!(rational_approximation(0.0), -2.515_517);
/// ```
#[must_use]
pub fn rational_approximation(t: f64) -> f64 {
    let [c0, c1, c2] = NUMERATOR;
    let [d0, d1, d2] = DENOMINATOR;
    t - ((c2 * t + c1) * t + c0) / (((d2 * t + d1) * t + d0) * t + 1.0)
}

/// Approximates the standard normal quantile `z` with `Φ(z) ≈ p`.
///
/// # Errors
///
/// Returns [`InverseCdfError::OutOfDomain`] when `p <= 0`, `p >= 1` or `p` is NaN.
///
/// # Examples
///
/// ```
/// use rgn_stats::inverse_cdf::normal_cdf_inverse;
///
/// // Odd symmetry around the median
/// let lo = normal_cdf_inverse(0.1).unwrap();
/// let hi = normal_cdf_inverse(0.9).unwrap();
/// assert!((lo + hi).abs() < 1e-12);
/// ```
pub fn normal_cdf_inverse(p: f64) -> Result<f64, InverseCdfError> {
    // Written so that NaN also fails the check
    if !(p > 0.0 && p < 1.0) {
        return Err(InverseCdfError::OutOfDomain { p });
    }
    if p < 0.5 {
        Ok(-rational_approximation((-2.0 * p.ln()).sqrt()))
    } else {
        Ok(rational_approximation((-2.0 * (1.0 - p).ln()).sqrt()))
    }
}

/// Gaussian quantile of a rescaled rank, dampened by [`QUANTILE_SHRINKAGE`].
///
/// `x == 0` maps to exactly `0`. Negative inputs are mirrored, so the function
/// is odd on `(-1, 1)`.
///
/// # Errors
///
/// Returns [`InverseCdfError::OutOfDomain`] when `|x| >= 1` or `x` is NaN.
///
/// # Examples
///
/// ```
/// use rgn_stats::inverse_cdf::{normal_cdf_inverse, shrunk_normal_quantile};
///
/// assert_eq!(shrunk_normal_quantile(0.0).unwrap(), 0.0);
///
/// let raw = normal_cdf_inverse(0.25).unwrap();
/// assert_eq!(shrunk_normal_quantile(0.25).unwrap(), raw * 0.7);
/// assert_eq!(shrunk_normal_quantile(-0.25).unwrap(), -raw * 0.7);
/// ```
pub fn shrunk_normal_quantile(x: f64) -> Result<f64, InverseCdfError> {
    if x == 0.0 {
        Ok(0.0)
    } else if x < 0.0 {
        Ok(-normal_cdf_inverse(-x)? * QUANTILE_SHRINKAGE)
    } else {
        Ok(normal_cdf_inverse(x)? * QUANTILE_SHRINKAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_is_zero() {
        let z = normal_cdf_inverse(0.5).unwrap();
        assert!(z.abs() < 4.5e-4, "expected ~0, got {z}");
    }

    #[test]
    fn test_known_quantiles() {
        // Reference values of the exact standard normal quantile function
        let cases = [
            (0.001, -3.090_232),
            (0.025, -1.959_964),
            (0.1, -1.281_552),
            (0.3, -0.524_401),
            (0.7, 0.524_401),
            (0.9, 1.281_552),
            (0.975, 1.959_964),
            (0.999, 3.090_232),
        ];
        for (p, expected) in cases {
            let z = normal_cdf_inverse(p).unwrap();
            assert!(
                (z - expected).abs() < 4.5e-4,
                "p = {p}: expected {expected}, got {z}"
            );
        }
    }

    #[test]
    fn test_odd_symmetry() {
        for p in [0.001, 0.01, 0.2, 0.35, 0.49] {
            let lo = normal_cdf_inverse(p).unwrap();
            let hi = normal_cdf_inverse(1.0 - p).unwrap();
            assert!((lo + hi).abs() < 1e-9, "p = {p}: {lo} vs {hi}");
        }
    }

    #[test]
    fn test_monotonic() {
        let mut prev = f64::NEG_INFINITY;
        for i in 1..1000 {
            let p = f64::from(i) / 1000.0;
            let z = normal_cdf_inverse(p).unwrap();
            assert!(z > prev, "not increasing at p = {p}");
            prev = z;
        }
    }

    #[test]
    fn test_domain_errors() {
        for p in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    normal_cdf_inverse(p),
                    Err(InverseCdfError::OutOfDomain { .. })
                ),
                "p = {p} should be rejected"
            );
        }
    }

    #[test]
    fn test_domain_error_message() {
        let err = normal_cdf_inverse(1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "probability must lie strictly inside (0, 1), got 1"
        );
    }

    #[test]
    fn test_shrunk_quantile() {
        assert_eq!(shrunk_normal_quantile(0.0).unwrap(), 0.0);
        let z = normal_cdf_inverse(0.001).unwrap();
        assert_eq!(shrunk_normal_quantile(0.001).unwrap(), z * QUANTILE_SHRINKAGE);
        assert_eq!(
            shrunk_normal_quantile(-0.001).unwrap(),
            -z * QUANTILE_SHRINKAGE
        );
        assert!(shrunk_normal_quantile(1.0).is_err());
        assert!(shrunk_normal_quantile(-1.0).is_err());
    }
}
