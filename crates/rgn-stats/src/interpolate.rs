//! Applying a fitted table to new values
//!
//! Each value is mapped through the [`TrafoMap`] with these rules:
//!
//! - values at or below the smallest key take the smallest key's value
//! - values at or above the largest key take the largest key's value
//! - values equal to a key take that key's value unchanged
//! - anything else is linearly interpolated between the two keys bracketing it
//!
//! No extrapolation happens outside the fitted range. NaN inputs are neither
//! clamped nor rejected and come out as NaN.
//!
//! # Examples
//!
//! ```
//! use rgn_stats::{interpolate::apply_rank_gauss_trafo, trafo_map::TrafoMap};
//!
//! let map = TrafoMap::try_from(vec![(0.0, 0.0), (10.0, 1.0)]).unwrap();
//! let out = apply_rank_gauss_trafo(&[-5.0, 5.0, 10.0, 25.0], &map).unwrap();
//! assert_eq!(out, vec![0.0, 0.5, 1.0, 1.0]);
//! ```

use crate::trafo_map::TrafoMap;

/// Error raised when values cannot be transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TransformError {
    /// The table is empty, either never fitted or fitted on no data.
    #[display("no transformation map")]
    NoTransformationMap,
}

/// Maps every value through `map`, preserving order and length.
///
/// # Errors
///
/// Returns [`TransformError::NoTransformationMap`] if `map` is empty. No
/// partial output is produced.
pub fn apply_rank_gauss_trafo(values: &[f64], map: &TrafoMap) -> Result<Vec<f64>, TransformError> {
    if map.is_empty() {
        return Err(TransformError::NoTransformationMap);
    }
    let (keys, mapped) = (map.keys(), map.values());
    let out = values
        .iter()
        .map(|&value| interpolate_value(keys, mapped, value))
        .collect::<Vec<_>>();
    tracing::trace!(count = out.len(), keys = keys.len(), "applied rank gauss table");
    Ok(out)
}

/// Maps a single value. `keys` must be non-empty, strictly increasing and as
/// long as `mapped`.
#[expect(clippy::float_cmp, reason = "exact key hits bypass interpolation")]
pub(crate) fn interpolate_value(keys: &[f64], mapped: &[f64], value: f64) -> f64 {
    let last = keys.len() - 1;
    if value <= keys[0] {
        return mapped[0];
    }
    if value >= keys[last] {
        return mapped[last];
    }

    // At least two keys remain here: a single key is both minimum and maximum
    let (lower, upper) = bracketing_pair(keys, value);
    let (x1, y1) = (keys[lower], mapped[lower]);
    if x1 == value {
        return y1;
    }
    let (x2, y2) = (keys[upper], mapped[upper]);
    y1 + (value - x1) * (y2 - y1) / (x2 - x1)
}

/// Finds adjacent indices `(start, start + 1)` with `keys[start] <= value < keys[start + 1]`.
///
/// The search keeps `keys[start] <= value < keys[end]` while halving
/// `start..end`, so it runs in `O(log k)`. With two keys the loop body never
/// executes.
///
/// `keys` must hold at least two strictly increasing entries and `value` must
/// satisfy `keys[0] <= value < keys[keys.len() - 1]`; for other values the
/// result is a valid but meaningless adjacent pair.
///
/// # Examples
///
/// ```
/// use rgn_stats::interpolate::bracketing_pair;
///
/// let keys = [0.0, 1.0, 4.0, 9.0, 16.0];
/// assert_eq!(bracketing_pair(&keys, 5.0), (2, 3));
/// assert_eq!(bracketing_pair(&keys, 4.0), (2, 3));
/// assert_eq!(bracketing_pair(&[0.0, 1.0], 0.5), (0, 1));
/// ```
#[must_use]
pub fn bracketing_pair(keys: &[f64], value: f64) -> (usize, usize) {
    assert!(keys.len() >= 2, "bracketing requires at least two keys");
    let mut start = 0;
    let mut end = keys.len() - 1;
    while start + 1 < end {
        let mid = start + (end - start) / 2;
        if value < keys[mid] {
            end = mid;
        } else {
            start = mid;
        }
    }
    (start, end)
}
