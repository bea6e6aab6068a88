//! Building the rank-to-quantile table from a training sample
//!
//! The table maps every distinct training value to the Gaussian quantile of its
//! empirical rank. Ranks are taken from the number of samples strictly below
//! each value, so repeated values share a single quantile.
//!
//! # Algorithm
//!
//! 1. Count the occurrences of each distinct value
//! 2. Walk the distinct values in ascending order, keeping the count `cnt` of
//!    samples strictly below the current value
//! 3. Rescale the rank `cnt / N` into `[0.001, 0.999)` and convert it with
//!    [`shrunk_normal_quantile`]
//! 4. Subtract the count-weighted mean of all quantiles so that the fitted
//!    sample has zero mean
//!
//! Samples with one or two distinct values are handled separately and are not
//! centered: a single value maps to `0.0`, two values map to `0.0` and `1.0`.
//!
//! # Examples
//!
//! ```
//! use rgn_stats::fit::build_rank_gauss_trafo;
//!
//! let map = build_rank_gauss_trafo(&[4.0, 1.0, 1.0, 2.0, 8.0]).unwrap();
//! assert_eq!(map.keys(), &[1.0, 2.0, 4.0, 8.0]);
//!
//! // Rank order is preserved
//! assert!(map.values().is_sorted());
//!
//! // Two distinct values bypass the rank machinery
//! let map = build_rank_gauss_trafo(&[7.0, 3.0, 7.0]).unwrap();
//! assert_eq!(map.values(), &[0.0, 1.0]);
//! ```

use crate::{
    inverse_cdf::{self, InverseCdfError},
    trafo_map::TrafoMap,
};

/// Multiplier mapping a rank in `[0, 1)` into the open unit interval.
const RANK_SCALE: f64 = 0.998;
/// Offset keeping the lowest rank away from the inverse CDF's domain boundary.
const RANK_OFFSET: f64 = 0.001;
/// Quantiles outside `[-QUANTILE_BOUND, QUANTILE_BOUND]` indicate a broken approximation.
const QUANTILE_BOUND: f64 = 3.0;

/// Error raised while building a [`TrafoMap`].
///
/// Apart from [`FitError::NonFiniteValue`], every variant signals a broken
/// internal invariant rather than bad input.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum FitError {
    #[display("training value at index {index} is not finite: {value}")]
    NonFiniteValue { index: usize, value: f64 },
    #[display("grouped sample count {counted} does not match the sample size {expected}")]
    SampleCountMismatch { counted: usize, expected: usize },
    #[display("quantile {quantile} for value {key} is outside [-3, 3]")]
    QuantileOutOfBounds { key: f64, quantile: f64 },
    #[display("rescaled rank left the inverse CDF domain: {source}")]
    InverseCdf { source: InverseCdfError },
}

/// Builds the rank-Gauss transformation table for a training sample.
///
/// The result does not depend on the order of `values`: any permutation of the
/// same sample yields a bitwise-identical table. An empty sample yields an
/// empty table.
///
/// # Errors
///
/// Returns [`FitError::NonFiniteValue`] if the sample contains NaN or an
/// infinity. The remaining variants are internal invariant violations and
/// abort the fit.
pub fn build_rank_gauss_trafo(values: &[f64]) -> Result<TrafoMap, FitError> {
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(FitError::NonFiniteValue { index, value });
    }

    let histogram = count_distinct(values);
    match histogram.as_slice() {
        [] => {
            tracing::trace!("empty sample, returning empty table");
            Ok(TrafoMap::default())
        }
        [(key, _)] => {
            tracing::trace!(key, "single distinct value");
            Ok(TrafoMap::from_sorted_parts(vec![*key], vec![0.0]))
        }
        [(low, _), (high, _)] => {
            tracing::trace!(low, high, "two distinct values");
            Ok(TrafoMap::from_sorted_parts(
                vec![*low, *high],
                vec![0.0, 1.0],
            ))
        }
        _ => build_centered_quantiles(&histogram, values.len()),
    }
}

/// Counts occurrences of each distinct value, in ascending value order.
///
/// `-0.0` and `0.0` are merged; the sort places `-0.0` first, so it becomes
/// the key.
#[expect(clippy::float_cmp, reason = "grouping identical values")]
fn count_distinct(values: &[f64]) -> Vec<(f64, usize)> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut histogram: Vec<(f64, usize)> = vec![];
    for value in sorted {
        match histogram.last_mut() {
            Some((key, count)) if *key == value => *count += 1,
            _ => histogram.push((value, 1)),
        }
    }
    histogram
}

#[expect(clippy::cast_precision_loss)]
fn build_centered_quantiles(
    histogram: &[(f64, usize)],
    sample_size: usize,
) -> Result<TrafoMap, FitError> {
    let counted = histogram.iter().map(|(_, count)| count).sum::<usize>();
    if counted != sample_size {
        return Err(FitError::SampleCountMismatch {
            counted,
            expected: sample_size,
        });
    }

    let n = sample_size as f64;
    let mut keys = Vec::with_capacity(histogram.len());
    let mut quantiles = Vec::with_capacity(histogram.len());
    let mut below = 0_usize;
    let mut weighted_sum = 0.0;

    for &(key, count) in histogram {
        let rank = below as f64 / n;
        let rank = rank * RANK_SCALE + RANK_OFFSET;
        let quantile = inverse_cdf::shrunk_normal_quantile(rank)
            .map_err(|source| FitError::InverseCdf { source })?;
        if !(-QUANTILE_BOUND..=QUANTILE_BOUND).contains(&quantile) {
            return Err(FitError::QuantileOutOfBounds { key, quantile });
        }
        weighted_sum += count as f64 * quantile;
        keys.push(key);
        quantiles.push(quantile);
        below += count;
    }

    let mean = weighted_sum / n;
    for quantile in &mut quantiles {
        *quantile -= mean;
    }

    tracing::debug!(
        sample_size,
        distinct = keys.len(),
        mean,
        "built rank gauss table"
    );
    Ok(TrafoMap::from_sorted_parts(keys, quantiles))
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng as _, seq::SliceRandom as _};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn assert_map_close(map: &TrafoMap, expected: &[(f64, f64)]) {
        assert_eq!(map.len(), expected.len(), "map = {map:?}");
        for ((key, value), (expected_key, expected_value)) in map.iter().zip(expected) {
            assert_eq!(key, *expected_key);
            assert!(
                (value - expected_value).abs() < TOLERANCE,
                "key {key}: expected {expected_value}, got {value}"
            );
        }
    }

    #[test]
    fn test_empty_sample() {
        let map = build_rank_gauss_trafo(&[]).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_single_distinct_value() {
        let map = build_rank_gauss_trafo(&[4.2, 4.2, 4.2]).unwrap();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(4.2, 0.0)]);
    }

    #[test]
    fn test_two_distinct_values_are_not_centered() {
        let map = build_rank_gauss_trafo(&[9.0, -1.0, 9.0, 9.0]).unwrap();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(-1.0, 0.0), (9.0, 1.0)]);
    }

    #[test]
    fn test_reference_tables() {
        assert_map_close(
            &build_rank_gauss_trafo(&[1.0, 2.0, 3.0]).unwrap(),
            &[
                (1.0, -1.442_243_705_364_08),
                (2.0, 0.420_559_388_035_408_4),
                (3.0, 1.021_684_317_328_671_2),
            ],
        );
        assert_map_close(
            &build_rank_gauss_trafo(&[1.0, 1.0, 2.0, 3.0]).unwrap(),
            &[
                (1.0, -1.199_390_447_727_342),
                (2.0, 0.963_975_039_614_104_8),
                (3.0, 1.434_805_855_840_58),
            ],
        );
        assert_map_close(
            &build_rank_gauss_trafo(&[5.0, 1.0, 3.0, 3.0, 3.0, 9.0]).unwrap(),
            &[
                (1.0, -1.627_802_621_623_661_4),
                (3.0, -0.139_724_326_145_171_83),
                (5.0, 0.836_125_401_069_089_6),
                (9.0, 1.210_850_198_990_088_2),
            ],
        );
    }

    #[test]
    fn test_weighted_mean_is_zero() {
        let values = [0.5, 0.5, 0.5, 1.0, 2.0, 2.0, 3.5, 10.0, 10.0, 11.0, 400.0];
        let map = build_rank_gauss_trafo(&values).unwrap();
        let histogram = count_distinct(&values);
        #[expect(clippy::cast_precision_loss)]
        let weighted_mean = histogram
            .iter()
            .zip(map.values())
            .map(|((_, count), value)| *count as f64 * value)
            .sum::<f64>()
            / values.len() as f64;
        assert!(weighted_mean.abs() < TOLERANCE, "mean = {weighted_mean}");
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let values = (0..500)
            .map(|i| f64::from(i % 37) * 1.5 - f64::from(i % 11))
            .collect::<Vec<_>>();
        let map = build_rank_gauss_trafo(&values).unwrap();
        assert!(map.keys().is_sorted_by(|a, b| a < b));
        assert!(map.values().is_sorted_by(|a, b| a <= b));
        for value in map.values() {
            // Shrunk quantiles lie in about [-2.16, 2.16]; centering shifts them slightly
            assert!(value.abs() < 2.5, "value {value} out of range");
        }
    }

    #[test]
    fn test_permutation_invariant() {
        let mut values = (0..200)
            .map(|i| (f64::from(i) * 0.37).sin() * 100.0)
            .chain([1.0, 1.0, 1.0, -3.0, -3.0])
            .collect::<Vec<_>>();
        let reference = build_rank_gauss_trafo(&values).unwrap();

        let mut rng = Pcg64Mcg::seed_from_u64(42);
        for _ in 0..10 {
            values.shuffle(&mut rng);
            let map = build_rank_gauss_trafo(&values).unwrap();
            assert_eq!(map.keys(), reference.keys());
            for (a, b) in map.values().iter().zip(reference.values()) {
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }

    #[test]
    fn test_signed_zeros_share_a_key() {
        let map = build_rank_gauss_trafo(&[0.0, 1.0, -0.0, 2.0]).unwrap();
        assert_eq!(map.len(), 3);
        assert!(map.keys()[0].is_sign_negative());

        let swapped = build_rank_gauss_trafo(&[-0.0, 1.0, 0.0, 2.0]).unwrap();
        assert_eq!(map, swapped);
        assert!(swapped.keys()[0].is_sign_negative());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        assert_eq!(
            build_rank_gauss_trafo(&[1.0, 2.0, f64::INFINITY]),
            Err(FitError::NonFiniteValue {
                index: 2,
                value: f64::INFINITY,
            })
        );
        assert!(matches!(
            build_rank_gauss_trafo(&[f64::NAN, 2.0, 3.0]),
            Err(FitError::NonFiniteValue { index: 0, .. })
        ));
    }

    #[test]
    fn test_count_mismatch_is_reported() {
        let histogram = [(1.0, 2), (2.0, 1), (3.0, 1)];
        assert_eq!(
            build_centered_quantiles(&histogram, 5),
            Err(FitError::SampleCountMismatch {
                counted: 4,
                expected: 5,
            })
        );
    }

    #[test]
    fn test_count_distinct() {
        assert_eq!(
            count_distinct(&[3.0, 1.0, 3.0, 2.0, 1.0, 3.0]),
            vec![(1.0, 2), (2.0, 1), (3.0, 3)]
        );
        assert!(count_distinct(&[]).is_empty());
    }
}
