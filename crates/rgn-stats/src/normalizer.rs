//! Stateful rank Gaussian normalizer
//!
//! [`RankGaussNormalizer`] holds the table from its most recent fit together
//! with the precision used for its output. It delegates all numerical work to
//! [`fit`](crate::fit) and [`interpolate`](crate::interpolate).
//!
//! # Examples
//!
//! ```
//! use rgn_stats::normalizer::{OutputPrecision, RankGaussNormalizer};
//!
//! let mut rgn = RankGaussNormalizer::with_precision(OutputPrecision::F64);
//! let train = [3.0, -1.0, 8.0, 2.0, 2.0, 15.0];
//! let fitted = rgn.fit_transform(&train).unwrap();
//! assert_eq!(fitted.len(), train.len());
//!
//! // Unseen values are interpolated within the training range
//! let out = rgn.transform(&[0.0, 100.0]).unwrap().to_f64_vec();
//! assert!(out[0] < out[1]);
//! ```

use serde::Serialize;

use crate::{
    fit::FitError,
    interpolate::{self, TransformError},
    trafo_map::TrafoMap,
};

/// Floating-point precision of transformed output.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::FromStr)]
pub enum OutputPrecision {
    /// Downcast to `f32`
    #[default]
    F32,
    /// Keep full `f64` precision
    F64,
}

/// Transformed output in the requested [`OutputPrecision`].
///
/// Serializes as a plain array of numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedValues {
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl NormalizedValues {
    /// Converts full-precision output into `precision`.
    #[must_use]
    pub fn from_f64(values: Vec<f64>, precision: OutputPrecision) -> Self {
        match precision {
            #[expect(clippy::cast_possible_truncation)]
            OutputPrecision::F32 => Self::F32(values.into_iter().map(|v| v as f32).collect()),
            OutputPrecision::F64 => Self::F64(values),
        }
    }

    /// Returns the precision of the stored values.
    #[must_use]
    pub fn precision(&self) -> OutputPrecision {
        match self {
            Self::F32(_) => OutputPrecision::F32,
            Self::F64(_) => OutputPrecision::F64,
        }
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::F32(values) => values.len(),
            Self::F64(values) => values.len(),
        }
    }

    /// Returns `true` if there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widens the values to `f64`.
    ///
    /// Widening is exact, so `F32` output keeps its rounded values.
    #[must_use]
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Self::F32(values) => values.iter().copied().map(f64::from).collect(),
            Self::F64(values) => values.clone(),
        }
    }
}

/// Error raised by [`RankGaussNormalizer::fit_transform`].
#[derive(
    Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum RankGaussError {
    #[display("fit failed: {_0}")]
    Fit(FitError),
    #[display("transform failed: {_0}")]
    Transform(TransformError),
}

/// Rank Gaussian normalizer for a single feature.
///
/// A successful [`fit`](Self::fit) replaces the held table. A failed fit
/// leaves the previous table in place.
#[derive(Debug, Clone, Default)]
pub struct RankGaussNormalizer {
    trafo_map: Option<TrafoMap>,
    precision: OutputPrecision,
}

impl RankGaussNormalizer {
    /// Creates an unfitted normalizer producing `f32` output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unfitted normalizer producing output in `precision`.
    #[must_use]
    pub fn with_precision(precision: OutputPrecision) -> Self {
        Self {
            trafo_map: None,
            precision,
        }
    }

    /// Creates a normalizer around a previously fitted table.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgn_stats::{
    ///     normalizer::{OutputPrecision, RankGaussNormalizer},
    ///     trafo_map::TrafoMap,
    /// };
    ///
    /// let map: TrafoMap = serde_json::from_str("[[0.0, 0.0], [10.0, 1.0]]").unwrap();
    /// let rgn = RankGaussNormalizer::from_trafo_map(map, OutputPrecision::F64);
    /// assert_eq!(rgn.transform(&[5.0]).unwrap().to_f64_vec(), vec![0.5]);
    /// ```
    #[must_use]
    pub fn from_trafo_map(trafo_map: TrafoMap, precision: OutputPrecision) -> Self {
        Self {
            trafo_map: Some(trafo_map),
            precision,
        }
    }

    #[must_use]
    pub fn precision(&self) -> OutputPrecision {
        self.precision
    }

    pub fn set_precision(&mut self, precision: OutputPrecision) {
        self.precision = precision;
    }

    /// Returns the table from the last successful fit, if any.
    #[must_use]
    pub fn trafo_map(&self) -> Option<&TrafoMap> {
        self.trafo_map.as_ref()
    }

    /// Fits a new table on `values` and makes it the active one.
    pub fn fit(&mut self, values: &[f64]) -> Result<&TrafoMap, FitError> {
        let trafo_map = TrafoMap::fit(values)?;
        Ok(self.trafo_map.insert(trafo_map))
    }

    /// Transforms `values` with the active table.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NoTransformationMap`] if the normalizer was
    /// never fitted or was fitted on an empty sample.
    pub fn transform(&self, values: &[f64]) -> Result<NormalizedValues, TransformError> {
        let trafo_map = self
            .trafo_map
            .as_ref()
            .ok_or(TransformError::NoTransformationMap)?;
        let out = interpolate::apply_rank_gauss_trafo(values, trafo_map)?;
        Ok(NormalizedValues::from_f64(out, self.precision))
    }

    /// Fits on `values`, then transforms the same values.
    pub fn fit_transform(&mut self, values: &[f64]) -> Result<NormalizedValues, RankGaussError> {
        self.fit(values)?;
        Ok(self.transform(values)?)
    }
}
