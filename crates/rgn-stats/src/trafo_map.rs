//! Fitted rank-to-quantile lookup table
//!
//! A [`TrafoMap`] is the result of [`fit`](crate::fit): an ordered mapping from
//! every distinct training value to its normalized Gaussian quantile. It is
//! immutable once built and can be shared freely between threads.
//!
//! # Serialization
//!
//! The map serializes verbatim as an ordered array of `[key, value]` pairs, so
//! a persisted map reproduces the same interpolation behavior when loaded
//! again. Loading validates the key ordering.
//!
//! ```
//! use rgn_stats::trafo_map::TrafoMap;
//!
//! let map = TrafoMap::try_from(vec![(0.0, 0.0), (10.0, 1.0)]).unwrap();
//! let json = serde_json::to_string(&map).unwrap();
//! assert_eq!(json, "[[0.0,0.0],[10.0,1.0]]");
//!
//! // Keys must be strictly increasing
//! assert!(serde_json::from_str::<TrafoMap>("[[1.0,0.0],[1.0,1.0]]").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    fit::{self, FitError},
    interpolate,
};

/// Error raised when a [`TrafoMap`] is assembled from invalid entries.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TrafoMapError {
    #[display("entry {index} is not finite: ({key}, {value})")]
    NonFiniteEntry { index: usize, key: f64, value: f64 },
    #[display("key {key} at entry {index} does not exceed the previous key {previous}")]
    KeysNotStrictlyIncreasing {
        index: usize,
        previous: f64,
        key: f64,
    },
}

/// Ordered mapping from distinct raw values to normalized values.
///
/// # Invariants
///
/// * `keys` and `values` have the same length
/// * `keys` are finite and strictly increasing
///
/// An empty map is valid and means "fitted on no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct TrafoMap {
    keys: Vec<f64>,
    values: Vec<f64>,
}

impl TrafoMap {
    /// Builds the map for a training sample.
    ///
    /// Shorthand for [`fit::build_rank_gauss_trafo`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rgn_stats::trafo_map::TrafoMap;
    ///
    /// let map = TrafoMap::fit(&[3.0, 1.0, 2.0, 2.0]).unwrap();
    /// assert_eq!(map.keys(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn fit(values: &[f64]) -> Result<Self, FitError> {
        fit::build_rank_gauss_trafo(values)
    }

    /// Builds a map from parts already known to satisfy the invariants.
    pub(crate) fn from_sorted_parts(keys: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        debug_assert!(keys.is_sorted_by(|a, b| a < b), "keys must be strictly increasing");
        Self { keys, values }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> &[f64] {
        &self.keys
    }

    /// Returns the normalized values, ordered like [`keys`](Self::keys).
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Looks up the value stored for exactly `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgn_stats::trafo_map::TrafoMap;
    ///
    /// let map = TrafoMap::try_from(vec![(0.0, 0.0), (10.0, 1.0)]).unwrap();
    /// assert_eq!(map.get(10.0), Some(1.0));
    /// assert_eq!(map.get(5.0), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: f64) -> Option<f64> {
        let index = self.keys.partition_point(|k| *k < key);
        #[expect(clippy::float_cmp, reason = "exact key lookup")]
        let found = self.keys.get(index).is_some_and(|k| *k == key);
        found.then(|| self.values[index])
    }

    /// Returns the entry with the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<(f64, f64)> {
        Some((*self.keys.first()?, *self.values.first()?))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.keys.last()?, *self.values.last()?))
    }

    /// Iterates over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }

    /// Maps a single raw value, or returns `None` if the map is empty.
    ///
    /// See [`interpolate`] for clamping and interpolation rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgn_stats::trafo_map::TrafoMap;
    ///
    /// let map = TrafoMap::try_from(vec![(0.0, 0.0), (10.0, 1.0)]).unwrap();
    /// assert_eq!(map.transform_value(5.0), Some(0.5));
    /// assert_eq!(map.transform_value(-3.0), Some(0.0));
    /// assert_eq!(TrafoMap::default().transform_value(1.0), None);
    /// ```
    #[must_use]
    pub fn transform_value(&self, value: f64) -> Option<f64> {
        (!self.is_empty()).then(|| interpolate::interpolate_value(&self.keys, &self.values, value))
    }
}

impl TryFrom<Vec<(f64, f64)>> for TrafoMap {
    type Error = TrafoMapError;

    fn try_from(entries: Vec<(f64, f64)>) -> Result<Self, Self::Error> {
        let mut keys = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (index, (key, value)) in entries.into_iter().enumerate() {
            if !key.is_finite() || !value.is_finite() {
                return Err(TrafoMapError::NonFiniteEntry { index, key, value });
            }
            if let Some(&previous) = keys.last()
                && key <= previous
            {
                return Err(TrafoMapError::KeysNotStrictlyIncreasing {
                    index,
                    previous,
                    key,
                });
            }
            keys.push(key);
            values.push(value);
        }
        Ok(Self { keys, values })
    }
}

impl From<TrafoMap> for Vec<(f64, f64)> {
    fn from(map: TrafoMap) -> Self {
        map.keys.into_iter().zip(map.values).collect()
    }
}
