//! Rank Gaussian normalization for numeric features.
//!
//! Rank Gaussian normalization maps a feature's empirical distribution onto a
//! standard-normal-like shape while preserving the order of values. It is a
//! preprocessing step for skewed or heavy-tailed features before training.
//!
//! This crate provides:
//!
//! - **Inverse normal CDF**: rational approximation of the normal quantile function
//! - **Fitting**: building the rank-to-quantile table from a training sample
//! - **Transforming**: mapping any value through a fitted table with clamping
//!   and linear interpolation
//! - **Normalizer**: a stateful wrapper holding the fitted table and output precision
//! - **Descriptive statistics**: summaries of normalized output
//!
//! # Modules
//!
//! - [`inverse_cdf`]: Inverse standard normal CDF
//! - [`fit`]: Table construction from a training sample
//! - [`trafo_map`]: The fitted lookup table and its serialization
//! - [`interpolate`]: Applying a table to new values
//! - [`normalizer`]: Stateful fit/transform wrapper
//! - [`descriptive`]: Descriptive statistics for summarizing samples
//!
//! # Examples
//!
//! ## Fitting and transforming
//!
//! ```
//! use rgn_stats::{interpolate::apply_rank_gauss_trafo, trafo_map::TrafoMap};
//!
//! let train = [1.0, 5.0, 2.0, 2.0, 40.0, 7.0];
//! let map = TrafoMap::fit(&train).unwrap();
//!
//! let out = apply_rank_gauss_trafo(&[2.0, 3.5, 1000.0], &map).unwrap();
//! assert_eq!(out[0], map.get(2.0).unwrap());
//! assert!(out[0] < out[1] && out[1] < out[2]);
//! assert_eq!(out[2], map.last().unwrap().1);
//! ```
//!
//! ## Using the stateful normalizer
//!
//! ```
//! use rgn_stats::normalizer::RankGaussNormalizer;
//!
//! let mut rgn = RankGaussNormalizer::new();
//! let out = rgn.fit_transform(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]).unwrap();
//! assert_eq!(out.len(), 8);
//! ```

pub mod descriptive;
pub mod fit;
pub mod interpolate;
pub mod inverse_cdf;
pub mod normalizer;
pub mod trafo_map;
