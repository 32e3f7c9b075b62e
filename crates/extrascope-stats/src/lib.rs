//! Statistical utilities for the extrascope survey dashboard.
//!
//! This crate provides the numeric building blocks behind the dashboard:
//!
//! - **Descriptive statistics**: mean, median, sample variance, standard deviation
//! - **Percentiles**: linear-interpolation percentiles and five-number summaries
//! - **Frequency tables**: value counts, cross tabulations and grouped means
//! - **Welch's t-test**: two-sample comparison of means without equal variances
//! - **Proportion comparison**: share of positive answers in two groups
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and box-plot summaries
//! - [`frequency`]: Counting categorical observations
//! - [`welch`]: Welch's unequal-variance t-test and the significance policy
//! - [`proportion`]: Comparison of binary-coded answers between two groups
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use extrascope_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.sample_variance, Some(2.5));
//! ```
//!
//! ## Comparing two group means
//!
//! ```
//! use extrascope_stats::welch::{self, Significance, SignificancePolicy};
//!
//! let first = [10.0, 12.0, 14.0, 16.0, 18.0];
//! let second = [20.0, 22.0, 24.0, 26.0, 28.0];
//! let result = welch::compare_means(&first, &second).unwrap();
//! assert!(result.statistic < 0.0);
//! assert_eq!(
//!     SignificancePolicy::default().assess(result.p_value),
//!     Significance::Significant
//! );
//! ```
//!
//! ## Comparing two proportions
//!
//! ```
//! use extrascope_stats::proportion::{self, ProportionOrdering};
//!
//! let first = [Some(true), Some(true), Some(false), Some(false)];
//! let second = [Some(true), Some(false), Some(false), Some(false)];
//! let result = proportion::compare_proportions(first, second).unwrap();
//! assert_eq!(result.first.proportion, 0.5);
//! assert_eq!(result.second.proportion, 0.25);
//! assert_eq!(result.ordering, ProportionOrdering::FirstGreater);
//! ```

pub mod descriptive;
pub mod frequency;
pub mod percentiles;
pub mod proportion;
pub mod welch;

/// Identifies one side of a two-sample comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sample {
    #[display("first sample")]
    First,
    #[display("second sample")]
    Second,
}
