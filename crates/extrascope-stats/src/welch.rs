//! Welch's unequal-variance t-test.
//!
//! The test statistic is
//!
//! ```text
//! t = (mean(a) - mean(b)) / sqrt(var(a)/|a| + var(b)/|b|)
//! ```
//!
//! with sample variances, and the degrees of freedom follow the
//! Welch-Satterthwaite approximation. The p-value is two-sided.
//!
//! Degenerate inputs never produce `NaN`: they are reported as
//! [`InsufficientDataError`].

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::{Sample, descriptive::DescriptiveStats};

/// Default significance threshold used by the dashboard.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Result of a two-sample mean comparison.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MeanComparison {
    /// Welch's t statistic; negative when the first mean is lower.
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom.
    pub degrees_of_freedom: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Summary of the first sample.
    pub first: DescriptiveStats,
    /// Summary of the second sample.
    pub second: DescriptiveStats,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InsufficientDataError {
    #[display("{sample} has {count} observation(s), at least 2 are required")]
    TooFewObservations { sample: Sample, count: usize },
    #[display("{sample} has zero variance")]
    ZeroVariance { sample: Sample },
    #[display("{sample} contains a non-finite value")]
    NonFiniteValue { sample: Sample },
    #[display("t-distribution undefined for {degrees_of_freedom} degrees of freedom")]
    DegenerateDistribution { degrees_of_freedom: f64 },
}

/// Compares the means of two samples with Welch's t-test.
///
/// # Errors
///
/// Returns [`InsufficientDataError`] when either sample has fewer than two
/// observations, has zero variance, or contains `NaN`/infinite values.
///
/// # Examples
///
/// ```
/// use extrascope_stats::welch::{InsufficientDataError, compare_means};
///
/// let result = compare_means(&[10.0, 12.0, 14.0, 16.0, 18.0], &[20.0, 22.0, 24.0, 26.0, 28.0])
///     .unwrap();
/// assert!((result.statistic + 5.0).abs() < 1e-12);
/// assert!((result.degrees_of_freedom - 8.0).abs() < 1e-12);
/// assert!(result.p_value < 0.05);
///
/// assert!(matches!(
///     compare_means(&[5.0, 5.0], &[5.0, 5.0]),
///     Err(InsufficientDataError::ZeroVariance { .. })
/// ));
/// ```
pub fn compare_means(first: &[f64], second: &[f64]) -> Result<MeanComparison, InsufficientDataError> {
    let (first_stats, first_se2) = summarize(Sample::First, first)?;
    let (second_stats, second_se2) = summarize(Sample::Second, second)?;

    let pooled_se2 = first_se2 + second_se2;
    let statistic = (first_stats.mean - second_stats.mean) / pooled_se2.sqrt();
    let degrees_of_freedom = pooled_se2.powi(2)
        / (first_se2.powi(2) / freedom(&first_stats) + second_se2.powi(2) / freedom(&second_stats));

    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom)
        .map_err(|_| InsufficientDataError::DegenerateDistribution { degrees_of_freedom })?;
    let p_value = (2.0 * dist.sf(statistic.abs())).min(1.0);

    Ok(MeanComparison {
        statistic,
        degrees_of_freedom,
        p_value,
        first: first_stats,
        second: second_stats,
    })
}

/// Checks one sample and returns its summary with its squared standard error.
///
/// A constant sample is rejected even when rounding leaves a tiny positive
/// variance.
fn summarize(
    sample: Sample,
    values: &[f64],
) -> Result<(DescriptiveStats, f64), InsufficientDataError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(InsufficientDataError::NonFiniteValue { sample });
    }
    let too_few = InsufficientDataError::TooFewObservations {
        sample,
        count: values.len(),
    };
    let stats = DescriptiveStats::new(values.iter().copied()).ok_or(too_few.clone())?;
    let se2 = stats.squared_standard_error().ok_or(too_few)?;
    if stats.max <= stats.min || se2 <= 0.0 {
        return Err(InsufficientDataError::ZeroVariance { sample });
    }
    Ok((stats, se2))
}

#[expect(clippy::cast_precision_loss)]
fn freedom(stats: &DescriptiveStats) -> f64 {
    (stats.count - 1) as f64
}

/// Outcome of comparing a p-value against the significance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    /// `p < alpha`: the difference is statistically significant.
    Significant,
    /// `p >= alpha`: not enough evidence to conclude a difference.
    Inconclusive,
}

/// Fixed-threshold decision policy for p-values.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SignificancePolicy {
    pub alpha: f64,
}

impl Default for SignificancePolicy {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl SignificancePolicy {
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    #[must_use]
    pub fn assess(&self, p_value: f64) -> Significance {
        if p_value < self.alpha {
            Significance::Significant
        } else {
            Significance::Inconclusive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separated_groups_are_significant() {
        let result =
            compare_means(&[10.0, 12.0, 14.0, 16.0, 18.0], &[20.0, 22.0, 24.0, 26.0, 28.0])
                .unwrap();
        assert!((result.statistic + 5.0).abs() < 1e-12);
        assert!((result.degrees_of_freedom - 8.0).abs() < 1e-12);
        // scipy.stats.ttest_ind(..., equal_var=False) gives p = 0.001052...
        assert!((result.p_value - 0.001_052).abs() < 1e-5);
        assert_eq!(
            SignificancePolicy::default().assess(result.p_value),
            Significance::Significant
        );
    }

    #[test]
    fn test_statistic_sign_follows_argument_order() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0, 10.0];
        let forward = compare_means(&a, &b).unwrap();
        let backward = compare_means(&b, &a).unwrap();
        assert!(forward.statistic < 0.0);
        assert!((forward.statistic + backward.statistic).abs() < 1e-12);
        assert!((forward.p_value - backward.p_value).abs() < 1e-12);
    }

    #[test]
    fn test_unequal_sizes_degrees_of_freedom() {
        // var(a) = 1, n = 3; var(b) = 4, n = 5
        let a = [1.0, 2.0, 3.0];
        let b = [0.0, 2.0, 4.0, 6.0, 8.0];
        let result = compare_means(&a, &b).unwrap();
        let b_var: f64 = 10.0;
        let se2_a: f64 = 1.0 / 3.0;
        let se2_b: f64 = b_var / 5.0;
        let expected_df = (se2_a + se2_b).powi(2) / (se2_a.powi(2) / 2.0 + se2_b.powi(2) / 4.0);
        assert!((result.degrees_of_freedom - expected_df).abs() < 1e-12);
        assert_eq!(result.second.sample_variance, Some(b_var));
    }

    #[test]
    fn test_identical_means_give_p_one() {
        let result = compare_means(&[1.0, 3.0], &[0.0, 4.0]).unwrap();
        assert_eq!(result.statistic, 0.0);
        assert!((result.p_value - 1.0).abs() < 1e-12);
        assert_eq!(
            SignificancePolicy::default().assess(result.p_value),
            Significance::Inconclusive
        );
    }

    #[test]
    fn test_zero_variance_is_an_error() {
        let err = compare_means(&[5.0, 5.0], &[5.0, 5.0]).unwrap_err();
        assert_eq!(
            err,
            InsufficientDataError::ZeroVariance {
                sample: Sample::First
            }
        );
        let err = compare_means(&[1.0, 2.0], &[3.0, 3.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            InsufficientDataError::ZeroVariance {
                sample: Sample::Second
            }
        );
    }

    #[test]
    fn test_constant_fractional_sample_has_zero_variance() {
        assert_eq!(
            compare_means(&[0.1, 0.1, 0.1], &[1.0, 2.0, 3.0]).unwrap_err(),
            InsufficientDataError::ZeroVariance {
                sample: Sample::First
            }
        );
        assert_eq!(
            compare_means(&[1.0, 2.0, 3.0], &[0.7, 0.7, 0.7, 0.7]).unwrap_err(),
            InsufficientDataError::ZeroVariance {
                sample: Sample::Second
            }
        );
        assert!(compare_means(&[0.1, 0.1, 0.1], &[0.1, 0.1, 0.1]).is_err());
    }

    #[test]
    fn test_too_few_observations() {
        assert_eq!(
            compare_means(&[], &[1.0, 2.0]).unwrap_err(),
            InsufficientDataError::TooFewObservations {
                sample: Sample::First,
                count: 0
            }
        );
        assert_eq!(
            compare_means(&[1.0, 2.0], &[3.0]).unwrap_err(),
            InsufficientDataError::TooFewObservations {
                sample: Sample::Second,
                count: 1
            }
        );
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert_eq!(
            compare_means(&[1.0, f64::NAN], &[1.0, 2.0]).unwrap_err(),
            InsufficientDataError::NonFiniteValue {
                sample: Sample::First
            }
        );
    }

    #[test]
    fn test_custom_alpha() {
        let policy = SignificancePolicy::new(0.01);
        assert_eq!(policy.assess(0.02), Significance::Inconclusive);
        assert_eq!(policy.assess(0.005), Significance::Significant);
        assert_eq!(policy.assess(0.01), Significance::Inconclusive);
    }

    #[test]
    fn test_error_messages() {
        let err = InsufficientDataError::TooFewObservations {
            sample: Sample::Second,
            count: 1,
        };
        assert_eq!(
            err.to_string(),
            "second sample has 1 observation(s), at least 2 are required"
        );
    }
}
