//! Comparison of binary-coded answers between two groups.
//!
//! Each observation is `Some(true)`, `Some(false)` or `None`. Absent answers
//! are excluded from both the numerator and the denominator. No significance
//! test is applied: the comparison only reports which proportion is larger.

use crate::Sample;

/// Proportion of positive answers in one group.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SampleProportion {
    /// Number of `Some(true)` observations.
    pub successes: usize,
    /// Number of resolved (`Some`) observations.
    pub observations: usize,
    /// Number of absent observations left out of the proportion.
    pub excluded: usize,
    /// `successes / observations`.
    pub proportion: f64,
}

impl SampleProportion {
    /// Computes the proportion of positive answers.
    ///
    /// Returns `None` if no observation is resolved.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<bool>>,
    {
        let mut successes = 0;
        let mut observations = 0;
        let mut excluded = 0;
        for value in values {
            match value {
                Some(positive) => {
                    observations += 1;
                    successes += usize::from(positive);
                }
                None => excluded += 1,
            }
        }
        (observations > 0).then(|| Self {
            successes,
            observations,
            excluded,
            proportion: successes as f64 / observations as f64,
        })
    }
}

/// Which group shows the larger proportion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProportionOrdering {
    FirstGreater,
    SecondGreater,
    Equal,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProportionComparison {
    pub first: SampleProportion,
    pub second: SampleProportion,
    pub ordering: ProportionOrdering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{sample} has no resolved observation")]
pub struct EmptySampleError {
    pub sample: Sample,
}

/// Compares the proportion of positive answers in two groups.
///
/// # Errors
///
/// Returns [`EmptySampleError`] when a group has no `Some` observation.
pub fn compare_proportions<A, B>(first: A, second: B) -> Result<ProportionComparison, EmptySampleError>
where
    A: IntoIterator<Item = Option<bool>>,
    B: IntoIterator<Item = Option<bool>>,
{
    let first = SampleProportion::new(first).ok_or(EmptySampleError {
        sample: Sample::First,
    })?;
    let second = SampleProportion::new(second).ok_or(EmptySampleError {
        sample: Sample::Second,
    })?;
    let ordering = if first.proportion > second.proportion {
        ProportionOrdering::FirstGreater
    } else if second.proportion > first.proportion {
        ProportionOrdering::SecondGreater
    } else {
        ProportionOrdering::Equal
    };
    Ok(ProportionComparison {
        first,
        second,
        ordering,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(values: &[u8]) -> Vec<Option<bool>> {
        values.iter().map(|&v| Some(v == 1)).collect()
    }

    #[test]
    fn test_first_greater() {
        let result = compare_proportions(codes(&[1, 1, 0, 0]), codes(&[1, 0, 0, 0])).unwrap();
        assert_eq!(result.first.proportion, 0.5);
        assert_eq!(result.second.proportion, 0.25);
        assert_eq!(result.ordering, ProportionOrdering::FirstGreater);
    }

    #[test]
    fn test_second_greater_and_equal() {
        let result = compare_proportions(codes(&[0, 1]), codes(&[1, 1, 1])).unwrap();
        assert_eq!(result.ordering, ProportionOrdering::SecondGreater);

        let result = compare_proportions(codes(&[0, 1]), codes(&[1, 0, 1, 0])).unwrap();
        assert_eq!(result.ordering, ProportionOrdering::Equal);
    }

    #[test]
    fn test_absent_values_are_excluded() {
        let first = [Some(true), None, Some(false), None];
        let result = compare_proportions(first, codes(&[0])).unwrap();
        assert_eq!(result.first.observations, 2);
        assert_eq!(result.first.excluded, 2);
        assert_eq!(result.first.proportion, 0.5);
    }

    #[test]
    fn test_empty_group_is_an_error() {
        let err = compare_proportions([None, None], codes(&[1])).unwrap_err();
        assert_eq!(err.sample, Sample::First);
        let err = compare_proportions(codes(&[1]), Vec::new()).unwrap_err();
        assert_eq!(err.sample, Sample::Second);
        assert_eq!(err.to_string(), "second sample has no resolved observation");
    }
}
