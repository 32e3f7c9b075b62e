/// Box-plot summary of a dataset.
///
/// Quartiles use linear interpolation between closest ranks, so the summary
/// of `[1, 2, 3, 4]` has `q1 = 1.75` and `q3 = 3.25`.
///
/// # Examples
///
/// ```
/// use extrascope_stats::percentiles::FiveNumberSummary;
///
/// let summary = FiveNumberSummary::new([18.0, 19.0, 20.0, 21.0, 22.0]).unwrap();
/// assert_eq!(summary.min, 18.0);
/// assert_eq!(summary.q1, 19.0);
/// assert_eq!(summary.median, 20.0);
/// assert_eq!(summary.q3, 21.0);
/// assert_eq!(summary.max, 22.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Computes the summary from unsorted values.
    ///
    /// Returns `None` if the dataset is empty.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes the summary from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        Some(Self {
            min: *sorted_values.first()?,
            q1: compute_percentile(sorted_values, 25.0),
            median: compute_percentile(sorted_values, 50.0),
            q3: compute_percentile(sorted_values, 75.0),
            max: *sorted_values.last()?,
        })
    }

    /// Interquartile range (`q3 - q1`).
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Returns the whisker bounds at 1.5 IQR, clamped to the observed range.
    #[must_use]
    pub fn whiskers(&self) -> (f64, f64) {
        let reach = 1.5 * self.iqr();
        (
            f64::max(self.q1 - reach, self.min),
            f64::min(self.q3 + reach, self.max),
        )
    }
}

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation: the k-th percentile sits at fractional rank
/// `(n - 1) * k / 100` and is interpolated between its two neighbours.
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use extrascope_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(last) = sorted_values.len().checked_sub(1) else {
        return f64::NAN;
    };
    let rank = (last as f64 * percentile.clamp(0.0, 100.0)) / 100.0;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - rank.floor();
    sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction
}
