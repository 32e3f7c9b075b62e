//! Counting categorical observations.
//!
//! These tables back the dashboard's count plots: [`Frequency`] for a single
//! category, [`CrossTab`] for a category split by a hue, and [`GroupedMean`]
//! for the mean of a measure per category and hue.

use std::collections::{BTreeMap, BTreeSet};

/// Occurrence counts of each distinct value.
///
/// # Examples
///
/// ```
/// use extrascope_stats::frequency::Frequency;
///
/// let freq = Frequency::from_values(["b", "a", "b", "c", "b"]);
/// assert_eq!(freq.total(), 5);
/// assert_eq!(freq.count(&"b"), 3);
/// assert_eq!(freq.most_common()[0], (&"b", 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequency<K> {
    counts: BTreeMap<K, u64>,
    total: u64,
}

impl<K> Default for Frequency<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<K> Frequency<K>
where
    K: Ord,
{
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut freq = Self::default();
        for value in values {
            freq.add(value);
        }
        freq
    }

    pub fn add(&mut self, value: K) {
        *self.counts.entry(value).or_default() += 1;
        self.total += 1;
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    #[must_use]
    pub fn count(&self, value: &K) -> u64 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Share of `value` in percent, or `0.0` for an empty table.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn share_percent(&self, value: &K) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.count(value) as f64 / self.total as f64
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.counts.iter().map(|(k, c)| (k, *c))
    }

    /// Entries by descending count; ties keep key order.
    #[must_use]
    pub fn most_common(&self) -> Vec<(&K, u64)> {
        let mut entries = self.iter().collect::<Vec<_>>();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Counts of a row category split by a hue category.
///
/// # Examples
///
/// ```
/// use extrascope_stats::frequency::CrossTab;
///
/// let table = CrossTab::from_pairs([("L1", "male"), ("L1", "female"), ("L2", "male")]);
/// assert_eq!(table.count(&"L1", &"male"), 1);
/// assert_eq!(table.count(&"L2", &"female"), 0);
/// assert_eq!(table.hues().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTab<R, C> {
    rows: BTreeMap<R, BTreeMap<C, u64>>,
    hues: BTreeSet<C>,
}

impl<R, C> Default for CrossTab<R, C> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            hues: BTreeSet::new(),
        }
    }
}

impl<R, C> CrossTab<R, C>
where
    R: Ord,
    C: Ord + Clone,
{
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, C)>,
    {
        let mut table = Self::default();
        for (row, hue) in pairs {
            table.add(row, hue);
        }
        table
    }

    pub fn add(&mut self, row: R, hue: C) {
        self.hues.insert(hue.clone());
        *self.rows.entry(row).or_default().entry(hue).or_default() += 1;
    }

    #[must_use]
    pub fn count(&self, row: &R, hue: &C) -> u64 {
        self.rows
            .get(row)
            .and_then(|hues| hues.get(hue))
            .copied()
            .unwrap_or(0)
    }

    pub fn row_keys(&self) -> impl Iterator<Item = &R> + '_ {
        self.rows.keys()
    }

    /// Every hue seen in any row, in key order.
    pub fn hues(&self) -> impl Iterator<Item = &C> + '_ {
        self.hues.iter()
    }

    /// Counts for one row, with zeros for hues absent from that row.
    #[must_use]
    pub fn row_counts(&self, row: &R) -> Vec<(&C, u64)> {
        self.hues
            .iter()
            .map(|hue| (hue, self.count(row, hue)))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Accumulator {
    sum: f64,
    count: u64,
}

/// Mean of a measure per row category and hue (a grouped bar plot).
///
/// # Examples
///
/// ```
/// use extrascope_stats::frequency::GroupedMean;
///
/// let means = GroupedMean::from_triples([("12", "male", 4.0), ("12", "male", 6.0)]);
/// assert_eq!(means.mean(&"12", &"male"), Some(5.0));
/// assert_eq!(means.mean(&"12", &"female"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedMean<R, C> {
    cells: BTreeMap<R, BTreeMap<C, Accumulator>>,
    hues: BTreeSet<C>,
}

impl<R, C> Default for GroupedMean<R, C> {
    fn default() -> Self {
        Self {
            cells: BTreeMap::new(),
            hues: BTreeSet::new(),
        }
    }
}

impl<R, C> GroupedMean<R, C>
where
    R: Ord,
    C: Ord + Clone,
{
    #[must_use]
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = (R, C, f64)>,
    {
        let mut table = Self::default();
        for (row, hue, value) in triples {
            table.add(row, hue, value);
        }
        table
    }

    pub fn add(&mut self, row: R, hue: C, value: f64) {
        self.hues.insert(hue.clone());
        let acc = self.cells.entry(row).or_default().entry(hue).or_default();
        acc.sum += value;
        acc.count += 1;
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self, row: &R, hue: &C) -> Option<f64> {
        let acc = self.cells.get(row)?.get(hue)?;
        (acc.count > 0).then(|| acc.sum / acc.count as f64)
    }

    pub fn row_keys(&self) -> impl Iterator<Item = &R> + '_ {
        self.cells.keys()
    }

    pub fn hues(&self) -> impl Iterator<Item = &C> + '_ {
        self.hues.iter()
    }

    /// Means for one row; `None` where the row has no observation for a hue.
    #[must_use]
    pub fn row_means(&self, row: &R) -> Vec<(&C, Option<f64>)> {
        self.hues
            .iter()
            .map(|hue| (hue, self.mean(row, hue)))
            .collect()
    }

    /// Largest mean in the table, used to scale bar charts.
    #[must_use]
    pub fn max_mean(&self) -> Option<f64> {
        self.cells
            .keys()
            .flat_map(|row| self.hues.iter().filter_map(move |hue| self.mean(row, hue)))
            .max_by(f64::total_cmp)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frequency() {
        let freq = Frequency::<&str>::default();
        assert!(freq.is_empty());
        assert_eq!(freq.share_percent(&"a"), 0.0);
        assert!(freq.most_common().is_empty());
    }

    #[test]
    fn test_most_common_ties_keep_key_order() {
        let freq = Frequency::from_values(["c", "a", "b", "a", "c"]);
        let order = freq
            .most_common()
            .into_iter()
            .map(|(k, _)| *k)
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_share_percent() {
        let freq = Frequency::from_values([1, 1, 1, 2]);
        assert_eq!(freq.share_percent(&1), 75.0);
        assert_eq!(freq.share_percent(&3), 0.0);
    }

    #[test]
    fn test_cross_tab_row_counts_fill_zero() {
        let table = CrossTab::from_pairs([("A", "x"), ("A", "x"), ("B", "y")]);
        assert_eq!(table.row_counts(&"A"), vec![(&"x", 2), (&"y", 0)]);
        assert_eq!(table.row_counts(&"B"), vec![(&"x", 0), (&"y", 1)]);
        assert_eq!(table.row_keys().collect::<Vec<_>>(), vec![&"A", &"B"]);
    }

    #[test]
    fn test_grouped_mean() {
        let means = GroupedMean::from_triples([
            ("10", "female", 2.0),
            ("10", "female", 4.0),
            ("10", "male", 1.0),
            ("14", "male", 9.0),
        ]);
        assert_eq!(means.mean(&"10", &"female"), Some(3.0));
        assert_eq!(
            means.row_means(&"14"),
            vec![(&"female", None), (&"male", Some(9.0))]
        );
        assert_eq!(means.max_mean(), Some(9.0));
    }
}
