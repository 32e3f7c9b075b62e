//! The dataset normalizer.
//!
//! Turns raw survey rows into a [`CleanedTable`] in one pass:
//!
//! 1. rows identical once the identity fields are removed are collapsed,
//!    keeping the first occurrence;
//! 2. every non-identity field is cleaned according to its column's
//!    [`CleaningRule`];
//! 3. cells that are still unresolved take their column's [`FillDefault`].
//!
//! Every step is total: malformed text degrades to an unresolved cell and
//! then to the fill default, it is never reported as an error.
//!
//! [`FillDefault`]: crate::schema::FillDefault

use std::collections::{BTreeMap, HashSet};

use crate::{
    extract,
    mapping::{self, Resolution},
    schema::{CleaningRule, Column, RawRecord},
    table::{Cell, CleanedRecord, CleanedTable},
};

/// What the normalizer did to its input.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct NormalizeReport {
    /// Number of raw rows given to the normalizer.
    pub rows_read: usize,
    /// Number of rows dropped as duplicates.
    pub duplicates_removed: usize,
    /// Number of cells that took their column's fill default, per column.
    pub filled: BTreeMap<Column, usize>,
}

impl NormalizeReport {
    #[must_use]
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.duplicates_removed
    }

    #[must_use]
    pub fn total_filled(&self) -> usize {
        self.filled.values().sum()
    }
}

/// Normalizes raw rows into a cleaned table.
pub fn normalize<I>(rows: I) -> CleanedTable
where
    I: IntoIterator<Item = RawRecord>,
{
    normalize_with_report(rows).0
}

/// Normalizes raw rows and reports what was deduplicated and filled.
pub fn normalize_with_report<I>(rows: I) -> (CleanedTable, NormalizeReport)
where
    I: IntoIterator<Item = RawRecord>,
{
    let rows = rows.into_iter().collect::<Vec<_>>();
    let mut report = NormalizeReport {
        rows_read: rows.len(),
        ..NormalizeReport::default()
    };

    let mut seen = HashSet::new();
    let mut records = vec![];
    for row in &rows {
        if !seen.insert(row.dedup_key()) {
            report.duplicates_removed += 1;
            continue;
        }
        records.push(clean_record(row, &mut report.filled));
    }

    tracing::debug!(
        rows_read = report.rows_read,
        duplicates_removed = report.duplicates_removed,
        filled = report.total_filled(),
        "normalized survey rows"
    );
    (CleanedTable::new(records), report)
}

fn clean_record(row: &RawRecord, filled: &mut BTreeMap<Column, usize>) -> CleanedRecord {
    let cells = Column::cleaned()
        .iter()
        .map(|&column| {
            clean_cell(column, row.get(column)).unwrap_or_else(|| {
                *filled.entry(column).or_default() += 1;
                column.fill_default().to_cell()
            })
        })
        .collect();
    CleanedRecord::new(cells)
}

/// Cleans one raw field; `None` means the cell is unresolved.
#[must_use]
pub fn clean_cell(column: Column, raw: &str) -> Option<Cell> {
    match column.rule() {
        CleaningRule::Identity => None,
        CleaningRule::DigitRun => extract::leading_digit_run(raw).map(Cell::Number),
        CleaningRule::Enumerated => match mapping::PARTICIPATION_IN_EVENTS.resolve(raw) {
            Resolution::Mapped(value) | Resolution::Parsed(value) => Some(Cell::Number(value)),
            Resolution::PassedThrough(_) | Resolution::Absent => None,
        },
        CleaningRule::StripYearSuffix => non_blank(extract::strip_year_suffix(raw))
            .map(|label| Cell::Text(label.to_owned())),
        CleaningRule::PassThrough => non_blank(raw).map(|text| {
            text.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map_or_else(|| Cell::Text(text.to_owned()), Cell::Number)
        }),
    }
}

fn non_blank(text: &str) -> Option<&str> {
    (!text.trim().is_empty()).then_some(text)
}
