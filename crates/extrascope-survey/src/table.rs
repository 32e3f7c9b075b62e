//! The cleaned survey table.
//!
//! A [`CleanedTable`] is produced once by [`normalize`](crate::normalize::normalize)
//! and then shared read-only by every view. Category remaps (gender,
//! peer relations) are applied on read and never rewrite the table.

use std::{cmp::Ordering, fmt, io};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{
    mapping::{self, GenderCategory},
    schema::{Column, RawRecord},
};

/// A cleaned value.
///
/// Cells are totally ordered so they can key frequency tables: numbers sort
/// numerically before any text, text sorts lexicographically.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Number(_) => None,
            Cell::Text(text) => Some(text),
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            (Cell::Number(_), Cell::Text(_)) => Ordering::Less,
            (Cell::Text(_), Cell::Number(_)) => Ordering::Greater,
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
        }
    }
}

/// Largest magnitude rendered without a fractional part check.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(value) if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT => {
                write!(f, "{value:.0}")
            }
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(text) => f.write_str(text),
        }
    }
}

/// One deduplicated, default-filled survey answer.
///
/// Holds one [`Cell`] per entry of [`Column::cleaned`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRecord {
    cells: Vec<Cell>,
}

impl CleanedRecord {
    pub(crate) fn new(cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), Column::cleaned().len());
        Self { cells }
    }

    /// Cell of a non-identity column; `None` for identity columns.
    #[must_use]
    pub fn get(&self, column: Column) -> Option<&Cell> {
        self.cells.get(column.cleaned_index()?)
    }

    /// Numeric value of a column, `0.0` for text or identity columns.
    #[must_use]
    pub fn number(&self, column: Column) -> f64 {
        self.get(column)
            .and_then(Cell::as_number)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn age(&self) -> f64 {
        self.number(Column::Age)
    }

    #[must_use]
    pub fn weekly_hours(&self) -> f64 {
        self.number(Column::WeeklyHoursSpentOnActivities)
    }

    #[must_use]
    pub fn participation_in_events(&self) -> f64 {
        self.number(Column::ParticipationInEventsLastYear)
    }

    /// Gender after canonicalization (`Homme` -> male, `Femme` -> female).
    #[must_use]
    pub fn gender(&self) -> GenderCategory {
        GenderCategory::canonicalize(&self.label(Column::Gender))
    }

    /// Binary code of `improved_peer_relations`; `None` when unmapped.
    #[must_use]
    pub fn improved_peer_relations(&self) -> Option<bool> {
        mapping::peer_relations_code(&self.label(Column::ImprovedPeerRelations))
    }

    /// Text rendering of a cell, empty for identity columns.
    #[must_use]
    pub fn label(&self, column: Column) -> String {
        self.get(column).map(ToString::to_string).unwrap_or_default()
    }

    pub fn cells(&self) -> impl Iterator<Item = (Column, &Cell)> + '_ {
        Column::cleaned().iter().copied().zip(&self.cells)
    }

    /// Renders the record back into a raw row with blank identity fields.
    #[must_use]
    pub fn to_raw(&self) -> RawRecord {
        RawRecord::from_columns(|column| self.label(column))
    }
}

impl Serialize for CleanedRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, cell) in self.cells() {
            map.serialize_entry(column.name(), cell)?;
        }
        map.end()
    }
}

/// Immutable snapshot of every cleaned record.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct CleanedTable {
    records: Vec<CleanedRecord>,
}

impl CleanedTable {
    pub(crate) fn new(records: Vec<CleanedRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[CleanedRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CleanedRecord> + '_ {
        self.records.iter()
    }

    /// Cells of one column, in record order.
    pub fn column(&self, column: Column) -> impl Iterator<Item = &Cell> + '_ {
        self.records.iter().filter_map(move |r| r.get(column))
    }

    /// Raw rows that normalize back to this table.
    #[must_use]
    pub fn to_raw_records(&self) -> Vec<RawRecord> {
        self.records.iter().map(CleanedRecord::to_raw).collect()
    }

    /// Writes the table as CSV with a header of cleaned column names.
    pub fn write_csv<W>(&self, writer: W) -> csv::Result<()>
    where
        W: io::Write,
    {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(Column::cleaned().iter().map(|c| c.name()))?;
        for record in &self.records {
            writer.write_record(record.cells.iter().map(ToString::to_string))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a CleanedTable {
    type Item = &'a CleanedRecord;
    type IntoIter = std::slice::Iter<'a, CleanedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
