//! Survey layer for the extracurricular-activity dashboard.
//!
//! Data flows one way through this crate:
//!
//! ```text
//! CSV file -> RawRecord -> normalize -> CleanedTable -> charts / hypothesis report
//! ```
//!
//! # Modules
//!
//! - [`schema`]: the 22 positional columns and [`RawRecord`](schema::RawRecord)
//! - [`source`]: CSV loading
//! - [`extract`]: digit-run extraction and year-suffix stripping
//! - [`mapping`]: finite enumeration mappings (participation, gender, peer relations)
//! - [`normalize`]: the dataset normalizer
//! - [`table`]: the cleaned table and its cells
//! - [`chart`]: aggregations drawn by the dashboard panels
//! - [`words`]: word ranking for free-text answers
//! - [`hypothesis`]: the gender comparisons on weekly hours and peer relations
//!
//! # Example
//!
//! ```
//! use extrascope_survey::{normalize::normalize, schema::Column, source};
//!
//! let header = Column::ALL.map(Column::name).join(",");
//! let mut row = vec![""; Column::COUNT];
//! row[Column::Age.position()] = "21 ans";
//! row[Column::EducationLevel.position()] = "3ère année";
//! let data = format!("{header}\n{}\n", row.join(","));
//!
//! let table = normalize(source::read_raw_records(data.as_bytes()).unwrap());
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.records()[0].age(), 21.0);
//! assert_eq!(table.records()[0].label(Column::EducationLevel), "3");
//! ```

pub mod chart;
pub mod extract;
pub mod hypothesis;
pub mod mapping;
pub mod normalize;
pub mod schema;
pub mod source;
pub mod table;
pub mod words;
