//! Loading raw survey records from the CSV export.
//!
//! The first line is a header. Its names are ignored (fields are positional)
//! but its width must match the schema. Bytes that are not valid UTF-8 are
//! replaced rather than rejected.

use std::{io, path::Path};

use csv::{ByteRecord, ReaderBuilder};

use crate::schema::{RawRecord, SchemaMismatchError};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("failed to read CSV: {_0}")]
    Csv(#[error(source)] csv::Error),
    #[display("line {line}: {source}")]
    #[from(skip)]
    SchemaMismatch {
        line: u64,
        source: SchemaMismatchError,
    },
}

/// Reads every raw record from CSV data.
///
/// An empty input yields no record.
///
/// # Errors
///
/// Returns [`LoadError::SchemaMismatch`] if the header or any row does not
/// have exactly 22 fields, and [`LoadError::Csv`] on a read error.
pub fn read_raw_records<R>(reader: R) -> Result<Vec<RawRecord>, LoadError>
where
    R: io::Read,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = reader.byte_headers()?;
    if header.is_empty() {
        tracing::debug!("survey file is empty");
        return Ok(vec![]);
    }
    to_raw_record(header, 1)?;

    let mut records = vec![];
    for record in reader.byte_records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        records.push(to_raw_record(&record, line)?);
    }
    tracing::debug!(rows = records.len(), "read survey rows");
    Ok(records)
}

/// Reads every raw record from a CSV file.
///
/// # Errors
///
/// See [`read_raw_records`]; failing to open the file is a [`LoadError::Csv`].
pub fn read_raw_records_from_path<P>(path: P) -> Result<Vec<RawRecord>, LoadError>
where
    P: AsRef<Path>,
{
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    read_raw_records(io::BufReader::new(file))
}

fn to_raw_record(record: &ByteRecord, line: u64) -> Result<RawRecord, LoadError> {
    let fields = record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect();
    RawRecord::new(fields).map_err(|source| LoadError::SchemaMismatch { line, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    fn line(fields: &[&str]) -> String {
        let mut fields = fields.iter().map(|f| (*f).to_owned()).collect::<Vec<_>>();
        fields.resize(Column::COUNT, String::new());
        fields.join(",")
    }

    fn header() -> String {
        Column::ALL.map(Column::name).join(",")
    }

    #[test]
    fn test_reads_rows_positionally() {
        let data = format!(
            "{}\n{}\n{}\n",
            header(),
            line(&["2024-01-01", "a", "21 ans", "Homme"]),
            line(&["2024-01-02", "b", "19", "Femme"]),
        );
        let records = read_raw_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(Column::Age), "21 ans");
        assert_eq!(records[1].get(Column::Gender), "Femme");
    }

    #[test]
    fn test_header_names_are_ignored() {
        let renamed = (0..Column::COUNT)
            .map(|i| format!("Question {i}"))
            .collect::<Vec<_>>()
            .join(",");
        let data = format!("{renamed}\n{}\n", line(&["t", "u", "20"]));
        let records = read_raw_records(data.as_bytes()).unwrap();
        assert_eq!(records[0].get(Column::Age), "20");
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let mut fields = vec![String::new(); Column::COUNT];
        fields[Column::PreferredActivities.position()] = "\"Sport, musique\"".to_owned();
        let data = format!("{}\n{}\n", header(), fields.join(","));
        let records = read_raw_records(data.as_bytes()).unwrap();
        assert_eq!(records[0].get(Column::PreferredActivities), "Sport, musique");
    }

    #[test]
    fn test_wrong_width_row_is_rejected_with_line() {
        let data = format!("{}\n{}\na,b,c\n", header(), line(&["t", "u", "20"]));
        let err = read_raw_records(data.as_bytes()).unwrap_err();
        match &err {
            LoadError::SchemaMismatch { line, source } => {
                assert_eq!(*line, 3);
                assert_eq!(source.found, 3);
            }
            LoadError::Csv(e) => panic!("unexpected csv error: {e}"),
        }
        assert_eq!(err.to_string(), "line 3: expected 22 fields, found 3");
    }

    #[test]
    fn test_wrong_width_header_is_rejected() {
        let err = read_raw_records("a,b\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::SchemaMismatch { line: 1, .. }));
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        assert!(read_raw_records(io::empty()).unwrap().is_empty());
        let records = read_raw_records(format!("{}\n", header()).as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut data = format!("{}\n", header()).into_bytes();
        data.extend_from_slice(b"t,u,2\xff1");
        data.extend_from_slice(",".repeat(Column::COUNT - 3).as_bytes());
        data.push(b'\n');
        let records = read_raw_records(data.as_slice()).unwrap();
        assert_eq!(records[0].get(Column::Age), "2\u{fffd}1");
    }
}
