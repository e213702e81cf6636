//! Loading the source table and exporting filtered views.

use crate::error::{Error, Result};
use crate::models::{Dataset, REQUIRED_COLUMNS, Record};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Load the whole table from a CSV file with a header row.
///
/// A missing or unreadable file and a missing required column are load failures. Rows
/// whose `time` is not an integer, whose width does not match the header, or that are not
/// valid UTF-8 are dropped with a warning; unparseable measurements stay in the row as `None`.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let dataset = load_csv_from_reader(file)?;
    log::info!("loaded {} rows from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Same as [`load_csv`] for any reader.
pub fn load_csv_from_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(Error::MissingColumn(col.to_string()));
        }
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rdr.deserialize::<Record>() {
        match row {
            Ok(r) => records.push(r),
            Err(e) if is_row_error(&e) => {
                dropped += 1;
                log::warn!("skipping malformed row: {e}");
            }
            Err(e) => return Err(e.into()),
        }
    }
    if dropped > 0 {
        log::warn!("dropped {dropped} malformed row(s)");
    }
    Ok(Dataset::new(records))
}

fn is_row_error(e: &csv::Error) -> bool {
    matches!(
        e.kind(),
        csv::ErrorKind::Deserialize { .. }
            | csv::ErrorKind::UnequalLengths { .. }
            | csv::ErrorKind::Utf8 { .. }
    )
}

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn neutralize_formula(cell: &str) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{cell}"),
        _ => cell.to_string(),
    }
}

/// Save rows as CSV using the input column names, so the file can be loaded again.
pub fn save_csv<'a, I, P>(rows: I, path: P) -> Result<()>
where
    I: IntoIterator<Item = &'a Record>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(REQUIRED_COLUMNS)?;
    for r in rows {
        wtr.serialize((
            neutralize_formula(&r.location),
            r.year,
            r.pop_mlns,
            r.fertility_rate,
            r.life_expectancy,
        ))?;
    }
    wtr.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Save rows as a pretty JSON array.
pub fn save_json<'a, I, P>(rows: I, path: P) -> Result<()>
where
    I: IntoIterator<Item = &'a Record>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let rows: Vec<&Record> = rows.into_iter().collect();
    let s = serde_json::to_string_pretty(&rows)?;
    let mut f = File::create(path).map_err(|e| Error::io(path, e))?;
    f.write_all(s.as_bytes()).map_err(|e| Error::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
location,time,pop_mlns,fertility_rate,life_expectancy
AUS,1960,10.3,3.45,70.8
AUS,1961,10.5,,71.0
USA,1960,180.0,3.65,69.8
";

    #[test]
    fn reads_rows_and_blank_cells() {
        let ds = load_csv_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[1].fertility_rate, None);
        assert_eq!(ds.records()[2].pop_mlns, Some(180.0));
    }

    #[test]
    fn missing_column_is_a_load_failure() {
        let csv = "location,time,pop_mlns\nAUS,1960,10.3\n";
        match load_csv_from_reader(csv.as_bytes()) {
            Err(Error::MissingColumn(c)) => assert_eq!(c, "fertility_rate"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn non_utf8_row_is_dropped() {
        let mut bytes = b"location,time,pop_mlns,fertility_rate,life_expectancy\n".to_vec();
        bytes.extend_from_slice(b"AUS,1960,10.3,3.45,70.8\n");
        bytes.extend_from_slice(b"C\xF4te,1960,3.7,7.0,40.0\n");
        bytes.extend_from_slice(b"USA,1960,180.0,3.65,69.8\n");
        let ds = load_csv_from_reader(bytes.as_slice()).unwrap();
        let locations: Vec<&str> = ds.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(locations, ["AUS", "USA"]);
    }

    #[test]
    fn bad_year_drops_row_bad_number_keeps_it() {
        let csv = "\
location,time,pop_mlns,fertility_rate,life_expectancy
AUS,nineteen,10.3,3.4,70.0
AUS,1962,lots,3.3,71.0
";
        let ds = load_csv_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].year, 1962);
        assert_eq!(ds.records()[0].pop_mlns, None);
    }

    #[test]
    fn csv_export_loads_back() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("x.csv");
        let ds = load_csv_from_reader(SAMPLE.as_bytes()).unwrap();
        save_csv(ds.records(), &p).unwrap();
        let again = load_csv(&p).unwrap();
        assert_eq!(again, ds);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_csv(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
