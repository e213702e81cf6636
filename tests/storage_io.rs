use popviz::models::Record;
use popviz::{Error, storage};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample.csv")
}

#[test]
fn loads_fixture_and_drops_bad_years() {
    let ds = storage::load_csv(fixture()).unwrap();
    // 12 data lines, one with a non-integer year
    assert_eq!(ds.len(), 11);
    assert!(ds.iter().all(|r| r.year >= 1960 && r.year <= 1965));

    let bra_1961 = ds
        .iter()
        .find(|r| r.location == "BRA" && r.year == 1961)
        .expect("row with blank cells is kept");
    assert_eq!(bra_1961.pop_mlns, None);
    assert_eq!(bra_1961.fertility_rate, Some(6.04));
    assert_eq!(bra_1961.life_expectancy, None);
}

#[test]
fn garbage_numbers_become_missing_values() {
    let text = "location,time,pop_mlns,fertility_rate,life_expectancy\n\
                AUS,1960,abc,NaN,70.8\n\
                AUS, 1961 , 10.5 ,3.3,inf\n";
    let ds = storage::load_csv_from_reader(Cursor::new(text)).unwrap();
    assert_eq!(ds.len(), 2);
    let first = &ds.records()[0];
    assert_eq!(first.pop_mlns, None);
    assert_eq!(first.fertility_rate, None);
    assert_eq!(first.life_expectancy, Some(70.8));
    let second = &ds.records()[1];
    assert_eq!(second.year, 1961);
    assert_eq!(second.pop_mlns, Some(10.5));
    assert_eq!(second.life_expectancy, None);
}

#[test]
fn missing_column_is_a_load_failure() {
    let text = "location,time,pop_mlns,life_expectancy\nAUS,1960,10.3,70.8\n";
    let err = storage::load_csv_from_reader(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref c) if c == "fertility_rate"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = storage::load_csv(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn save_csv_and_json() {
    let ds = storage::load_csv(fixture()).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("rows.csv");
    storage::save_csv(&ds, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("location,time,pop_mlns,fertility_rate,life_expectancy"));
    assert_eq!(csv_txt.lines().count(), 1 + ds.len());
    // saved CSV loads back to the same table
    assert_eq!(storage::load_csv(&csv_path).unwrap(), ds);

    let json_path = dir.path().join("rows.json");
    storage::save_json(&ds, &json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), ds.len());
    assert_eq!(arr[0]["time"], 1960);
    assert_eq!(arr[0]["location"], "AUS");
}

// Spreadsheets evaluate cells starting with = + - @ as formulas; exported cells get a
// leading single quote instead.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let rows = vec![
        Record::new("=HYPERLINK(\"http://x\")", 1960, Some(1.0), None, None),
        Record::new("@SUM(A1:A2)", 1961, Some(2.0), None, None),
        Record::new("AUS", 1962, Some(3.0), None, None),
    ];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inj.csv");
    storage::save_csv(&rows, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let locations: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap().get(0).unwrap().to_string())
        .collect();
    assert_eq!(
        locations,
        vec!["'=HYPERLINK(\"http://x\")", "'@SUM(A1:A2)", "AUS"]
    );
}
