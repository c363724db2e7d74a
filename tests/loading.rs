use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use pitchside::data::loader::{load_file, LoadError};
use pitchside::data::model::NumericColumn;

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("pitchside_test_{}_{name}", std::process::id()));
    path
}

#[test]
fn csv_fixture_loads_with_parsed_positions() {
    let table = load_file(&fixture_path("players.csv")).expect("fixture should load");

    assert_eq!(table.len(), 5);
    assert_eq!(table.players[0].name, "Luca Silva");
    assert_eq!(table.players[0].positions, vec!["ST", "CF"]);
    assert_eq!(table.players[3].positions, vec!["GK"]);

    // Unique-value sets feed the sidebar widgets.
    assert_eq!(table.clubs.len(), 3);
    assert!(table.clubs.contains("Riverton FC"));
    assert!(table.position_tokens.contains("ST"));
    assert!(table.position_tokens.contains("GK"));
    // Exploded tokens, not raw strings.
    assert!(!table.position_tokens.contains("ST, CF"));
}

#[test]
fn blank_numeric_cells_become_null() {
    let table = load_file(&fixture_path("players.csv")).expect("fixture should load");

    let keeper = &table.players[3];
    assert_eq!(keeper.wage, None);
    assert_eq!(keeper.pace, None);
    assert_eq!(keeper.overall, Some(82.0));
}

#[test]
fn slider_bounds_truncate_but_skip_nulls() {
    let table = load_file(&fixture_path("players.csv")).expect("fixture should load");

    assert_eq!(table.slider_bounds(NumericColumn::Age), Some((20, 30)));
    // 210000.75 truncates; the keeper's null wage is ignored.
    assert_eq!(table.slider_bounds(NumericColumn::Wage), Some((40000, 210000)));
    // Stored values keep their fractional part.
    assert_eq!(table.players[2].wage, Some(210000.75));
}

#[test]
fn missing_required_column_is_fatal() {
    let path = temp_path("no_club.csv");
    fs::write(
        &path,
        "Name,Nationality,Positions,Age,Overall Rating,Potential,Wage(EUR)_Avg\n\
         A,Brazil,ST,20,80,85,1000\n",
    )
    .expect("temp file should be writable");

    let err = load_file(&path).expect_err("load should fail");
    assert!(matches!(err, LoadError::MissingColumn("Club")));
    fs::remove_file(&path).ok();
}

#[test]
fn unsupported_extension_is_rejected() {
    let err = load_file(&temp_path("players.txt")).expect_err("load should fail");
    assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "txt"));
}

#[test]
fn missing_file_is_an_error() {
    assert!(load_file(&temp_path("does_not_exist.csv")).is_err());
}

#[test]
fn json_records_load_with_lenient_numbers() {
    let path = temp_path("players.json");
    fs::write(
        &path,
        r#"[
            {"Name":"A","Club":"C1","Nationality":"Brazil","Positions":"ST, CF",
             "Age":21,"Overall Rating":77,"Potential":80,"Wage(EUR)_Avg":"12345.5"},
            {"Name":"B","Club":"C2","Nationality":"Spain","Positions":"GK",
             "Age":30,"Overall Rating":81,"Potential":81,"Wage(EUR)_Avg":null}
        ]"#,
    )
    .expect("temp file should be writable");

    let table = load_file(&path).expect("JSON should load");
    assert_eq!(table.len(), 2);
    // Numeric strings are accepted; null stays null.
    assert_eq!(table.players[0].wage, Some(12345.5));
    assert_eq!(table.players[1].wage, None);
    // Skill columns absent from the file default to null.
    assert_eq!(table.players[0].pace, None);
    fs::remove_file(&path).ok();
}

#[test]
fn parquet_round_trips_through_the_loader() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Name", DataType::Utf8, false),
        Field::new("Club", DataType::Utf8, false),
        Field::new("Nationality", DataType::Utf8, false),
        Field::new("Positions", DataType::Utf8, false),
        Field::new("Age", DataType::Int64, false),
        Field::new("Overall Rating", DataType::Int64, false),
        Field::new("Potential", DataType::Int64, false),
        Field::new("Wage(EUR)_Avg", DataType::Int64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["A", "B"])),
            Arc::new(StringArray::from(vec!["C1", "C2"])),
            Arc::new(StringArray::from(vec!["Brazil", "Spain"])),
            Arc::new(StringArray::from(vec!["ST, CF", "GK"])),
            Arc::new(Int64Array::from(vec![21, 30])),
            Arc::new(Int64Array::from(vec![77, 81])),
            Arc::new(Int64Array::from(vec![80, 81])),
            Arc::new(Int64Array::from(vec![Some(12000), None])),
        ],
    )
    .expect("batch should build");

    let path = temp_path("players.parquet");
    let file = fs::File::create(&path).expect("temp file should be writable");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("writer should open");
    writer.write(&batch).expect("batch should write");
    writer.close().expect("writer should close");

    let table = load_file(&path).expect("parquet should load");
    assert_eq!(table.len(), 2);
    assert_eq!(table.players[0].positions, vec!["ST", "CF"]);
    assert_eq!(table.players[0].wage, Some(12000.0));
    assert_eq!(table.players[1].wage, None);
    assert_eq!(table.players[1].pace, None);
    fs::remove_file(&path).ok();
}
