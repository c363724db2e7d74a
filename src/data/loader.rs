use std::fmt;
use std::path::{Path, PathBuf};

use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Player, PlayerTable, POSITION_DELIMITER};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. Load failure is fatal to the caller;
/// there is no retry path.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Columns that must be present in every source file. The optional skill
/// columns (Pace, Shooting, …) are not listed; they default to null.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Name",
    "Club",
    "Nationality",
    "Positions",
    "Age",
    "Overall Rating",
    "Potential",
    "Wage(EUR)_Avg",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a player table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the contract column names (recommended)
/// * `.json`    – records orientation: `[{ "Name": ..., "Club": ..., ... }]`
/// * `.parquet` – flat scalar columns with the same names
pub fn load_file(path: &Path) -> Result<PlayerTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }?;

    log::info!(
        "loaded {} players ({} clubs, {} nationalities, {} position tokens) from {}",
        table.len(),
        table.clubs.len(),
        table.nationalities.len(),
        table.position_tokens.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Row deserialization – shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

/// One source row, under the contract column names.  Numeric cells go through
/// [`lenient_f64`]: blank or unparseable values become null instead of
/// aborting the load.
#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Club")]
    club: String,
    #[serde(rename = "Nationality")]
    nationality: String,
    #[serde(rename = "Positions")]
    positions: String,
    #[serde(rename = "Age", default, deserialize_with = "lenient_f64")]
    age: Option<f64>,
    #[serde(rename = "Overall Rating", default, deserialize_with = "lenient_f64")]
    overall: Option<f64>,
    #[serde(rename = "Potential", default, deserialize_with = "lenient_f64")]
    potential: Option<f64>,
    #[serde(rename = "Wage(EUR)_Avg", default, deserialize_with = "lenient_f64")]
    wage: Option<f64>,
    #[serde(rename = "Pace", default, deserialize_with = "lenient_f64")]
    pace: Option<f64>,
    #[serde(rename = "Shooting", default, deserialize_with = "lenient_f64")]
    shooting: Option<f64>,
    #[serde(rename = "Passing", default, deserialize_with = "lenient_f64")]
    passing: Option<f64>,
    #[serde(rename = "Dribbling Rate", default, deserialize_with = "lenient_f64")]
    dribbling: Option<f64>,
    #[serde(rename = "Defending.1", default, deserialize_with = "lenient_f64")]
    defending: Option<f64>,
    #[serde(rename = "Physicality", default, deserialize_with = "lenient_f64")]
    physicality: Option<f64>,
}

impl RawPlayer {
    fn into_player(self) -> Player {
        Player {
            name: self.name,
            club: self.club,
            nationality: self.nationality,
            positions: split_positions(&self.positions),
            age: self.age,
            overall: self.overall,
            potential: self.potential,
            wage: self.wage,
            pace: self.pace,
            shooting: self.shooting,
            passing: self.passing,
            dribbling: self.dribbling,
            defending: self.defending,
            physicality: self.physicality,
        }
    }
}

/// Split the multi-valued `Positions` cell on the literal `", "` once, at
/// load time, so filtering never re-parses the string.
fn split_positions(raw: &str) -> Vec<String> {
    raw.split(POSITION_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accept a number, a numeric string, or nothing; anything else is null.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientF64;

    impl<'de> Visitor<'de> for LenientF64 {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number, a numeric string, or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.trim().parse::<f64>().ok())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(LenientF64)
        }
    }

    deserializer.deserialize_any(LenientF64)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<PlayerTable, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let mut players = Vec::new();
    for row in reader.deserialize::<RawPlayer>() {
        players.push(row?.into_player());
    }
    Ok(PlayerTable::from_players(players))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records orientation (the default `df.to_json(orient='records')`):
/// a top-level array of one object per player, keyed by column name.
fn load_json(path: &Path) -> Result<PlayerTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<RawPlayer> = serde_json::from_str(&text)?;
    Ok(PlayerTable::from_players(
        rows.into_iter().map(RawPlayer::into_player).collect(),
    ))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Flat scalar columns under the contract names.  Works with files written
/// by Pandas (`df.to_parquet()`) and by our own sample generator.
fn load_parquet(path: &Path) -> Result<PlayerTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut players = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let required = |name: &'static str| {
            schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn(name))
        };
        let name_idx = required("Name")?;
        let club_idx = required("Club")?;
        let nat_idx = required("Nationality")?;
        let pos_idx = required("Positions")?;
        let age_idx = required("Age")?;
        let overall_idx = required("Overall Rating")?;
        let potential_idx = required("Potential")?;
        let wage_idx = required("Wage(EUR)_Avg")?;
        let optional = |name: &str| schema.index_of(name).ok();
        let pace_idx = optional("Pace");
        let shooting_idx = optional("Shooting");
        let passing_idx = optional("Passing");
        let dribbling_idx = optional("Dribbling Rate");
        let defending_idx = optional("Defending.1");
        let physicality_idx = optional("Physicality");

        for row in 0..batch.num_rows() {
            let string_col = |idx: usize| string_at(batch.column(idx), row).unwrap_or_default();
            let numeric_col = |idx: Option<usize>| idx.and_then(|i| f64_at(batch.column(i), row));

            players.push(Player {
                name: string_col(name_idx),
                club: string_col(club_idx),
                nationality: string_col(nat_idx),
                positions: split_positions(&string_col(pos_idx)),
                age: numeric_col(Some(age_idx)),
                overall: numeric_col(Some(overall_idx)),
                potential: numeric_col(Some(potential_idx)),
                wage: numeric_col(Some(wage_idx)),
                pace: numeric_col(pace_idx),
                shooting: numeric_col(shooting_idx),
                passing: numeric_col(passing_idx),
                dribbling: numeric_col(dribbling_idx),
                defending: numeric_col(defending_idx),
                physicality: numeric_col(physicality_idx),
            });
        }
    }

    Ok(PlayerTable::from_players(players))
}

// -- Parquet / Arrow helpers --

/// Extract a string cell from a Utf8 or LargeUtf8 column.
fn string_at(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|a| a.value(row).to_string()),
        _ => None,
    }
}

/// Extract a numeric cell, widening ints and Float32 to `f64`.
fn f64_at(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        _ => None,
    }
}
