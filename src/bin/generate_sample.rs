use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `[lo, hi]`.
    fn range_i64(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as i64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct SampleRow {
    name: String,
    club: &'static str,
    nationality: &'static str,
    positions: String,
    age: i64,
    overall: i64,
    potential: i64,
    wage: f64,
    // Skills are absent for goalkeepers, so the sample exercises null cells.
    skills: Option<[i64; 6]>,
}

const CLUBS: [&str; 8] = [
    "Riverton FC",
    "Atletico Norte",
    "Harbour United",
    "Steelworks SC",
    "Olympia Vale",
    "Dynamo Pasco",
    "Red Cliff Rovers",
    "Casterly Town",
];

const NATIONALITIES: [&str; 10] = [
    "Brazil", "France", "Germany", "Spain", "England", "Argentina", "Portugal", "Netherlands",
    "Italy", "Japan",
];

const FIRST_NAMES: [&str; 12] = [
    "Luca", "Mateo", "Jonas", "Theo", "Rafael", "Marco", "Kai", "Diego", "Felix", "Andre",
    "Pablo", "Victor",
];

const LAST_NAMES: [&str; 12] = [
    "Silva", "Moreau", "Keller", "Vargas", "Okafor", "Tanaka", "Rossi", "Jansen", "Costa",
    "Weber", "Fontaine", "Iglesias",
];

const OUTFIELD_POSITIONS: [&str; 9] = ["ST", "CF", "LW", "RW", "CAM", "CM", "CDM", "LB", "RB"];

fn generate_row(rng: &mut SimpleRng) -> SampleRow {
    let first = rng.pick(&FIRST_NAMES);
    let last = rng.pick(&LAST_NAMES);
    // Small name pools collide on purpose: duplicate names exist in real
    // datasets and the selection views must cope with them.
    let name = format!("{first} {last}");

    let is_keeper = rng.next_f64() < 0.08;
    let positions = if is_keeper {
        "GK".to_string()
    } else {
        let primary = *rng.pick(&OUTFIELD_POSITIONS);
        if rng.next_f64() < 0.4 {
            let mut secondary = *rng.pick(&OUTFIELD_POSITIONS);
            while secondary == primary {
                secondary = *rng.pick(&OUTFIELD_POSITIONS);
            }
            format!("{primary}, {secondary}")
        } else {
            primary.to_string()
        }
    };

    let age = rng.range_i64(16, 39);
    let overall = rng.gauss(70.0, 8.0).clamp(45.0, 94.0).round() as i64;
    let potential = (overall + rng.range_i64(0, 15)).min(99);
    let wage = (overall as f64 - 44.0) * 1500.0 * (0.6 + rng.next_f64());

    let skills = (!is_keeper).then(|| {
        let mut out = [0i64; 6];
        for slot in &mut out {
            *slot = rng.gauss(overall as f64, 6.0).clamp(20.0, 99.0).round() as i64;
        }
        out
    });

    SampleRow {
        name,
        club: *rng.pick(&CLUBS),
        nationality: *rng.pick(&NATIONALITIES),
        positions,
        age,
        overall,
        potential,
        wage,
        skills,
    }
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record([
        "Name",
        "Club",
        "Nationality",
        "Positions",
        "Age",
        "Overall Rating",
        "Potential",
        "Wage(EUR)_Avg",
        "Pace",
        "Shooting",
        "Passing",
        "Dribbling Rate",
        "Defending.1",
        "Physicality",
    ])?;

    for row in rows {
        let skill = |i: usize| {
            row.skills
                .map(|s| s[i].to_string())
                .unwrap_or_default()
        };
        writer.write_record([
            row.name.clone(),
            row.club.to_string(),
            row.nationality.to_string(),
            row.positions.clone(),
            row.age.to_string(),
            row.overall.to_string(),
            row.potential.to_string(),
            format!("{:.2}", row.wage),
            skill(0),
            skill(1),
            skill(2),
            skill(3),
            skill(4),
            skill(5),
        ])?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &str) -> Result<()> {
    let strings = |f: &dyn Fn(&SampleRow) -> String| {
        StringArray::from(rows.iter().map(f).collect::<Vec<_>>())
    };
    let ints = |f: &dyn Fn(&SampleRow) -> i64| {
        Int64Array::from(rows.iter().map(f).collect::<Vec<_>>())
    };
    let skill_col = |i: usize| {
        Int64Array::from(
            rows.iter()
                .map(|r| r.skills.map(|s| s[i]))
                .collect::<Vec<Option<i64>>>(),
        )
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Name", DataType::Utf8, false),
        Field::new("Club", DataType::Utf8, false),
        Field::new("Nationality", DataType::Utf8, false),
        Field::new("Positions", DataType::Utf8, false),
        Field::new("Age", DataType::Int64, false),
        Field::new("Overall Rating", DataType::Int64, false),
        Field::new("Potential", DataType::Int64, false),
        Field::new("Wage(EUR)_Avg", DataType::Float64, false),
        Field::new("Pace", DataType::Int64, true),
        Field::new("Shooting", DataType::Int64, true),
        Field::new("Passing", DataType::Int64, true),
        Field::new("Dribbling Rate", DataType::Int64, true),
        Field::new("Defending.1", DataType::Int64, true),
        Field::new("Physicality", DataType::Int64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(strings(&|r| r.name.clone())),
            Arc::new(strings(&|r| r.club.to_string())),
            Arc::new(strings(&|r| r.nationality.to_string())),
            Arc::new(strings(&|r| r.positions.clone())),
            Arc::new(ints(&|r| r.age)),
            Arc::new(ints(&|r| r.overall)),
            Arc::new(ints(&|r| r.potential)),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.wage).collect::<Vec<_>>(),
            )),
            Arc::new(skill_col(0)),
            Arc::new(skill_col(1)),
            Arc::new(skill_col(2)),
            Arc::new(skill_col(3)),
            Arc::new(skill_col(4)),
            Arc::new(skill_col(5)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let rows: Vec<SampleRow> = (0..400).map(|_| generate_row(&mut rng)).collect();

    write_csv(&rows, "sample_players.csv")?;
    write_parquet(&rows, "sample_players.parquet")?;

    println!(
        "Wrote {} players to sample_players.csv and sample_players.parquet",
        rows.len()
    );
    Ok(())
}
