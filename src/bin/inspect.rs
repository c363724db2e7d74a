use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use pitchside::data::loader::load_file;
use pitchside::data::model::NumericColumn;
use pitchside::state::DashboardState;

/// Load a dataset and print what the dashboard would derive from it with no
/// filters active. A quick end-to-end check of loader → filter → views.
fn main() -> Result<()> {
    env_logger::init();

    let path: PathBuf = match std::env::args().nth(1) {
        Some(arg) => arg.into(),
        None => bail!("usage: inspect <players.csv|.json|.parquet>"),
    };

    let table = load_file(&path).with_context(|| format!("loading {}", path.display()))?;

    let mut state = DashboardState::default();
    state.set_dataset(table);
    let table = state.dataset.as_ref().expect("dataset was just set");

    println!("{} players, {} visible", table.len(), state.visible_indices.len());
    println!(
        "{} clubs, {} nationalities, {} position tokens",
        table.clubs.len(),
        table.nationalities.len(),
        table.position_tokens.len()
    );

    for col in [
        NumericColumn::Age,
        NumericColumn::OverallRating,
        NumericColumn::Wage,
    ] {
        match table.slider_bounds(col) {
            Some((lo, hi)) => println!("{col}: {lo}..={hi}"),
            None => println!("{col}: no values"),
        }
    }

    println!("\nTop players by overall rating:");
    for p in state.top_players() {
        println!(
            "  {:<24} {:<18} {}",
            p.name,
            p.club,
            p.overall.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
        );
    }

    println!("\nCorrelation matrix:");
    let matrix = state.correlation();
    print!("{:>16}", "");
    for col in &matrix.columns {
        print!(" {:>16}", col.display_label());
    }
    println!();
    for (i, col) in matrix.columns.iter().enumerate() {
        print!("{:>16}", col.display_label());
        for j in 0..matrix.size() {
            match matrix.get(i, j) {
                Some(r) => print!(" {r:>16.3}"),
                None => print!(" {:>16}", "n/a"),
            }
        }
        println!();
    }

    Ok(())
}
