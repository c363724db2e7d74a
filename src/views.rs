use std::collections::BTreeSet;

use crate::data::model::{NumericColumn, Player};

// ---------------------------------------------------------------------------
// Chart-data derivations
// ---------------------------------------------------------------------------
//
// Every function here is a pure function of its input rows and recomputes
// from scratch on each call. Inputs are borrowed rows so the same operations
// apply to the filtered view or to the full table (the comparison, team and
// radar views intentionally bypass the filters).

/// How many players the ranking bar chart shows by default.
pub const DEFAULT_TOP_N: usize = 10;

/// Columns of the correlation heatmap, in display order.
pub const CORRELATION_COLUMNS: [NumericColumn; 4] = [
    NumericColumn::Age,
    NumericColumn::OverallRating,
    NumericColumn::Potential,
    NumericColumn::Wage,
];

/// Dimensions of the player-comparison parallel-coordinates chart.
pub const COMPARISON_COLUMNS: [NumericColumn; 4] = CORRELATION_COLUMNS;

/// Axes of the single-player radar chart, in drawing order.
pub const RADAR_COLUMNS: [NumericColumn; 6] = [
    NumericColumn::Pace,
    NumericColumn::Shooting,
    NumericColumn::Passing,
    NumericColumn::Dribbling,
    NumericColumn::Defending,
    NumericColumn::Physicality,
];

// ---------------------------------------------------------------------------
// Top-N ranking
// ---------------------------------------------------------------------------

/// The `n` rows with the largest `col` value, descending. The sort is
/// stable: equal values keep their source order. Rows with a null value for
/// `col` are dropped. Returns fewer than `n` rows when the input is smaller.
pub fn top_n<'a>(rows: &[&'a Player], col: NumericColumn, n: usize) -> Vec<&'a Player> {
    let mut ranked: Vec<&Player> = rows
        .iter()
        .copied()
        .filter(|p| col.value(p).is_some())
        .collect();
    ranked.sort_by(|a, b| {
        let av = col.value(a).unwrap_or(f64::NEG_INFINITY);
        let bv = col.value(b).unwrap_or(f64::NEG_INFINITY);
        bv.total_cmp(&av)
    });
    ranked.truncate(n);
    ranked
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Square symmetric matrix of pairwise Pearson coefficients.
///
/// A cell is `None` when the coefficient is undefined for that pair (fewer
/// than two usable rows, or zero variance on either side). Undefined never
/// degrades to a NaN presented as a real value.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericColumn>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Coefficient for the pair `(columns[i], columns[j])`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values[i][j]
    }

    /// Number of columns (the matrix is `size × size`).
    pub fn size(&self) -> usize {
        self.columns.len()
    }
}

/// Pairwise Pearson correlation over every pair of `columns`, each pair
/// computed over the rows where both attributes are non-null.
pub fn correlation_matrix(rows: &[&Player], columns: &[NumericColumn]) -> CorrelationMatrix {
    let values = columns
        .iter()
        .map(|&a| columns.iter().map(|&b| pearson(rows, a, b)).collect())
        .collect();
    CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    }
}

fn pearson(rows: &[&Player], a: NumericColumn, b: NumericColumn) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = rows
        .iter()
        .filter_map(|p| Some((a.value(p)?, b.value(p)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|&(x, _)| x).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|&(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for &(x, y) in &pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a <= 0.0 || var_b <= 0.0 {
        return None;
    }
    Some(cov / (var_a.sqrt() * var_b.sqrt()))
}

// ---------------------------------------------------------------------------
// Radar attribute vector
// ---------------------------------------------------------------------------

/// The player's values for `columns` in order, with `0.0` substituted for
/// any attribute the player is missing.
pub fn attribute_vector(player: &Player, columns: &[NumericColumn]) -> Vec<f64> {
    columns.iter().map(|&c| c.value(player).unwrap_or(0.0)).collect()
}

/// Axis labels matching [`RADAR_COLUMNS`].
pub fn radar_labels() -> Vec<&'static str> {
    RADAR_COLUMNS.iter().map(|c| c.display_label()).collect()
}

// ---------------------------------------------------------------------------
// Subsets
// ---------------------------------------------------------------------------

/// All rows belonging to `club`, in source order. Empty is a valid result.
pub fn team_roster<'a>(rows: &[&'a Player], club: &str) -> Vec<&'a Player> {
    rows.iter().copied().filter(|p| p.club == club).collect()
}

/// All rows whose name is in `names`, in source order. Duplicate names are
/// all kept, never deduplicated. An empty selection yields an empty result
/// (the comparison chart simply isn't drawn), unlike an empty filter set
/// which means "no constraint".
pub fn players_named<'a>(rows: &[&'a Player], names: &BTreeSet<String>) -> Vec<&'a Player> {
    rows.iter().copied().filter(|p| names.contains(&p.name)).collect()
}

/// First row with the given name, in source order. Duplicate names resolve
/// to the earliest row.
pub fn player_by_name<'a>(rows: &[&'a Player], name: &str) -> Option<&'a Player> {
    rows.iter().copied().find(|p| p.name == name)
}
