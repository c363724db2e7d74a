use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names – the external file contract
// ---------------------------------------------------------------------------

/// Delimiter between tokens of the multi-valued `Positions` column.
/// Literal ", " – part of the source-file contract, not configurable.
pub const POSITION_DELIMITER: &str = ", ";

/// Every numeric attribute the dashboard can rank, correlate or range-filter.
///
/// The enum is the single place where attribute names are spelled; ranges,
/// rankings, correlation and radar vectors all address columns through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    Age,
    OverallRating,
    Potential,
    Wage,
    Pace,
    Shooting,
    Passing,
    Dribbling,
    Defending,
    Physicality,
}

impl NumericColumn {
    /// Exact column header in the source file. These labels (including the
    /// odd `Defending.1` and `Wage(EUR)_Avg`) must match existing datasets.
    pub fn source_label(self) -> &'static str {
        match self {
            NumericColumn::Age => "Age",
            NumericColumn::OverallRating => "Overall Rating",
            NumericColumn::Potential => "Potential",
            NumericColumn::Wage => "Wage(EUR)_Avg",
            NumericColumn::Pace => "Pace",
            NumericColumn::Shooting => "Shooting",
            NumericColumn::Passing => "Passing",
            NumericColumn::Dribbling => "Dribbling Rate",
            NumericColumn::Defending => "Defending.1",
            NumericColumn::Physicality => "Physicality",
        }
    }

    /// Human-readable label for axis titles and legends.
    pub fn display_label(self) -> &'static str {
        match self {
            NumericColumn::Age => "Age",
            NumericColumn::OverallRating => "Overall Rating",
            NumericColumn::Potential => "Potential",
            NumericColumn::Wage => "Wage (EUR)",
            NumericColumn::Pace => "Pace",
            NumericColumn::Shooting => "Shooting",
            NumericColumn::Passing => "Passing",
            NumericColumn::Dribbling => "Dribbling",
            NumericColumn::Defending => "Defending",
            NumericColumn::Physicality => "Physicality",
        }
    }

    /// Read this attribute off a player. `None` when the source cell was
    /// blank or the column absent from the file.
    pub fn value(self, player: &Player) -> Option<f64> {
        match self {
            NumericColumn::Age => player.age,
            NumericColumn::OverallRating => player.overall,
            NumericColumn::Potential => player.potential,
            NumericColumn::Wage => player.wage,
            NumericColumn::Pace => player.pace,
            NumericColumn::Shooting => player.shooting,
            NumericColumn::Passing => player.passing,
            NumericColumn::Dribbling => player.dribbling,
            NumericColumn::Defending => player.defending,
            NumericColumn::Physicality => player.physicality,
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

// ---------------------------------------------------------------------------
// Player – one row of the source table
// ---------------------------------------------------------------------------

/// A single player (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Display name. Not guaranteed unique across the table.
    pub name: String,
    pub club: String,
    pub nationality: String,
    /// Position tokens, parsed once at load time from the `", "`-delimited
    /// source string (e.g. `"ST, CF"` → `["ST", "CF"]`).
    pub positions: Vec<String>,
    pub age: Option<f64>,
    pub overall: Option<f64>,
    pub potential: Option<f64>,
    /// Average wage in EUR.
    pub wage: Option<f64>,
    pub pace: Option<f64>,
    pub shooting: Option<f64>,
    pub passing: Option<f64>,
    pub dribbling: Option<f64>,
    pub defending: Option<f64>,
    pub physicality: Option<f64>,
}

impl Player {
    /// Whether the player's position set contains the given token.
    pub fn plays(&self, token: &str) -> bool {
        self.positions.iter().any(|p| p == token)
    }
}

// ---------------------------------------------------------------------------
// PlayerTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table, immutable after load, with the unique-value sets
/// the sidebar widgets are populated from.
#[derive(Debug, Clone)]
pub struct PlayerTable {
    /// All players in source-file order.
    pub players: Vec<Player>,
    /// Sorted unique club names.
    pub clubs: BTreeSet<String>,
    /// Sorted unique nationalities.
    pub nationalities: BTreeSet<String>,
    /// Sorted unique position tokens (the `Positions` column, exploded).
    pub position_tokens: BTreeSet<String>,
}

impl PlayerTable {
    /// Build the unique-value indices from the loaded rows.
    pub fn from_players(players: Vec<Player>) -> Self {
        let mut clubs = BTreeSet::new();
        let mut nationalities = BTreeSet::new();
        let mut position_tokens = BTreeSet::new();

        for p in &players {
            clubs.insert(p.club.clone());
            nationalities.insert(p.nationality.clone());
            for token in &p.positions {
                position_tokens.insert(token.clone());
            }
        }

        PlayerTable {
            players,
            clubs,
            nationalities,
            position_tokens,
        }
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Borrow the rows at the given indices, in the given order.
    pub fn select(&self, indices: &[usize]) -> Vec<&Player> {
        indices.iter().map(|&i| &self.players[i]).collect()
    }

    /// Borrow every row, in source order.
    pub fn rows(&self) -> Vec<&Player> {
        self.players.iter().collect()
    }

    /// Integer bounds for a range slider over `col`: `(trunc(min), trunc(max))`
    /// over non-null values. `None` when no row carries the attribute.
    ///
    /// Only the presented bounds are truncated; range filtering always
    /// compares against the stored `f64` values.
    pub fn slider_bounds(&self, col: NumericColumn) -> Option<(i64, i64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut seen = false;
        for p in &self.players {
            if let Some(v) = col.value(p) {
                min = min.min(v);
                max = max.max(v);
                seen = true;
            }
        }
        seen.then(|| (min.trunc() as i64, max.trunc() as i64))
    }
}
