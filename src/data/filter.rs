use std::collections::BTreeSet;

use super::model::{Player, PlayerTable};

// ---------------------------------------------------------------------------
// Constraint set: what the sidebar widgets currently select
// ---------------------------------------------------------------------------

/// A closed numeric interval, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter {
    pub lo: f64,
    pub hi: f64,
}

impl RangeFilter {
    pub fn new(lo: f64, hi: f64) -> Self {
        RangeFilter { lo, hi }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }
}

/// The complete constraint set, rebuilt wholesale on every interaction.
///
/// An empty membership set or a `None` range means "no constraint" – the
/// untouched widget shows everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    /// Clubs the player may belong to.
    pub clubs: BTreeSet<String>,
    /// Allowed nationalities.
    pub nationalities: BTreeSet<String>,
    /// Position tokens; a player passes when any of their parsed positions
    /// is in this set (set intersection, not equality on the raw string).
    pub positions: BTreeSet<String>,
    pub age: Option<RangeFilter>,
    pub overall: Option<RangeFilter>,
    pub wage: Option<RangeFilter>,
}

impl Filters {
    /// Whether every constraint is inactive (the result equals the full table).
    pub fn is_inactive(&self) -> bool {
        self.clubs.is_empty()
            && self.nationalities.is_empty()
            && self.positions.is_empty()
            && self.age.is_none()
            && self.overall.is_none()
            && self.wage.is_none()
    }

    /// Conjunction of every active constraint. Constraints are independent;
    /// evaluation order does not affect the outcome.
    ///
    /// A player with a null value for a range-constrained attribute fails
    /// that constraint (excluded, not an error).
    pub fn matches(&self, player: &Player) -> bool {
        if !(self.clubs.is_empty() || self.clubs.contains(&player.club)) {
            return false;
        }
        if !(self.nationalities.is_empty() || self.nationalities.contains(&player.nationality)) {
            return false;
        }
        if !(self.positions.is_empty()
            || player.positions.iter().any(|t| self.positions.contains(t)))
        {
            return false;
        }
        passes_range(self.age, player.age)
            && passes_range(self.overall, player.overall)
            && passes_range(self.wage, player.wage)
    }
}

fn passes_range(range: Option<RangeFilter>, value: Option<f64>) -> bool {
    match range {
        None => true,
        Some(r) => value.is_some_and(|v| r.contains(v)),
    }
}

// ---------------------------------------------------------------------------
// Filter application
// ---------------------------------------------------------------------------

/// Return indices of players that pass all active constraints, preserving
/// source row order (stable filter, never a re-sort). An empty result is a
/// legitimate outcome, not an error.
pub fn filtered_indices(table: &PlayerTable, filters: &Filters) -> Vec<usize> {
    let indices: Vec<usize> = table
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| filters.matches(p))
        .map(|(i, _)| i)
        .collect();

    log::debug!(
        "{} of {} players pass the current filters",
        indices.len(),
        table.len()
    );
    indices
}
