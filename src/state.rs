use std::collections::BTreeSet;

use crate::data::filter::{filtered_indices, Filters, RangeFilter};
use crate::data::model::{NumericColumn, Player, PlayerTable};
use crate::views::{
    self, CorrelationMatrix, COMPARISON_COLUMNS, CORRELATION_COLUMNS, DEFAULT_TOP_N,
    RADAR_COLUMNS,
};

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// One instance of this is what an embedding UI owns. Every interaction
/// mutates it and triggers one full recomputation pass; there is no caching
/// beyond `visible_indices`, and every view accessor derives its data fresh
/// from the immutable table.
#[derive(Default)]
pub struct DashboardState {
    /// Loaded table (None until a file is loaded).
    pub dataset: Option<PlayerTable>,

    /// The current constraint set.
    pub filters: Filters,

    /// Indices of players passing the current filters.
    pub visible_indices: Vec<usize>,

    /// Players picked for the comparison view. Bypasses the filters.
    pub compare_names: BTreeSet<String>,

    /// Club picked for the team-analysis view. Bypasses the filters.
    pub selected_team: Option<String>,

    /// Player picked for the radar view. Bypasses the filters.
    pub radar_player: Option<String>,

    /// Status / error message shown by the UI.
    pub status_message: Option<String>,
}

impl DashboardState {
    /// Ingest a newly loaded table and reset every selection.
    pub fn set_dataset(&mut self, dataset: PlayerTable) {
        self.filters = Filters::default();
        self.visible_indices = (0..dataset.len()).collect();
        self.compare_names.clear();
        self.selected_team = None;
        self.radar_player = None;
        self.status_message = None;
        self.dataset = Some(dataset);
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.dataset {
            self.visible_indices = filtered_indices(table, &self.filters);
        }
    }

    // ---- filter mutators ----

    /// Toggle one club in the club multiselect.
    pub fn toggle_club(&mut self, club: &str) {
        toggle(&mut self.filters.clubs, club);
        self.refilter();
    }

    /// Toggle one nationality in the nationality multiselect.
    pub fn toggle_nationality(&mut self, nationality: &str) {
        toggle(&mut self.filters.nationalities, nationality);
        self.refilter();
    }

    /// Toggle one position token in the position multiselect.
    pub fn toggle_position(&mut self, token: &str) {
        toggle(&mut self.filters.positions, token);
        self.refilter();
    }

    pub fn set_age_range(&mut self, range: Option<RangeFilter>) {
        self.filters.age = range;
        self.refilter();
    }

    pub fn set_overall_range(&mut self, range: Option<RangeFilter>) {
        self.filters.overall = range;
        self.refilter();
    }

    pub fn set_wage_range(&mut self, range: Option<RangeFilter>) {
        self.filters.wage = range;
        self.refilter();
    }

    /// Drop every constraint, making the whole table visible again.
    pub fn clear_filters(&mut self) {
        self.filters = Filters::default();
        self.refilter();
    }

    // ---- view accessors ----

    /// The filtered table, in source order.
    pub fn visible_players(&self) -> Vec<&Player> {
        match &self.dataset {
            Some(table) => table.select(&self.visible_indices),
            None => Vec::new(),
        }
    }

    /// Top players by overall rating, from the filtered table.
    pub fn top_players(&self) -> Vec<&Player> {
        views::top_n(
            &self.visible_players(),
            NumericColumn::OverallRating,
            DEFAULT_TOP_N,
        )
    }

    /// Correlation heatmap data, from the filtered table.
    pub fn correlation(&self) -> CorrelationMatrix {
        views::correlation_matrix(&self.visible_players(), &CORRELATION_COLUMNS)
    }

    /// Rows for the comparison view. Selected from the full table, so a
    /// compared player never vanishes because of an unrelated filter.
    /// Empty selection ⇒ empty result (the chart is simply not drawn).
    pub fn comparison_players(&self) -> Vec<&Player> {
        match &self.dataset {
            Some(table) => views::players_named(&table.rows(), &self.compare_names),
            None => Vec::new(),
        }
    }

    /// Dimensions the comparison chart plots.
    pub fn comparison_columns(&self) -> &'static [NumericColumn] {
        &COMPARISON_COLUMNS
    }

    /// Roster of the selected team, from the full table.
    pub fn team_players(&self) -> Vec<&Player> {
        match (&self.dataset, &self.selected_team) {
            (Some(table), Some(club)) => views::team_roster(&table.rows(), club),
            _ => Vec::new(),
        }
    }

    /// Radar vector for the selected player, from the full table. Duplicate
    /// names resolve to the first row in source order.
    pub fn radar_vector(&self) -> Option<Vec<f64>> {
        let table = self.dataset.as_ref()?;
        let name = self.radar_player.as_deref()?;
        let player = views::player_by_name(&table.rows(), name)?;
        Some(views::attribute_vector(player, &RADAR_COLUMNS))
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
