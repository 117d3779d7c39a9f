use std::collections::BTreeSet;

use crate::config::FlagConfig;
use crate::data::aggregate::aggregate_all;
use crate::data::model::Dataset;
use crate::data::schema::columns;

/// Detonation reasons with fewer records than this are left out of the
/// multi-select options (COMBAT is always kept regardless).
const SIGNIFICANT_REASON_MIN: usize = 10;

// ---------------------------------------------------------------------------
// Tab and map-mode selectors
// ---------------------------------------------------------------------------

/// The seven dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    DataDictionary,
    FilterByYear,
    Map,
    WeaponSource,
    DetonationReasons,
    ExplosionStatistics,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Main Page",
            Tab::DataDictionary => "Data Dictionary",
            Tab::FilterByYear => "Filter by Year",
            Tab::Map => "Map",
            Tab::WeaponSource => "Weapon Source",
            Tab::DetonationReasons => "Detonation Reasons",
            Tab::ExplosionStatistics => "Explosion Statistics",
        }
    }
}

/// How the global map renders detonation sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapMode {
    #[default]
    None,
    Simple,
    Scatter,
    Annotated,
}

impl MapMode {
    pub const ALL: [MapMode; 4] = [
        MapMode::None,
        MapMode::Simple,
        MapMode::Scatter,
        MapMode::Annotated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MapMode::None => "(none)",
            MapMode::Simple => "Simple",
            MapMode::Scatter => "Scatterplot",
            MapMode::Annotated => "Custom Tooltip",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Widget parameters live here;
/// the derived views they select are recomputed from the dataset snapshot on
/// every frame, never cached across parameter changes.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// Active dashboard tab.
    pub active_tab: Tab,

    /// Inclusive year range selected on the Filter-by-Year tab.
    pub year_range: (i64, i64),
    /// Year slider bounds, from the dataset's Year min/max.
    pub year_bounds: (i64, i64),

    /// Map rendering mode.
    pub map_mode: MapMode,

    /// Detonation reasons offered in the multi-select (significant ones).
    pub reason_options: Vec<String>,
    /// Currently selected detonation reasons.
    pub selected_reasons: BTreeSet<String>,

    /// Exclusive yield threshold (kilotons) on the statistics tab.
    pub yield_threshold: f64,
    /// Threshold slider bounds, from Explosion Yield Lower min/max.
    pub yield_bounds: (f64, f64),

    /// Country → flag URL mapping for the annotated map.
    pub flags: FlagConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            active_tab: Tab::Overview,
            year_range: (1945, 1998),
            year_bounds: (1945, 1998),
            map_mode: MapMode::default(),
            reason_options: Vec::new(),
            selected_reasons: BTreeSet::new(),
            yield_threshold: 1000.0,
            yield_bounds: (0.0, 1000.0),
            flags: FlagConfig::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: derive slider bounds and the
    /// significant-reason options, reset the selections to their defaults.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let (year_min, year_max) = dataset
            .numeric_range(columns::YEAR)
            .map(|(lo, hi)| (lo as i64, hi as i64))
            .unwrap_or((1945, 1998));
        self.year_bounds = (year_min, year_max);
        self.year_range = (year_min.max(1945).min(year_max), year_max.min(1998).max(year_min));

        self.yield_bounds = dataset
            .numeric_range(columns::YIELD_LOWER)
            .unwrap_or((0.0, 1000.0));
        self.yield_threshold = self.yield_threshold.clamp(self.yield_bounds.0, self.yield_bounds.1);

        self.reason_options = significant_reasons(&dataset);
        self.selected_reasons = self.reason_options.iter().cloned().collect();

        let countries: Vec<&str> = dataset
            .unique_values
            .get(columns::SOURCE_COUNTRY)
            .map(|vals| vals.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();
        for country in self.flags.unmapped(countries.into_iter()) {
            log::warn!("No flag mapping for source country '{country}'");
        }

        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Toggle one detonation reason in the multi-select.
    pub fn toggle_reason(&mut self, reason: &str) {
        if !self.selected_reasons.remove(reason) {
            self.selected_reasons.insert(reason.to_string());
        }
    }
}

/// Reasons with at least [`SIGNIFICANT_REASON_MIN`] records, in descending
/// count order. COMBAT is appended even when rare: the two wartime uses
/// always belong in the picture.
fn significant_reasons(dataset: &Dataset) -> Vec<String> {
    let rows = aggregate_all(dataset, columns::DETONATION_REASON, false, None);
    let mut reasons: Vec<String> = rows
        .iter()
        .filter(|r| r.count >= SIGNIFICANT_REASON_MIN)
        .map(|r| r.label.clone())
        .collect();
    if let Some(combat) = rows
        .iter()
        .map(|r| r.label.as_str())
        .find(|l| l.eq_ignore_ascii_case("combat"))
    {
        if !reasons.iter().any(|r| r == combat) {
            reasons.push(combat.to_string());
        }
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};
    use std::collections::BTreeMap;

    fn reason_dataset(reasons: &[(&str, usize)]) -> Dataset {
        let mut records = Vec::new();
        for (reason, n) in reasons {
            for _ in 0..*n {
                let mut fields = BTreeMap::new();
                fields.insert(
                    columns::DETONATION_REASON.to_string(),
                    CellValue::String(reason.to_string()),
                );
                fields.insert(columns::YEAR.to_string(), CellValue::Integer(1960));
                records.push(Record { fields });
            }
        }
        Dataset::new(
            records,
            vec![
                columns::DETONATION_REASON.to_string(),
                columns::YEAR.to_string(),
            ],
        )
    }

    #[test]
    fn rare_reasons_are_dropped_but_combat_survives() {
        let ds = reason_dataset(&[("Wr", 50), ("Pne", 12), ("Plo", 3), ("Combat", 2)]);
        let reasons = significant_reasons(&ds);
        assert_eq!(reasons, vec!["Wr", "Pne", "Combat"]);
    }

    #[test]
    fn views_recompute_from_the_borrowed_snapshot() {
        use crate::data::aggregate::integer_counts;
        use crate::data::filter::{multi_select_indices, range_indices};

        let mut state = AppState::default();
        state.set_dataset(reason_dataset(&[("Wr", 15), ("Combat", 2)]));

        // Widget phase: selection fields change while the snapshot stays put.
        state.year_range = (1950, 1970);
        state.toggle_reason("Combat");

        // Render phase: every pipeline call borrows the snapshot, no copy.
        let ds = state.dataset.as_ref().unwrap();
        let (lo, hi) = state.year_range;
        let in_range = range_indices(ds, columns::YEAR, lo as f64, hi as f64);
        assert_eq!(in_range.len(), 17);
        assert_eq!(integer_counts(ds, &in_range, columns::YEAR), vec![(1960, 17)]);

        let picked = multi_select_indices(ds, columns::DETONATION_REASON, &state.selected_reasons);
        assert_eq!(picked.len(), 15); // Combat deselected, Wr remains

        // The snapshot itself is untouched by the whole exchange.
        assert_eq!(state.dataset.as_ref().unwrap().len(), 17);
    }

    #[test]
    fn set_dataset_initialises_bounds_and_selection() {
        let ds = reason_dataset(&[("Wr", 20)]);
        let mut state = AppState::default();
        state.set_dataset(ds);
        assert_eq!(state.year_bounds, (1960, 1960));
        assert_eq!(state.year_range, (1960, 1960));
        assert!(state.selected_reasons.contains("Wr"));
    }
}
