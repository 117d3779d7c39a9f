use eframe::egui::{self, RichText, ScrollArea, Slider, Ui};

use crate::color::CategoryColors;
use crate::data::aggregate::{MergeRule, aggregate_all, aggregate_by, integer_counts};
use crate::data::filter::{multi_select_indices, range_indices};
use crate::data::geo::{above_threshold, project};
use crate::data::model::Dataset;
use crate::data::schema::columns;
use crate::state::{AppState, MapMode};
use crate::ui::{charts, map, table};

/// Minor contributors folded into one slice on the Weapon Source view.
const OTHER_COUNTRIES: [&str; 4] = ["china", "india", "pakist", "uk"];
const OTHER_COUNTRIES_LABEL: &str = "Other Countries";

/// Per-column descriptions for the Data Dictionary view.
const COLUMN_DESCRIPTIONS: &[(&str, &str)] = &[
    (columns::SOURCE, "Source that reported the explosion event."),
    (columns::SOURCE_COUNTRY, "Country deploying the nuclear device."),
    (columns::DEPLOYMENT_LOCATION, "Region where the nuclear device was deployed."),
    (columns::LATITUDE, "Latitude position."),
    (columns::LONGITUDE, "Longitude position."),
    (
        columns::DEPTH,
        "Depth at detonation in km. Positive = below ground, negative = above ground.",
    ),
    (columns::BODY_WAVE_MAGNITUDE, "Body wave magnitude of explosion (mb)."),
    (columns::SURFACE_WAVE_MAGNITUDE, "Surface wave magnitude of explosion (Ms)."),
    (columns::YIELD_LOWER, "Explosion yield lower estimate in kilotons of TNT."),
    (columns::YIELD_UPPER, "Explosion yield upper estimate in kilotons of TNT."),
    (
        columns::DETONATION_REASON,
        "Purpose of detonation (e.g., COMBAT, FMS, PNE).",
    ),
    (columns::NAME, "Name of the event or bomb."),
    (
        columns::DETONATION_METHOD,
        "Type/method of deployment (e.g., Tower, Atmospheric).",
    ),
    (columns::DAY, "Day of detonation."),
    (columns::MONTH, "Month of detonation."),
    (columns::YEAR, "Year of detonation."),
];

const NO_DATASET_MSG: &str =
    "No dataset loaded. Use File → Open to load the detonation records.";

/// Shown when a tab needs data but none is loaded.
fn require_dataset<'a>(ui: &mut Ui, state: &'a AppState) -> Option<&'a Dataset> {
    match &state.dataset {
        Some(ds) => Some(ds),
        None => {
            ui.label(NO_DATASET_MSG);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Main Page
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🌍 Nuclear Bomb Detonations Explorer");
    ui.label(
        "An interactive view of nuclear bomb detonations worldwide before the year 2000: \
         locations, yields, source countries, and purposes.",
    );
    ui.separator();

    ui.horizontal(|ui| {
        let bomb = egui::include_image!("../../assets/bomb.png");
        ui.add(
            egui::Image::new(bomb)
                .max_width(220.0)
                .max_height(220.0)
                .rounding(4.0),
        );
        ui.vertical(|ui| {
            if let Some(ds) = &state.dataset {
                ui.label(RichText::new(format!("{}", ds.len())).size(36.0).strong());
                ui.label("Total Nuclear Bombs Detonated");
            } else {
                ui.label("No dataset loaded yet.");
            }
            ui.add_space(8.0);
            ui.label("Explore the data through:");
            ui.label("• Visualizations of global detonation locations");
            ui.label("• Filterable statistics by year, source, and purpose");
            ui.label("• In-depth analysis of explosion yields and magnitudes");
        });
    });

    ui.separator();
    ui.strong("Explore the Tabs");
    ui.label("• Main Page: overview of the site and dataset.");
    ui.label("• Data Dictionary: detailed breakdown of the dataset fields.");
    ui.label("• Filter by Year: view nuclear detonations from specific years.");
    ui.label("• Map: a global view of detonation locations.");
    ui.label("• Weapon Source: analyze detonations by source countries.");
    ui.label("• Detonation Reasons: explore the purposes behind the detonations.");
    ui.label("• Explosion Statistics: insights into yields, counts, and patterns.");
}

// ---------------------------------------------------------------------------
// Data Dictionary
// ---------------------------------------------------------------------------

pub fn data_dictionary(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📚 Data Dictionary");
    ui.label("Each column of the normalized dataset, and what it means:");
    ui.add_space(4.0);

    ScrollArea::vertical().id_salt("dictionary").show(ui, |ui| {
        for (col, desc) in COLUMN_DESCRIPTIONS {
            ui.horizontal_wrapped(|ui| {
                ui.strong(format!("{col}:"));
                ui.label(*desc);
            });
        }

        ui.separator();
        ui.strong("Cleaned Dataset Preview");
        if let Some(ds) = require_dataset(ui, state) {
            let all: Vec<usize> = (0..ds.len()).collect();
            table::record_table(ui, "dictionary_table", ds, &all, 360.0);
        }
    });
}

// ---------------------------------------------------------------------------
// Filter by Year
// ---------------------------------------------------------------------------

pub fn filter_by_year(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📊 Filter by Year");
    ui.label(
        "Select a range of years; the bar chart shows the number of detonations \
         in each year within the range.",
    );

    if state.dataset.is_none() {
        ui.label(NO_DATASET_MSG);
        return;
    }

    // Widgets first, pipeline second: the sliders only touch the selection
    // fields, so the snapshot borrow below never overlaps a mutation.
    let (min_year, max_year) = state.year_bounds;
    ui.horizontal(|ui| {
        ui.label("From:");
        ui.add(Slider::new(&mut state.year_range.0, min_year..=max_year));
        ui.label("To:");
        ui.add(Slider::new(&mut state.year_range.1, min_year..=max_year));
    });

    let (lo, hi) = state.year_range;
    let Some(ds) = &state.dataset else {
        return;
    };
    let indices = range_indices(ds, columns::YEAR, lo as f64, hi as f64);
    let counts = integer_counts(ds, &indices, columns::YEAR);

    if counts.is_empty() {
        ui.label(
            RichText::new("No data available for the selected range. Please adjust the slider.")
                .color(egui::Color32::YELLOW),
        );
        return;
    }

    charts::year_bar_chart(ui, &counts, (lo, hi));

    ui.separator();
    ui.strong("Data Summary");
    ScrollArea::vertical()
        .id_salt("year_summary")
        .max_height(160.0)
        .show(ui, |ui| {
            egui::Grid::new("year_counts").striped(true).show(ui, |ui| {
                ui.strong("Year");
                ui.strong("Detonations");
                ui.end_row();
                for (year, count) in &counts {
                    ui.label(year.to_string());
                    ui.label(count.to_string());
                    ui.end_row();
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

pub fn global_map(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🌍 Global Map of Nuclear Detonations");
    ui.label("Select a map type to explore detonation locations worldwide:");

    ui.horizontal(|ui| {
        for mode in MapMode::ALL {
            ui.radio_value(&mut state.map_mode, mode, mode.label());
        }
    });

    let Some(ds) = &state.dataset else {
        ui.label(NO_DATASET_MSG);
        return;
    };

    let all: Vec<usize> = (0..ds.len()).collect();
    let geo = project(ds, &all, columns::LATITUDE, columns::LONGITUDE);

    if state.map_mode == MapMode::None {
        ui.label("Pick a map mode above to render the detonation sites.");
        return;
    }
    map::detonation_map(ui, state, ds, &geo);
}

// ---------------------------------------------------------------------------
// Weapon Source
// ---------------------------------------------------------------------------

pub fn weapon_source(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔎 Weapon Source Analysis");
    ui.label(
        "Share of detonations by source country. Smaller contributors \
         (China, India, Pakistan, and UK) are combined into \"Other Countries\".",
    );

    let Some(ds) = require_dataset(ui, state) else {
        return;
    };

    let rule = MergeRule::new(OTHER_COUNTRIES_LABEL, OTHER_COUNTRIES);
    let rows = aggregate_all(ds, columns::SOURCE_COUNTRY, true, Some(&rule));

    if rows.is_empty() {
        ui.label("No source-country data to aggregate.");
        return;
    }

    let colors = CategoryColors::new(rows.iter().map(|r| r.label.as_str()));
    charts::category_bar_chart(ui, "country_chart", &rows, &colors);

    ui.separator();
    egui::Grid::new("country_counts").striped(true).show(ui, |ui| {
        ui.strong("Country");
        ui.strong("Detonation Count");
        ui.end_row();
        for row in &rows {
            ui.label(charts::title_case(&row.label));
            ui.label(row.count.to_string());
            ui.end_row();
        }
    });
}

// ---------------------------------------------------------------------------
// Detonation Reasons
// ---------------------------------------------------------------------------

pub fn detonation_reasons(ui: &mut Ui, state: &mut AppState) {
    ui.heading("💥 Detonation Reasons");
    ui.label("Wr: weapon-related tests. We: weapon-effect tests. Pne: peaceful nuclear \
              explosions. Combat: wartime use. Se: safety experiments. Fms: fail-safe \
              tests. Sam: simulated armed missile tests. Plo: plutonium research.");
    ui.add_space(4.0);

    if state.dataset.is_none() {
        ui.label(NO_DATASET_MSG);
        return;
    }

    ui.strong("Select Detonation Reasons to Filter:");
    ui.horizontal_wrapped(|ui| {
        let options = state.reason_options.clone();
        for reason in &options {
            let mut checked = state.selected_reasons.contains(reason);
            if ui.checkbox(&mut checked, reason).changed() {
                state.toggle_reason(reason);
            }
        }
    });

    let Some(ds) = &state.dataset else {
        return;
    };
    let indices = multi_select_indices(ds, columns::DETONATION_REASON, &state.selected_reasons);
    if indices.is_empty() {
        ui.label("No detonations match the current selection.");
        return;
    }

    let summary = aggregate_by(ds, &indices, columns::DETONATION_REASON, false, None);

    ui.separator();
    ui.strong("Detonation Reason Summary");
    egui::Grid::new("reason_counts").striped(true).show(ui, |ui| {
        ui.strong("Reason");
        ui.strong("Count");
        ui.end_row();
        for row in &summary {
            ui.label(&row.label);
            ui.label(row.count.to_string());
            ui.end_row();
        }
    });

    ui.separator();
    ui.strong("Filtered Detonation Data");
    table::record_table(ui, "reason_table", ds, &indices, 260.0);
}

// ---------------------------------------------------------------------------
// Explosion Statistics
// ---------------------------------------------------------------------------

pub fn explosion_statistics(ui: &mut Ui, state: &mut AppState) {
    ui.heading("📈 Explosion Statistics");
    ui.label(
        "Identify high-yield detonations and see them on a scatterplot map. \
         Point size scales with the explosion yield.",
    );

    if state.dataset.is_none() {
        ui.label(NO_DATASET_MSG);
        return;
    }

    let (min_yield, max_yield) = state.yield_bounds;
    ui.horizontal(|ui| {
        ui.label("Explosion Yield Threshold (kilotons):");
        ui.add(Slider::new(&mut state.yield_threshold, min_yield..=max_yield).step_by(10.0));
    });

    let Some(ds) = &state.dataset else {
        return;
    };
    let hits = above_threshold(ds, columns::YIELD_LOWER, state.yield_threshold);

    ui.separator();
    ui.strong(format!(
        "Detonations with Yield Above {} Kilotons",
        state.yield_threshold
    ));
    if hits.is_empty() {
        ui.label("No detonations found with yields above the specified threshold.");
        return;
    }

    let hit_indices: Vec<usize> = hits.iter().map(|h| h.index).collect();
    table::record_table(ui, "yield_table", ds, &hit_indices, 220.0);

    ui.separator();
    ui.strong("Scatterplot Map of High-Yield Detonations");
    let geo = project(ds, &hit_indices, columns::LATITUDE, columns::LONGITUDE);
    map::yield_map(ui, &geo, &hits);
}
