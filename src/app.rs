use eframe::egui::{self, Ui};

use crate::state::{AppState, Tab};
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

type TabRenderer = fn(&mut Ui, &mut AppState);

/// Tab → handler dispatch table, in display order.
const TABS: &[(Tab, TabRenderer)] = &[
    (Tab::Overview, views::overview),
    (Tab::DataDictionary, views::data_dictionary),
    (Tab::FilterByYear, views::filter_by_year),
    (Tab::Map, views::global_map),
    (Tab::WeaponSource, views::weapon_source),
    (Tab::DetonationReasons, views::detonation_reasons),
    (Tab::ExplosionStatistics, views::explosion_statistics),
];

pub struct AtomicAtlasApp {
    pub state: AppState,
}

impl AtomicAtlasApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl Default for AtomicAtlasApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for AtomicAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Tab strip ----
        egui::TopBottomPanel::top("tab_strip").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (tab, _) in TABS {
                    ui.selectable_value(&mut self.state.active_tab, *tab, tab.label());
                }
            });
        });

        // ---- Central panel: active tab body ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let renderer = TABS
                .iter()
                .find(|(tab, _)| *tab == self.state.active_tab)
                .map(|(_, render)| *render)
                .unwrap_or(views::overview);
            renderer(ui, &mut self.state);
        });
    }
}
