use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::data::geo::{GeoPoints, ThresholdHit};
use crate::data::model::Dataset;
use crate::data::schema::columns;
use crate::state::{AppState, MapMode};

/// Viewport center when no point survives coordinate filtering.
const DEFAULT_VIEWPORT: (f64, f64) = (0.0, 0.0);

// ---------------------------------------------------------------------------
// Map rendering: detonation sites on a lon/lat plot
// ---------------------------------------------------------------------------

/// Render the global detonation map in the selected mode. The plot is framed
/// on the centroid of the retained points; with nothing to show we fall back
/// to the default viewport and tell the user so.
pub fn detonation_map(ui: &mut Ui, state: &AppState, dataset: &Dataset, geo: &GeoPoints) {
    if geo.is_empty() {
        ui.label("No detonation sites with coordinates to display.");
    }
    let (center_lat, center_lon) = geo.centroid().unwrap_or(DEFAULT_VIEWPORT);

    let plot = Plot::new("detonation_map")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .include_x(center_lon - 90.0)
        .include_x(center_lon + 90.0)
        .include_y(center_lat - 45.0)
        .include_y(center_lat + 45.0)
        .height(380.0);

    plot.show(ui, |plot_ui| match state.map_mode {
        MapMode::None => {}
        MapMode::Simple => {
            plot_ui.points(
                Points::new(lon_lat_points(geo))
                    .radius(2.0)
                    .color(Color32::LIGHT_BLUE)
                    .name("Detonation sites"),
            );
        }
        MapMode::Scatter => {
            // Two stacked layers, wide under narrow, so dense clusters read
            // darker where the small dots overdraw the halo.
            plot_ui.points(
                Points::new(lon_lat_points(geo))
                    .radius(4.0)
                    .color(Color32::from_rgb(0, 200, 0))
                    .name("Density halo"),
            );
            plot_ui.points(
                Points::new(lon_lat_points(geo))
                    .radius(2.0)
                    .color(Color32::from_rgb(0, 0, 255))
                    .name("Detonation sites"),
            );
        }
        MapMode::Annotated => {
            // One layer per source country so the legend doubles as the key.
            for (country, pts) in points_by_country(dataset, geo) {
                plot_ui.points(
                    Points::new(PlotPoints::new(pts))
                        .radius(3.0)
                        .name(crate::ui::charts::title_case(&country)),
                );
            }
        }
    });

    if state.map_mode == MapMode::Annotated {
        flag_links(ui, state, dataset, geo);
    }
}

/// Scatter map for the high-yield statistics view: point radius scales with
/// the explosion yield.
pub fn yield_map(ui: &mut Ui, geo: &GeoPoints, hits: &[ThresholdHit]) {
    if geo.is_empty() {
        ui.label("No detonations meet the criteria for the scatterplot map.");
        return;
    }
    let (center_lat, center_lon) = geo.centroid().unwrap_or(DEFAULT_VIEWPORT);

    Plot::new("yield_map")
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .include_x(center_lon - 90.0)
        .include_x(center_lon + 90.0)
        .include_y(center_lat - 45.0)
        .include_y(center_lat + 45.0)
        .height(380.0)
        .show(ui, |plot_ui| {
            for point in &geo.points {
                let Some(hit) = hits.iter().find(|h| h.index == point.index) else {
                    continue;
                };
                // Pipeline radius is kilotons / 10; squash into a usable
                // screen-point range.
                let screen_radius = (hit.radius / 25.0).clamp(2.0, 18.0) as f32;
                plot_ui.points(
                    Points::new(PlotPoints::new(vec![[point.lon, point.lat]]))
                        .radius(screen_radius)
                        .color(Color32::from_rgba_unmultiplied(255, 0, 0, 160)),
                );
            }
        });
}

fn lon_lat_points(geo: &GeoPoints) -> PlotPoints {
    PlotPoints::new(geo.points.iter().map(|p| [p.lon, p.lat]).collect())
}

/// Group map points by their record's source country, preserving point order.
fn points_by_country(dataset: &Dataset, geo: &GeoPoints) -> Vec<(String, Vec<[f64; 2]>)> {
    let mut grouped: Vec<(String, Vec<[f64; 2]>)> = Vec::new();
    for point in &geo.points {
        let country = dataset.records[point.index]
            .text(columns::SOURCE_COUNTRY)
            .map(|c| c.trim().to_lowercase())
            .unwrap_or_else(|| "unknown".to_string());
        match grouped.iter_mut().find(|(c, _)| *c == country) {
            Some((_, pts)) => pts.push([point.lon, point.lat]),
            None => grouped.push((country, vec![[point.lon, point.lat]])),
        }
    }
    grouped
}

/// Below the annotated map: one flag link per mapped country on screen.
/// Countries without a mapping show nothing here.
fn flag_links(ui: &mut Ui, state: &AppState, dataset: &Dataset, geo: &GeoPoints) {
    ui.horizontal_wrapped(|ui| {
        for (country, _) in points_by_country(dataset, geo) {
            if let Some(url) = state.flags.url_for(&country) {
                ui.hyperlink_to(
                    format!("🏳 {}", crate::ui::charts::title_case(&country)),
                    url,
                );
            }
        }
    });
}
