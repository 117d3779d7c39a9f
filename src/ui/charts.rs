use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::CategoryColors;
use crate::data::aggregate::AggregateRow;

// ---------------------------------------------------------------------------
// Bar charts (egui_plot)
// ---------------------------------------------------------------------------

/// Detonations-per-year bar chart. X axis is the year itself, so gaps in the
/// record show up as gaps in the chart.
pub fn year_bar_chart(ui: &mut Ui, counts: &[(i64, usize)], range: (i64, i64)) {
    let bars: Vec<Bar> = counts
        .iter()
        .map(|&(year, count)| Bar::new(year as f64, count as f64).width(0.8))
        .collect();

    let chart = BarChart::new(bars).name(format!(
        "Nuclear Bombs Detonated ({} - {})",
        range.0, range.1
    ));

    Plot::new("year_histogram")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Number of Bombs")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .height(320.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

/// Horizontal-category bar chart for aggregate rows (countries, reasons),
/// one coloured bar per category with its share of the total in the legend.
pub fn category_bar_chart(ui: &mut Ui, id: &str, rows: &[AggregateRow], colors: &CategoryColors) {
    let total: usize = rows.iter().map(|r| r.count).sum();

    let charts: Vec<BarChart> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let percent = if total > 0 {
                100.0 * row.count as f64 / total as f64
            } else {
                0.0
            };
            let bar = Bar::new(i as f64, row.count as f64).width(0.7);
            BarChart::new(vec![bar])
                .name(format!("{} ({percent:.1}%)", title_case(&row.label)))
                .color(colors.color_for(&row.label))
        })
        .collect();

    Plot::new(id)
        .legend(Legend::default())
        .y_axis_label("Detonation Count")
        .show_x(false)
        .allow_scroll(false)
        .height(320.0)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Capitalize each word for chart labels ("other countries" → "Other Countries").
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
