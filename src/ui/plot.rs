use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Points};

use iris_explorer::chart::{ChartSpec, HistogramSpec, ScatterMark, ScatterSpec};
use iris_explorer::color::Rgb;

const PLOT_HEIGHT: f32 = 380.0;

pub fn to_color32(c: Rgb) -> Color32 {
    let [r, g, b] = c.0;
    Color32::from_rgb(r, g, b)
}

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

/// Render whichever chart the state currently holds.
pub fn chart(ui: &mut Ui, spec: &ChartSpec) {
    if spec.is_empty() {
        ui.label("No records match the current filters.");
    }
    match spec {
        ChartSpec::Scatter(s) => scatter_plot(ui, s),
        ChartSpec::Histogram(h) => histogram_plot(ui, h),
    }
}

fn scatter_plot(ui: &mut Ui, spec: &ScatterSpec) {
    let hover_marks = spec.marks.clone();

    Plot::new("scatter_plot")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.x.name())
        .y_axis_label(spec.y.name())
        .label_formatter(move |_name: &str, value: &PlotPoint| {
            nearest_mark(&hover_marks, value)
                .map(tooltip_text)
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for entry in &spec.legend {
                let points: Vec<[f64; 2]> = spec
                    .marks
                    .iter()
                    .filter(|m| m.species == entry.species)
                    .map(|m| [m.x, m.y])
                    .collect();
                if points.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(points)
                        .name(entry.species.name())
                        .color(to_color32(entry.color))
                        .radius(4.0),
                );
            }
        });
}

/// Mark closest to the cursor in plot coordinates.
fn nearest_mark<'a>(marks: &'a [ScatterMark], at: &PlotPoint) -> Option<&'a ScatterMark> {
    marks.iter().min_by(|a, b| {
        let da = (a.x - at.x).powi(2) + (a.y - at.y).powi(2);
        let db = (b.x - at.x).powi(2) + (b.y - at.y).powi(2);
        da.total_cmp(&db)
    })
}

fn tooltip_text(mark: &ScatterMark) -> String {
    let mut lines: Vec<String> = mark
        .tooltip
        .values
        .iter()
        .map(|(feature, v)| format!("{feature}: {v:.1}"))
        .collect();
    lines.push(format!("species: {}", mark.tooltip.species));
    lines.join("\n")
}

fn histogram_plot(ui: &mut Ui, spec: &HistogramSpec) {
    // One bar chart per species, each stacked on the ones before it.
    let mut charts: Vec<BarChart> = Vec::new();
    for entry in &spec.legend {
        let bars: Vec<Bar> = spec
            .bins
            .iter()
            .map(|bin| {
                Bar::new(bin.center(), bin.count(entry.species) as f64)
                    .width(spec.bin_width)
                    .name(format!("{:.2}–{:.2}", bin.start, bin.end))
            })
            .collect();
        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(entry.species.name())
            .color(to_color32(entry.color))
            .stack_on(&below);
        charts.push(chart);
    }

    Plot::new("histogram_plot")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.feature.name())
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
