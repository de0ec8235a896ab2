use eframe::egui::{self, Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::charts::weather::value_label;
use crate::charts::{CategorySeries, Chart, ChartBody, ScatterData, Series};
use crate::color::ColorMap;

/// Fraction of a category slot covered by its group of bars.
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Chart rendering (central panel)
// ---------------------------------------------------------------------------

/// Draw one chart. `id` must be unique per chart on screen.
pub fn show_chart(ui: &mut Ui, id: &str, chart: &Chart, height: f32, colors: &ColorMap) {
    if !chart.title.is_empty() {
        ui.label(RichText::new(&chart.title).strong());
    }

    match &chart.body {
        ChartBody::Placeholder(message) => placeholder(ui, message, height),
        ChartBody::Empty => {
            Plot::new(id)
                .height(height)
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .show(ui, |_plot_ui| {});
        }
        ChartBody::Bars(cs) => category_chart(ui, id, chart, cs, height, colors, false),
        ChartBody::Lines(cs) => category_chart(ui, id, chart, cs, height, colors, true),
        ChartBody::Scatter(data) => scatter_chart(ui, id, chart, data, height, colors),
    }
}

/// Text-only chart: no frame, no axes.
fn placeholder(ui: &mut Ui, message: &str, height: f32) {
    let size = egui::vec2(ui.available_width(), height);
    ui.allocate_ui(size, |ui: &mut Ui| {
        ui.set_min_size(size);
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(message).size(20.0));
        });
    });
}

/// Tick label for a category axis: only whole positions inside the range get a name.
fn category_label(categories: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

fn category_chart(
    ui: &mut Ui,
    id: &str,
    chart: &Chart,
    cs: &CategorySeries,
    height: f32,
    colors: &ColorMap,
    as_lines: bool,
) {
    let categories = cs.categories.clone();
    let n_categories = categories.len();

    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .x_grid_spacer(move |_input| {
            (0..n_categories)
                .map(|i| GridMark {
                    value: i as f64,
                    step_size: 1.0,
                })
                .collect()
        })
        .x_axis_formatter(move |mark, _range| category_label(&categories, mark.value))
        .show(ui, |plot_ui| {
            let n_series = cs.series.len();
            for (j, series) in cs.series.iter().enumerate() {
                let color = colors.color_for(&series.name);

                if as_lines {
                    for segment in line_segments(series) {
                        let points: PlotPoints = segment.into_iter().collect();
                        plot_ui.line(Line::new(points).name(&series.name).color(color).width(2.0));
                    }
                    let markers: PlotPoints = present_points(series, 0.0).collect();
                    plot_ui.points(Points::new(markers).name(&series.name).color(color).radius(4.0));
                    continue;
                }

                let width = GROUP_WIDTH / n_series as f64;
                let offset = (j as f64 - (n_series as f64 - 1.0) / 2.0) * width;
                let bars: Vec<Bar> = present_points(series, offset)
                    .map(|[x, v]| Bar::new(x, v).width(width * 0.95))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&series.name).color(color));

                if cs.annotate_values {
                    for [x, v] in present_points(series, offset) {
                        let label = RichText::new(value_label(v)).size(14.0);
                        plot_ui.text(Text::new(PlotPoint::new(x, v), label).anchor(Align2::CENTER_BOTTOM));
                    }
                }
            }
        });
}

/// `[category position + offset, value]` for every category that has a value.
fn present_points(series: &Series, offset: f64) -> impl Iterator<Item = [f64; 2]> + '_ {
    series
        .values
        .iter()
        .enumerate()
        .filter_map(move |(i, v)| v.map(|v| [i as f64 + offset, v]))
}

/// Split a series into runs of consecutive present values.
fn line_segments(series: &Series) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (i, v) in series.values.iter().enumerate() {
        match v {
            Some(v) => current.push([i as f64, *v]),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn scatter_chart(
    ui: &mut Ui,
    id: &str,
    chart: &Chart,
    data: &ScatterData,
    height: f32,
    colors: &ColorMap,
) {
    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for fit in &data.fits {
                let points: PlotPoints = [
                    [fit.x_min, fit.slope * fit.x_min + fit.intercept],
                    [fit.x_max, fit.slope * fit.x_max + fit.intercept],
                ]
                .into_iter()
                .collect();
                let color = colors.color_for(&fit.name);
                plot_ui.line(Line::new(points).name(&fit.name).color(color).width(2.5));
            }

            for group in &data.groups {
                let points: PlotPoints = group.points.iter().copied().collect();
                let color = colors.color_for(&group.name).gamma_multiply(group.opacity);
                plot_ui.points(Points::new(points).name(&group.name).color(color).radius(3.0));
            }
        });
}
