use std::ops::RangeInclusive;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints};

use cord_explorer::color::Ramp;
use cord_explorer::stats::histogram::Histogram;
use cord_explorer::stats::wordcloud::WordCloud;

const CHART_HEIGHT: f32 = 260.0;
const HIST_COLOR: Color32 = Color32::from_rgb(135, 206, 235);
const KDE_COLOR: Color32 = Color32::from_rgb(30, 110, 170);

fn integer_ticks(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if mark.value.fract() == 0.0 {
        format!("{}", mark.value as i64)
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// Publications by year
// ---------------------------------------------------------------------------

pub fn year_chart(ui: &mut Ui, year_counts: &[(i32, usize)]) {
    let colors = Ramp::VIRIDIS.colors(year_counts.len());
    let bars: Vec<Bar> = year_counts
        .iter()
        .zip(colors)
        .map(|(&(year, count), color)| {
            Bar::new(year as f64, count as f64)
                .width(0.7)
                .fill(color)
                .name(year.to_string())
        })
        .collect();

    ui.label(egui::RichText::new("Publications Over Time").strong());
    Plot::new("year_chart")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid([false, true])
        .x_axis_label("Year")
        .y_axis_label("Number of Papers")
        .x_axis_formatter(integer_ticks)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Papers"));
        });
}

// ---------------------------------------------------------------------------
// Top-N rankings (journals, sources)
// ---------------------------------------------------------------------------

/// Horizontal bar chart of `(label, count)` pairs, first entry on top.
pub fn ranking_chart(
    ui: &mut Ui,
    id: &str,
    title: &str,
    category_label: &str,
    entries: &[(String, usize)],
    ramp: Ramp,
) {
    let n = entries.len();
    let colors = ramp.colors(n);
    let bars: Vec<Bar> = entries
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, ((label, count), color))| {
            Bar::new((n - 1 - i) as f64, *count as f64)
                .width(0.7)
                .fill(color)
                .name(label)
        })
        .collect();

    // Axis position → label, highest count at the top.
    let labels: Vec<String> = entries.iter().rev().map(|(label, _)| label.clone()).collect();

    ui.label(egui::RichText::new(title).strong());
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid([true, false])
        .x_axis_label("Number of Papers")
        .y_axis_label(category_label)
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
                return String::new();
            }
            labels.get(pos as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name(category_label));
        });
}

// ---------------------------------------------------------------------------
// Abstract length histogram
// ---------------------------------------------------------------------------

pub fn abstract_histogram(ui: &mut Ui, histogram: &Histogram) {
    let bars: Vec<Bar> = histogram
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .fill(HIST_COLOR)
                .stroke(egui::Stroke::new(0.5, Color32::WHITE))
        })
        .collect();
    let density: PlotPoints = histogram.density.iter().copied().collect();

    ui.label(egui::RichText::new("Distribution of Abstract Lengths").strong());
    Plot::new("abstract_histogram")
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid([false, true])
        .x_axis_label("Number of Words in Abstract")
        .y_axis_label("Number of Papers")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Papers"));
            if !histogram.density.is_empty() {
                plot_ui.line(Line::new(density).name("Density").color(KDE_COLOR).width(2.0));
            }
        });
}

// ---------------------------------------------------------------------------
// Word cloud
// ---------------------------------------------------------------------------

/// Paint the cloud at its native size, shrunk to fit narrow panels.
pub fn word_cloud(ui: &mut Ui, cloud: &WordCloud) {
    let scale = (ui.available_width() / cloud.width).clamp(0.1, 1.0);
    let (response, painter) =
        ui.allocate_painter(egui::vec2(cloud.width * scale, cloud.height * scale), Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 0.0, cloud.background);

    if cloud.is_empty() {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "No title words to display",
            FontId::proportional(16.0),
            Color32::GRAY,
        );
        return;
    }

    for word in &cloud.words {
        let pos = rect.min + egui::vec2(word.center[0] * scale, word.center[1] * scale);
        painter.text(
            pos,
            Align2::CENTER_CENTER,
            &word.text,
            FontId::proportional(word.font_size * scale),
            word.color,
        );
    }
}
