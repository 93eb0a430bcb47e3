use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, GridMark, Plot};

use crate::color::outline_for;
use crate::data::aggregate::Distribution;

// ---------------------------------------------------------------------------
// Horizontal distribution chart
// ---------------------------------------------------------------------------

/// Render one frequency distribution as a horizontal bar chart: counts on
/// the x axis, one category per integer tick on the y axis. The first
/// (smallest) count sits at the bottom.
pub fn distribution_chart(ui: &mut Ui, dist: &Distribution, fill: Color32, height: f32) {
    let column = dist.spec.column;
    ui.label(RichText::new(dist.spec.title).strong());

    let labels: Vec<String> = dist.counts.iter().map(|vc| vc.value.to_string()).collect();
    let outline = outline_for(fill);

    let bars: Vec<Bar> = dist
        .counts
        .iter()
        .zip(&labels)
        .enumerate()
        .map(|(i, (vc, label))| {
            Bar::new(i as f64, vc.count as f64)
                .width(0.7)
                .name(label)
                .fill(fill)
                .stroke(Stroke::new(1.0, outline))
        })
        .collect();

    let chart = BarChart::new(bars).horizontal().color(fill).name(column);

    let tick_labels = labels;
    Plot::new(("distribution_chart", column))
        .height(height)
        .x_axis_label("Count")
        .y_axis_label(column)
        .include_x(0.0)
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&tick_labels, mark.value)
        })
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

/// Label for a tick on the category axis; empty between categories.
fn category_label(labels: &[String], position: f64) -> String {
    let index = position.round();
    if (position - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_map_to_categories() {
        let labels = vec!["Female".to_string(), "Male".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Female");
        assert_eq!(category_label(&labels, 1.0), "Male");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }
}
