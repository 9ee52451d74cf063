use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, Points};

use crate::chart::series::{chart_data, ChartData};
use crate::chart::spec::{Axis, ChartSpec};
use crate::color::ColorMap;
use crate::data::model::CellValue;

const PLOT_HEIGHT: f32 = 360.0;
const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

// ---------------------------------------------------------------------------
// Chart display sink
// ---------------------------------------------------------------------------

/// Render one chart specification: title, then the plot.
pub fn chart(ui: &mut Ui, spec: &ChartSpec<'_>, bins: usize) {
    ui.strong(&spec.title);

    let data = chart_data(spec, bins);
    let plot = Plot::new(("chart", spec.kind))
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.axis_label(Axis::X))
        .y_axis_label(spec.axis_label(Axis::Y))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true);

    match data {
        ChartData::Histogram(bins) => {
            let bars = bins
                .iter()
                .map(|b| {
                    Bar::new(b.center(), b.count as f64)
                        .width(b.width())
                        .name(format!("{:.2} – {:.2}", b.start, b.end))
                })
                .collect();
            plot.show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR));
            });
        }
        ChartData::Boxes(boxes) => {
            let colors = ColorMap::new(boxes.iter().map(|(group, _)| group));
            let labels = category_labels(boxes.iter().map(|(group, _)| group));
            plot.y_axis_formatter(move |mark, _range| label_at(&labels, mark.value))
                .show(ui, |plot_ui| {
                    for (i, (group, s)) in boxes.iter().enumerate() {
                        let color = colors.color_for(group);
                        let elem = BoxElem::new(
                            i as f64,
                            BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                        )
                        .name(group.to_string())
                        .box_width(0.6)
                        .whisker_width(0.3)
                        .fill(color.linear_multiply(0.3))
                        .stroke(Stroke::new(1.5, color));
                        plot_ui.box_plot(
                            BoxPlot::new(vec![elem])
                                .name(group.to_string())
                                .color(color)
                                .horizontal(),
                        );
                        if !s.outliers.is_empty() {
                            let outliers: Vec<[f64; 2]> =
                                s.outliers.iter().map(|&v| [v, i as f64]).collect();
                            plot_ui.points(
                                Points::new(outliers)
                                    .name(group.to_string())
                                    .color(color)
                                    .radius(2.5),
                            );
                        }
                    }
                });
        }
        ChartData::Points(points) => {
            plot.show(ui, |plot_ui| {
                plot_ui.points(Points::new(points).color(BAR_COLOR).radius(3.0));
            });
        }
        ChartData::Counts(counts) => {
            let labels = category_labels(counts.iter().map(|(value, _)| value));
            let bars = counts
                .iter()
                .enumerate()
                .map(|(i, (value, n))| Bar::new(i as f64, *n as f64).name(value.to_string()))
                .collect();
            plot.y_axis_formatter(move |mark, _range| label_at(&labels, mark.value))
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).horizontal());
                });
        }
    }
}

fn category_labels<'a>(values: impl Iterator<Item = &'a CellValue>) -> Vec<String> {
    values.map(CellValue::to_string).collect()
}

/// Label for an integer grid position on a categorical axis; blank between.
fn label_at(labels: &[String], position: f64) -> String {
    if position.fract() != 0.0 || position < 0.0 {
        return String::new();
    }
    labels.get(position as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_axis_labels_only_on_integer_marks() {
        let labels = vec!["Coffee".to_string(), "Smoothies".to_string()];
        assert_eq!(label_at(&labels, 1.0), "Smoothies");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, -1.0), "");
        assert_eq!(label_at(&labels, 7.0), "");
    }
}
