//! Plot-ready data for a [`ChartSpec`]: bins, box summaries, points and counts.

use super::spec::{ChartKind, ChartSpec};
use crate::data::model::{CellValue, Column};

/// One histogram bar covering `[start, end)` (the last bin is closed).
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Five-number summary with 1.5·IQR whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Data ready to hand to a plotting backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Histogram(Vec<HistogramBin>),
    /// One box per group, in first-appearance order of the group value.
    Boxes(Vec<(CellValue, BoxSummary)>),
    Points(Vec<[f64; 2]>),
    /// Row count per category, in first-appearance order.
    Counts(Vec<(CellValue, usize)>),
}

/// Compute the data for `spec`.  Columns the spec names but the dataset
/// lacks yield empty data.
pub fn chart_data(spec: &ChartSpec<'_>, bins: usize) -> ChartData {
    let column = |name: &Option<String>| name.as_deref().and_then(|n| spec.data.column(n));

    match spec.kind {
        ChartKind::Histogram => {
            let values: Vec<f64> = column(&spec.x).map_or_else(Vec::new, |c| c.numbers().collect());
            ChartData::Histogram(histogram(&values, bins))
        }
        ChartKind::BoxPlot => match (column(&spec.x), column(&spec.y)) {
            (Some(values), Some(groups)) => ChartData::Boxes(grouped_boxes(values, groups)),
            _ => ChartData::Boxes(Vec::new()),
        },
        ChartKind::Scatter => match (column(&spec.x), column(&spec.y)) {
            (Some(x), Some(y)) => ChartData::Points(
                x.values
                    .iter()
                    .zip(&y.values)
                    .filter_map(|(a, b)| Some([a.as_f64()?, b.as_f64()?]))
                    .collect(),
            ),
            _ => ChartData::Points(Vec::new()),
        },
        ChartKind::CountPlot => {
            ChartData::Counts(column(&spec.y).map_or_else(Vec::new, |c| category_counts(&c.values)))
        }
    }
}

/// Equal-width bins over `[min, max]`.  A single distinct value gets one
/// unit-wide bin centred on it.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            start: min - 0.5,
            end: min + 0.5,
            count: values.len(),
        }];
    }

    let bins = bins.max(1);
    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Quartiles by linear interpolation between closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let fraction = pos - lower as f64;
    sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
}

/// Summarise `values`; `None` when there is nothing to summarise.
pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let inside = || sorted.iter().copied().filter(|v| (lower_fence..=upper_fence).contains(v));
    let lower_whisker = inside().fold(f64::INFINITY, f64::min);
    let upper_whisker = inside().fold(f64::NEG_INFINITY, f64::max);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| !(lower_fence..=upper_fence).contains(v))
        .collect();

    Some(BoxSummary {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}

/// Distinct non-null values in order of first appearance.
fn first_appearance(values: &[CellValue]) -> Vec<&CellValue> {
    let mut seen: Vec<&CellValue> = Vec::new();
    for v in values {
        if *v != CellValue::Null && !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}

fn grouped_boxes(values: &Column, groups: &Column) -> Vec<(CellValue, BoxSummary)> {
    first_appearance(&groups.values)
        .into_iter()
        .filter_map(|group| {
            let members: Vec<f64> = groups
                .values
                .iter()
                .zip(&values.values)
                .filter(|(g, _)| *g == group)
                .filter_map(|(_, v)| v.as_f64())
                .collect();
            box_summary(&members).map(|summary| (group.clone(), summary))
        })
        .collect()
}

/// Row count per distinct value; missing values are not counted.
pub fn category_counts(values: &[CellValue]) -> Vec<(CellValue, usize)> {
    first_appearance(values)
        .into_iter()
        .map(|v| (v.clone(), values.iter().filter(|x| *x == v).count()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::build_chart;
    use crate::data::model::Dataset;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn histogram_bins_cover_range_and_count_everything() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0, 10.0], 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[4].end, 10.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 6);
        // max lands in the closed last bin
        assert_eq!(bins[4].count, 1);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[0].width(), 2.0);
    }

    #[test]
    fn histogram_of_constant_values_is_one_bin() {
        let bins = histogram(&[5.0, 5.0, 5.0], 30);
        assert_eq!(
            bins,
            [HistogramBin {
                start: 4.5,
                end: 5.5,
                count: 3
            }]
        );
        assert_eq!(bins[0].center(), 5.0);
        assert!(histogram(&[], 10).is_empty());
    }

    #[test]
    fn box_summary_quartiles_and_outliers() {
        let s = box_summary(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(s.median, 3.5);
        assert_eq!(s.q1, 2.25);
        assert_eq!(s.q3, 4.75);
        assert_eq!(s.outliers, [100.0]);
        assert_eq!(s.lower_whisker, 1.0);
        assert_eq!(s.upper_whisker, 5.0);
        assert!(box_summary(&[]).is_none());
    }

    #[test]
    fn counts_keep_first_appearance_order_and_skip_nulls() {
        let counts = category_counts(&[text("Tea"), text("Coffee"), text("Tea"), CellValue::Null]);
        assert_eq!(counts, [(text("Tea"), 2), (text("Coffee"), 1)]);
        assert!(category_counts(&[CellValue::Null]).is_empty());
    }

    #[test]
    fn histogram_keeps_spread_at_tiny_scale() {
        let bins = histogram(&[1e-20, 2e-20, 3e-20], 3);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[0].start, 1e-20);
        assert!(bins.iter().all(|b| b.count == 1));
    }

    #[test]
    fn boxes_skip_rows_without_a_group() {
        let ds = Dataset::from_columns(vec![
            Column::new("Beverage_category", vec![text("Coffee"), CellValue::Null]),
            Column::new("Calories", vec![CellValue::Integer(3), CellValue::Integer(500)]),
        ])
        .unwrap();
        let spec = build_chart(ChartKind::BoxPlot, &ds, &["Calories"]).unwrap();
        let ChartData::Boxes(boxes) = chart_data(&spec, 10) else {
            panic!("expected boxes");
        };
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].0, text("Coffee"));
        assert_eq!(boxes[0].1.median, 3.0);
    }

    fn drinks() -> Dataset {
        Dataset::from_columns(vec![
            Column::new("Beverage_category", vec![text("Coffee"), text("Tea"), text("Coffee")]),
            Column::new(
                "Calories",
                vec![CellValue::Integer(3), CellValue::Integer(0), CellValue::Integer(5)],
            ),
            Column::new(
                "Sugars_g",
                vec![CellValue::Float(0.0), CellValue::Null, CellValue::Float(1.0)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn scatter_skips_rows_with_missing_values() {
        let ds = drinks();
        let spec = build_chart(ChartKind::Scatter, &ds, &["Calories", "Sugars_g"]).unwrap();
        assert_eq!(
            chart_data(&spec, 10),
            ChartData::Points(vec![[3.0, 0.0], [5.0, 1.0]])
        );
    }

    #[test]
    fn box_plot_groups_by_category() {
        let ds = drinks();
        let spec = build_chart(ChartKind::BoxPlot, &ds, &["Calories"]).unwrap();
        let ChartData::Boxes(boxes) = chart_data(&spec, 10) else {
            panic!("expected boxes");
        };
        let groups: Vec<&CellValue> = boxes.iter().map(|(g, _)| g).collect();
        assert_eq!(groups, [&text("Coffee"), &text("Tea")]);
        assert_eq!(boxes[0].1.median, 4.0);
        assert_eq!(boxes[1].1.median, 0.0);
    }

    #[test]
    fn count_plot_counts_category_rows() {
        let ds = drinks();
        let spec = build_chart(ChartKind::CountPlot, &ds, &["Beverage_category"]).unwrap();
        assert_eq!(
            chart_data(&spec, 10),
            ChartData::Counts(vec![(text("Coffee"), 2), (text("Tea"), 1)])
        );
    }
}
