use std::collections::BTreeSet;

use crate::chart::spec::{ChartKind, ChartRequest, ChartSelector};
use crate::config::AppConfig;
use crate::data::classify::{classify, ColumnClassification};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    DataOverview,
    Eda,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::DataOverview, Page::Eda];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::DataOverview => "Data Overview",
            Page::Eda => "Exploratory Data Analysis",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub dataset: Dataset,

    /// Column classification of `dataset`, computed once.
    pub classification: ColumnClassification,

    /// Grouping column for box plots.
    pub category_column: String,

    pub histogram_bins: usize,

    /// Currently shown page.
    pub page: Page,

    /// "Show DataFrame" checkbox.
    pub show_table: bool,

    /// "Show Shape of Data" checkbox.
    pub show_shape: bool,

    /// Chart kinds ticked in the visualization multi-select.
    pub selected_charts: BTreeSet<ChartKind>,

    /// Selected column per slot, indexed like `ChartKind::ALL`.
    column_choices: [Vec<String>; 4],
}

impl AppState {
    pub fn new(dataset: Dataset, config: &AppConfig) -> Self {
        let classification = classify(&dataset);
        let mut state = Self {
            dataset,
            classification,
            category_column: config.category_column.clone(),
            histogram_bins: config.histogram_bins,
            page: Page::Home,
            show_table: false,
            show_shape: false,
            selected_charts: BTreeSet::new(),
            column_choices: Default::default(),
        };
        state.reset_choices();
        state
    }

    /// Default every slot to the first column it may take.
    fn reset_choices(&mut self) {
        for (i, kind) in ChartKind::ALL.into_iter().enumerate() {
            self.column_choices[i] = kind
                .rule()
                .slots
                .iter()
                .map(|slot| {
                    self.classification
                        .of_kind(slot.domain)
                        .first()
                        .cloned()
                        .unwrap_or_default()
                })
                .collect();
        }
    }

    fn slot_index(kind: ChartKind) -> usize {
        ChartKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default()
    }

    pub fn selector(&self) -> ChartSelector<'_, '_> {
        ChartSelector::new(&self.dataset, &self.classification, &self.category_column)
    }

    /// Column currently chosen for a slot of `kind`.
    pub fn choice(&self, kind: ChartKind, slot: usize) -> &str {
        self.column_choices[Self::slot_index(kind)]
            .get(slot)
            .map_or("", String::as_str)
    }

    pub fn set_choice(&mut self, kind: ChartKind, slot: usize, column: String) {
        if let Some(c) = self.column_choices[Self::slot_index(kind)].get_mut(slot) {
            *c = column;
        }
    }

    /// Request for `kind`, or `None` while a slot has no column to offer
    /// or the chart needs a grouping column the dataset lacks.
    pub fn request(&self, kind: ChartKind) -> Option<ChartRequest> {
        let columns = &self.column_choices[Self::slot_index(kind)];
        if columns.iter().any(String::is_empty) {
            return None;
        }
        if kind.rule().grouped_by_category
            && !self.classification.is_categorical(&self.category_column)
        {
            return None;
        }
        Some(ChartRequest::new(kind, columns.iter().cloned()))
    }

    /// Tick or untick a chart kind in the multi-select.
    pub fn toggle_chart(&mut self, kind: ChartKind) {
        if !self.selected_charts.remove(&kind) {
            self.selected_charts.insert(kind);
        }
    }

    /// "The dataset contains N rows and M columns."
    pub fn shape_message(&self) -> String {
        let (rows, cols) = self.dataset.shape();
        format!("The dataset contains {rows} rows and {cols} columns.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column};

    fn state() -> AppState {
        let text = |s: &str| CellValue::Text(s.to_string());
        let ds = Dataset::from_columns(vec![
            Column::new("Beverage_category", vec![text("Coffee"), text("Smoothies")]),
            Column::new("Beverage", vec![text("Brewed Coffee"), text("Banana")]),
            Column::new("Calories", vec![CellValue::Integer(3), CellValue::Integer(280)]),
            Column::new("Sugars_g", vec![CellValue::Integer(0), CellValue::Integer(50)]),
        ])
        .unwrap();
        AppState::new(ds, &AppConfig::default())
    }

    #[test]
    fn slots_default_to_first_valid_column() {
        let s = state();
        assert_eq!(s.choice(ChartKind::Histogram, 0), "Calories");
        assert_eq!(s.choice(ChartKind::Scatter, 1), "Calories");
        assert_eq!(s.choice(ChartKind::CountPlot, 0), "Beverage_category");
        assert_eq!(
            s.request(ChartKind::Scatter),
            Some(ChartRequest::scatter("Calories", "Calories"))
        );
    }

    #[test]
    fn requests_from_choices_build_specs() {
        let mut s = state();
        s.set_choice(ChartKind::Scatter, 1, "Sugars_g".to_string());
        let spec = s
            .selector()
            .build(&s.request(ChartKind::Scatter).unwrap())
            .unwrap();
        assert_eq!(spec.title, "Calories vs. Sugars G");
    }

    #[test]
    fn no_request_without_candidate_columns() {
        let ds = Dataset::from_columns(vec![Column::new(
            "Calories",
            vec![CellValue::Integer(3)],
        )])
        .unwrap();
        let s = AppState::new(ds, &AppConfig::default());
        assert_eq!(s.request(ChartKind::CountPlot), None);
        assert!(s.request(ChartKind::Histogram).is_some());
    }

    #[test]
    fn no_box_plot_without_categorical_group_column() {
        // Header-only CSV: every empty column reads as numerical.
        let ds = Dataset::from_columns(vec![
            Column::new("Beverage_category", Vec::new()),
            Column::new("Calories", Vec::new()),
        ])
        .unwrap();
        let s = AppState::new(ds, &AppConfig::default());
        assert!(s.classification.categorical.is_empty());
        assert_eq!(s.request(ChartKind::BoxPlot), None);
        assert!(s.request(ChartKind::Histogram).is_some());
    }

    #[test]
    fn every_offered_request_builds() {
        let s = state();
        for kind in ChartKind::ALL {
            if let Some(req) = s.request(kind) {
                assert!(s.selector().build(&req).is_ok(), "{kind}");
            }
        }
    }

    #[test]
    fn toggling_and_shape() {
        let mut s = state();
        s.toggle_chart(ChartKind::BoxPlot);
        assert!(s.selected_charts.contains(&ChartKind::BoxPlot));
        s.toggle_chart(ChartKind::BoxPlot);
        assert!(s.selected_charts.is_empty());
        assert_eq!(s.shape_message(), "The dataset contains 2 rows and 4 columns.");
    }
}
