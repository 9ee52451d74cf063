use std::fmt;

use super::title;
use crate::data::classify::{classify, ColumnClassification};
use crate::data::model::{ColumnKind, Dataset};
use crate::error::ChartError;

/// Categorical column used to group and colour box plots.
pub const DEFAULT_CATEGORY_COLUMN: &str = "Beverage_category";

// ---------------------------------------------------------------------------
// Chart kinds and their construction rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartKind {
    Histogram,
    BoxPlot,
    Scatter,
    CountPlot,
}

impl ChartKind {
    /// Every kind in the order the EDA page lists them.
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Histogram,
        ChartKind::BoxPlot,
        ChartKind::Scatter,
        ChartKind::CountPlot,
    ];

    /// Label shown in the visualization multi-select.
    pub fn label(self) -> &'static str {
        self.rule().label
    }

    /// Section heading above the chart's widgets.
    pub fn heading(self) -> &'static str {
        self.rule().heading
    }

    pub fn rule(self) -> &'static ChartRule {
        match self {
            ChartKind::Histogram => &RULES[0],
            ChartKind::BoxPlot => &RULES[1],
            ChartKind::Scatter => &RULES[2],
            ChartKind::CountPlot => &RULES[3],
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChartKind::Histogram => "histogram",
            ChartKind::BoxPlot => "box plot",
            ChartKind::Scatter => "scatterplot",
            ChartKind::CountPlot => "count plot",
        };
        f.write_str(s)
    }
}

/// Which positional channel a selected column is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// One user-selectable column of a chart.
#[derive(Debug)]
pub struct Slot {
    pub axis: Axis,
    /// Classification subset the column must come from.
    pub domain: ColumnKind,
    /// Prompt shown next to the selection widget.
    pub prompt: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Plot row values as-is.
    None,
    /// Count rows per bin or category.
    Count,
}

/// Static description of how one chart kind is built.
pub struct ChartRule {
    pub kind: ChartKind,
    pub label: &'static str,
    pub heading: &'static str,
    pub slots: &'static [Slot],
    pub aggregation: Aggregation,
    /// Bind the category column to `y` and `color`.
    pub grouped_by_category: bool,
    title: fn(&[&str]) -> String,
}

static RULES: [ChartRule; 4] = [
    ChartRule {
        kind: ChartKind::Histogram,
        label: "Histograms",
        heading: "Histograms - Visualizing Numerical Distributions",
        slots: &[Slot {
            axis: Axis::X,
            domain: ColumnKind::Numerical,
            prompt: "Select a numerical column for the histogram:",
        }],
        aggregation: Aggregation::Count,
        grouped_by_category: false,
        title: |cols| title::distribution_title(cols[0]),
    },
    ChartRule {
        kind: ChartKind::BoxPlot,
        label: "Box Plots",
        heading: "Box Plots - Visualizing Numerical Distributions",
        slots: &[Slot {
            axis: Axis::X,
            domain: ColumnKind::Numerical,
            prompt: "Select a numerical column for the box plot:",
        }],
        aggregation: Aggregation::None,
        grouped_by_category: true,
        title: |cols| title::distribution_title(cols[0]),
    },
    ChartRule {
        kind: ChartKind::Scatter,
        label: "Scatterplots",
        heading: "Scatterplots - Visualizing Relationships",
        slots: &[
            Slot {
                axis: Axis::X,
                domain: ColumnKind::Numerical,
                prompt: "Select x-axis variable:",
            },
            Slot {
                axis: Axis::Y,
                domain: ColumnKind::Numerical,
                prompt: "Select y-axis variable:",
            },
        ],
        aggregation: Aggregation::None,
        grouped_by_category: false,
        title: |cols| title::relationship_title(cols[0], cols[1]),
    },
    ChartRule {
        kind: ChartKind::CountPlot,
        label: "Count Plots",
        heading: "Count Plots - Visualizing Categorical Distributions",
        slots: &[Slot {
            axis: Axis::Y,
            domain: ColumnKind::Categorical,
            prompt: "Select a categorical variable:",
        }],
        aggregation: Aggregation::Count,
        grouped_by_category: false,
        title: |cols| title::count_title(cols[0]),
    },
];

// ---------------------------------------------------------------------------
// Requests and resulting specifications
// ---------------------------------------------------------------------------

/// One user interaction: a chart kind plus the selected column(s), in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub columns: Vec<String>,
}

impl ChartRequest {
    pub fn new(kind: ChartKind, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        ChartRequest {
            kind,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn histogram(x: &str) -> Self {
        Self::new(ChartKind::Histogram, [x])
    }

    pub fn box_plot(x: &str) -> Self {
        Self::new(ChartKind::BoxPlot, [x])
    }

    pub fn scatter(x: &str, y: &str) -> Self {
        Self::new(ChartKind::Scatter, [x, y])
    }

    pub fn count_plot(y: &str) -> Self {
        Self::new(ChartKind::CountPlot, [y])
    }
}

/// A fully resolved chart, independent of any rendering technology.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec<'a> {
    pub kind: ChartKind,
    pub data: &'a Dataset,
    pub x: Option<String>,
    pub y: Option<String>,
    pub color: Option<String>,
    pub title: String,
    pub aggregation: Aggregation,
}

impl ChartSpec<'_> {
    /// Axis caption: the bound column name, or "count" on an aggregated axis.
    pub fn axis_label(&self, axis: Axis) -> &str {
        let bound = match axis {
            Axis::X => self.x.as_deref(),
            Axis::Y => self.y.as_deref(),
        };
        bound.unwrap_or(match self.aggregation {
            Aggregation::Count => "count",
            Aggregation::None => "",
        })
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// Builds chart specifications against one dataset.
///
/// Borrows a classification computed once for that dataset; the selector
/// itself is cheap to construct per interaction.
#[derive(Debug, Clone, Copy)]
pub struct ChartSelector<'d, 'c> {
    dataset: &'d Dataset,
    classification: &'c ColumnClassification,
    category_column: &'c str,
}

impl<'d, 'c> ChartSelector<'d, 'c> {
    pub fn new(
        dataset: &'d Dataset,
        classification: &'c ColumnClassification,
        category_column: &'c str,
    ) -> Self {
        ChartSelector {
            dataset,
            classification,
            category_column,
        }
    }

    /// Columns a selection widget may offer for the given slot.
    pub fn options(&self, slot: &Slot) -> &'c [String] {
        self.classification.of_kind(slot.domain)
    }

    /// Map a request to a chart specification.
    ///
    /// Fails when the column count does not match the kind or a column lies
    /// outside the classification subset its slot requires.
    pub fn build(&self, request: &ChartRequest) -> Result<ChartSpec<'d>, ChartError> {
        let rule = request.kind.rule();
        if request.columns.len() != rule.slots.len() {
            return Err(ChartError::ColumnCount {
                kind: rule.kind,
                expected: rule.slots.len(),
                found: request.columns.len(),
            });
        }

        let mut x = None;
        let mut y = None;
        for (slot, column) in rule.slots.iter().zip(&request.columns) {
            if !self.options(slot).contains(column) {
                return Err(ChartError::InvalidColumn {
                    kind: rule.kind,
                    column: column.clone(),
                });
            }
            match slot.axis {
                Axis::X => x = Some(column.clone()),
                Axis::Y => y = Some(column.clone()),
            }
        }

        let mut color = None;
        if rule.grouped_by_category {
            if !self.classification.is_categorical(self.category_column) {
                return Err(ChartError::InvalidColumn {
                    kind: rule.kind,
                    column: self.category_column.to_string(),
                });
            }
            y = Some(self.category_column.to_string());
            color = Some(self.category_column.to_string());
        }

        let names: Vec<&str> = request.columns.iter().map(String::as_str).collect();
        let spec = ChartSpec {
            kind: rule.kind,
            data: self.dataset,
            x,
            y,
            color,
            title: (rule.title)(&names),
            aggregation: rule.aggregation,
        };
        log::debug!("Built {} spec: {}", spec.kind, spec.title);
        Ok(spec)
    }
}

/// Build a chart against `dataset`, grouping box plots by the default
/// category column.
pub fn build_chart<'a>(
    kind: ChartKind,
    dataset: &'a Dataset,
    columns: &[&str],
) -> Result<ChartSpec<'a>, ChartError> {
    let classification = classify(dataset);
    ChartSelector::new(dataset, &classification, DEFAULT_CATEGORY_COLUMN)
        .build(&ChartRequest::new(kind, columns.iter().copied()))
}
