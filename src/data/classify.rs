use super::model::{ColumnKind, Dataset};

// ---------------------------------------------------------------------------
// Column classification
// ---------------------------------------------------------------------------

/// Column names split by kind, each list in source column order.
///
/// Ambiguous columns appear in neither list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClassification {
    pub categorical: Vec<String>,
    pub numerical: Vec<String>,
}

impl ColumnClassification {
    pub fn is_categorical(&self, column: &str) -> bool {
        self.categorical.iter().any(|c| c == column)
    }

    pub fn is_numerical(&self, column: &str) -> bool {
        self.numerical.iter().any(|c| c == column)
    }

    /// Names belonging to the given kind.
    pub fn of_kind(&self, kind: ColumnKind) -> &[String] {
        match kind {
            ColumnKind::Categorical => &self.categorical,
            ColumnKind::Numerical => &self.numerical,
            ColumnKind::Ambiguous => &[],
        }
    }
}

/// Partition the dataset's columns by their load-time kind tag.
pub fn classify(dataset: &Dataset) -> ColumnClassification {
    let mut out = ColumnClassification::default();
    for col in dataset.columns() {
        match col.kind {
            ColumnKind::Categorical => out.categorical.push(col.name.clone()),
            ColumnKind::Numerical => out.numerical.push(col.name.clone()),
            ColumnKind::Ambiguous => {
                log::warn!("Column '{}' has mixed value types; not offered for charts", col.name);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column};

    fn sample() -> Dataset {
        let text = |s: &str| CellValue::Text(s.to_string());
        Dataset::from_columns(vec![
            Column::new("Beverage_category", vec![text("Coffee"), text("Smoothies")]),
            Column::new("Calories", vec![CellValue::Integer(3), CellValue::Integer(280)]),
            Column::new("Beverage", vec![text("Brewed Coffee"), text("Banana")]),
            Column::new("Decaf", vec![CellValue::Bool(false), CellValue::Bool(true)]),
            Column::new("Sugars_g", vec![CellValue::Float(0.0), CellValue::Null]),
        ])
        .unwrap()
    }

    #[test]
    fn partitions_preserving_order() {
        let c = classify(&sample());
        assert_eq!(c.categorical, ["Beverage_category", "Beverage"]);
        assert_eq!(c.numerical, ["Calories", "Sugars_g"]);
    }

    #[test]
    fn ambiguous_columns_are_excluded_from_both_sets() {
        let c = classify(&sample());
        assert!(!c.is_categorical("Decaf"));
        assert!(!c.is_numerical("Decaf"));
        assert!(c.of_kind(ColumnKind::Ambiguous).is_empty());
    }

    #[test]
    fn sets_are_disjoint_and_cover_unambiguous_columns() {
        let ds = sample();
        let c = classify(&ds);
        for name in &c.categorical {
            assert!(!c.is_numerical(name));
        }
        let covered = c.categorical.len() + c.numerical.len();
        let unambiguous = ds
            .columns()
            .iter()
            .filter(|col| col.kind != ColumnKind::Ambiguous)
            .count();
        assert_eq!(covered, unambiguous);
    }

    #[test]
    fn empty_dataset_classifies_to_nothing() {
        let ds = Dataset::from_columns(Vec::new()).unwrap();
        assert_eq!(classify(&ds), ColumnClassification::default());
    }
}
