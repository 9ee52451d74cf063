//! Human-readable chart titles derived from column names.

/// Capitalise the first letter of every word and lowercase the rest.
///
/// A word starts at the beginning of the string or after any character that
/// is neither alphanumeric nor `_`, so `Beverage_category` stays one word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}

/// Column label used in most titles: underscores become spaces, then title-case.
pub fn pretty_column(column: &str) -> String {
    title_case(&column.replace('_', " "))
}

/// "Distribution of {column}" with the column prettified.
pub fn distribution_title(column: &str) -> String {
    format!("Distribution of {}", pretty_column(column))
}

/// Count plot titles title-case the raw name and keep underscores.
pub fn count_title(column: &str) -> String {
    format!("Distribution of {}", title_case(column))
}

/// "{x} vs. {y}", both prettified.
pub fn relationship_title(x: &str, y: &str) -> String {
    format!("{} vs. {}", pretty_column(x), pretty_column(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_capitalises_words() {
        assert_eq!(title_case("total fat g"), "Total Fat G");
        assert_eq!(title_case("CALORIES"), "Calories");
        assert_eq!(title_case("vitamin a (% dv)"), "Vitamin A (% Dv)");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn digits_belong_to_the_word() {
        assert_eq!(title_case("2percent milk"), "2percent Milk");
    }

    #[test]
    fn underscores_do_not_split_words() {
        assert_eq!(title_case("beverage_category"), "Beverage_category");
    }

    #[test]
    fn pretty_column_replaces_underscores_first() {
        assert_eq!(pretty_column("Total_Fat_g"), "Total Fat G");
        assert_eq!(pretty_column("Sugars_g"), "Sugars G");
    }

    #[test]
    fn titles() {
        assert_eq!(distribution_title("Calories"), "Distribution of Calories");
        assert_eq!(count_title("Beverage_category"), "Distribution of Beverage_category");
        assert_eq!(relationship_title("Calories", "Sugars_g"), "Calories vs. Sugars G");
    }
}
