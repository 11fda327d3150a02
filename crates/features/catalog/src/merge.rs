//! Read-time merge of baseline and persisted values.

use fxhash::FxHashSet;

/// Sorts case-insensitively; exact ordering breaks ties (`"DJ"` before `"dj"`).
pub fn sort_text(values: &mut [String]) {
    values.sort_by_cached_key(|value| (value.to_lowercase(), value.clone()));
}

/// Baseline values in their declared order, then the sorted custom values.
///
/// The first occurrence of a value wins, so a custom entry equal to a baseline
/// value never shows up twice.
#[must_use]
pub fn merge_text<'a>(
    baseline: impl IntoIterator<Item = &'a str>,
    mut persisted: Vec<String>,
) -> Vec<String> {
    sort_text(&mut persisted);

    let mut seen = FxHashSet::default();
    baseline
        .into_iter()
        .map(str::to_owned)
        .chain(persisted)
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Numeric union of baseline and custom amounts, ascending, without duplicates.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn merge_amounts(baseline: impl IntoIterator<Item = f64>, persisted: Vec<f64>) -> Vec<f64> {
    let mut amounts: Vec<f64> =
        baseline.into_iter().chain(persisted).filter(|amount| amount.is_finite()).collect();
    amounts.sort_by(f64::total_cmp);
    amounts.dedup_by(|a, b| a == b);
    amounts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_keeps_position_over_equal_custom_value() {
        let merged = merge_text(
            ["Manila", "Quezon City"],
            vec!["makati".to_owned(), "Manila".to_owned(), "Batangas".to_owned()],
        );
        assert_eq!(merged, ["Manila", "Quezon City", "Batangas", "makati"]);
    }

    #[test]
    fn case_variants_sort_deterministically() {
        let mut values = vec!["dj".to_owned(), "Band".to_owned(), "DJ".to_owned()];
        sort_text(&mut values);
        assert_eq!(values, ["Band", "DJ", "dj"]);
    }

    #[test]
    fn amounts_are_reordered_numerically() {
        assert_eq!(merge_amounts([1000.0, 2000.0], vec![1500.0, 1000.0]), [1000.0, 1500.0, 2000.0]);
    }
}
