use std::collections::BTreeMap;
use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Categorical aggregation: group → count → merge → sort
// ---------------------------------------------------------------------------

/// One output row of the aggregator: (category label, record count).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    pub label: String,
    pub count: usize,
}

/// Re-labels a configured set of minor categories under one bucket label
/// (e.g. {"china", "india", "pakist", "uk"} → "Other Countries"). Values are
/// matched after whatever normalization the aggregation call applies.
#[derive(Debug, Clone)]
pub struct MergeRule {
    pub bucket_label: String,
    pub members: BTreeSet<String>,
}

impl MergeRule {
    pub fn new(bucket_label: &str, members: impl IntoIterator<Item = impl Into<String>>) -> Self {
        MergeRule {
            bucket_label: bucket_label.to_string(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

/// Group the given rows by the text value of `column` and count occurrences.
///
/// * `indices` selects the rows to aggregate (a prior filter's view);
///   rows with a missing grouping value are skipped.
/// * `normalize` lowercases and trims grouping values before counting, so
///   "USA " and "usa" land in one category.
/// * `merge` re-labels every member category to the bucket label and re-sums,
///   so the bucket's count is the sum of all merged categories.
///
/// Output is sorted by count descending, ties by label ascending. An empty
/// input produces an empty output.
pub fn aggregate_by(
    dataset: &Dataset,
    indices: &[usize],
    column: &str,
    normalize: bool,
    merge: Option<&MergeRule>,
) -> Vec<AggregateRow> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for &idx in indices {
        let Some(raw) = dataset.records[idx].text(column) else {
            continue;
        };
        let mut label = if normalize {
            raw.trim().to_lowercase()
        } else {
            raw.to_string()
        };
        if let Some(rule) = merge {
            if rule.members.contains(&label) {
                label = rule.bucket_label.clone();
            }
        }
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut rows: Vec<AggregateRow> = counts
        .into_iter()
        .map(|(label, count)| AggregateRow { label, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    rows
}

/// Count the given rows per integer value of `column`, sorted by value
/// ascending. Feeds the detonations-per-year bar chart, where the x axis is
/// the year itself rather than a popularity ranking.
pub fn integer_counts(dataset: &Dataset, indices: &[usize], column: &str) -> Vec<(i64, usize)> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &idx in indices {
        if let Some(v) = dataset.records[idx].number(column) {
            *counts.entry(v as i64).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}

/// Convenience: aggregate over the whole dataset.
pub fn aggregate_all(
    dataset: &Dataset,
    column: &str,
    normalize: bool,
    merge: Option<&MergeRule>,
) -> Vec<AggregateRow> {
    let indices: Vec<usize> = (0..dataset.len()).collect();
    aggregate_by(dataset, &indices, column, normalize, merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};
    use crate::data::schema::columns;
    use std::collections::BTreeMap;

    fn country_dataset(countries: &[Option<&str>]) -> Dataset {
        let records = countries
            .iter()
            .map(|c| {
                let mut fields = BTreeMap::new();
                fields.insert(
                    columns::SOURCE_COUNTRY.to_string(),
                    c.map_or(CellValue::Null, |s| CellValue::String(s.to_string())),
                );
                Record { fields }
            })
            .collect();
        Dataset::new(records, vec![columns::SOURCE_COUNTRY.to_string()])
    }

    #[test]
    fn counts_sum_to_rows_with_a_grouping_value() {
        let ds = country_dataset(&[Some("usa"), Some("ussr"), Some("usa"), None]);
        let rows = aggregate_all(&ds, columns::SOURCE_COUNTRY, false, None);
        let total: usize = rows.iter().map(|r| r.count).sum();
        assert_eq!(total, 3); // the Null row is skipped
    }

    #[test]
    fn normalization_folds_case_and_whitespace() {
        let ds = country_dataset(&[Some("USA "), Some("usa"), Some(" Usa")]);
        let rows = aggregate_all(&ds, columns::SOURCE_COUNTRY, true, None);
        assert_eq!(rows, vec![AggregateRow { label: "usa".into(), count: 3 }]);
    }

    #[test]
    fn merge_rule_conserves_counts() {
        let ds = country_dataset(&[Some("usa"), Some("usa"), Some("uk"), Some("china")]);
        let rule = MergeRule::new("Other Countries", ["uk", "china", "india", "pakist"]);
        let rows = aggregate_all(&ds, columns::SOURCE_COUNTRY, true, Some(&rule));

        assert_eq!(
            rows,
            vec![
                AggregateRow { label: "Other Countries".into(), count: 2 },
                AggregateRow { label: "usa".into(), count: 2 },
            ]
        );
        let total: usize = rows.iter().map(|r| r.count).sum();
        assert_eq!(total, ds.len());
    }

    #[test]
    fn sorted_by_count_then_label() {
        let ds = country_dataset(&[
            Some("ussr"),
            Some("ussr"),
            Some("usa"),
            Some("usa"),
            Some("france"),
        ]);
        let rows = aggregate_all(&ds, columns::SOURCE_COUNTRY, false, None);
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        // usa/ussr tie at 2, broken lexicographically.
        assert_eq!(labels, vec!["usa", "ussr", "france"]);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let ds = country_dataset(&[]);
        assert!(aggregate_all(&ds, columns::SOURCE_COUNTRY, true, None).is_empty());
    }

    #[test]
    fn integer_counts_sort_by_value_ascending() {
        let mut records = Vec::new();
        for year in [1998i64, 1945, 1950, 1945] {
            let mut fields = BTreeMap::new();
            fields.insert(columns::YEAR.to_string(), CellValue::Integer(year));
            records.push(Record { fields });
        }
        let ds = Dataset::new(records, vec![columns::YEAR.to_string()]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        assert_eq!(
            integer_counts(&ds, &indices, columns::YEAR),
            vec![(1945, 2), (1950, 1), (1998, 1)]
        );
    }

    #[test]
    fn aggregates_only_the_given_view() {
        let ds = country_dataset(&[Some("usa"), Some("ussr"), Some("usa")]);
        let rows = aggregate_by(&ds, &[0, 1], columns::SOURCE_COUNTRY, false, None);
        let total: usize = rows.iter().map(|r| r.count).sum();
        assert_eq!(total, 2);
    }
}
