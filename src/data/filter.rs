use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Row filters: every filter returns indices into the dataset, preserving
// source order. The records themselves are never copied or mutated.
// ---------------------------------------------------------------------------

/// Return indices of records whose numeric value in `column` lies in the
/// inclusive range `[lower, upper]`.
///
/// * Records with a missing or non-numeric value are excluded.
/// * An inverted range (`lower > upper`) matches nothing — the UI can hand us
///   an inverted slider selection and must get an empty view, not a panic.
pub fn range_indices(dataset: &Dataset, column: &str, lower: f64, upper: f64) -> Vec<usize> {
    if lower > upper {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            rec.number(column)
                .is_some_and(|v| v >= lower && v <= upper)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Return indices of records whose text value in `column` is a member of
/// `allowed`.
///
/// An empty `allowed` set is the valid "nothing selected" state and yields an
/// empty view. Records with a missing value are excluded.
pub fn multi_select_indices(
    dataset: &Dataset,
    column: &str,
    allowed: &BTreeSet<String>,
) -> Vec<usize> {
    if allowed.is_empty() {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.text(column).is_some_and(|v| allowed.contains(v)))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};
    use crate::data::schema::columns;
    use std::collections::BTreeMap;

    fn record(year: Option<i64>, reason: Option<&str>) -> Record {
        let mut fields = BTreeMap::new();
        fields.insert(
            columns::YEAR.to_string(),
            year.map_or(CellValue::Null, CellValue::Integer),
        );
        fields.insert(
            columns::DETONATION_REASON.to_string(),
            reason.map_or(CellValue::Null, |r| CellValue::String(r.to_string())),
        );
        Record { fields }
    }

    fn dataset(rows: Vec<Record>) -> Dataset {
        Dataset::new(
            rows,
            vec![
                columns::YEAR.to_string(),
                columns::DETONATION_REASON.to_string(),
            ],
        )
    }

    #[test]
    fn range_matches_inclusive_bounds() {
        let ds = dataset(vec![
            record(Some(1945), None),
            record(Some(1950), None),
            record(Some(1998), None),
        ]);
        assert_eq!(range_indices(&ds, columns::YEAR, 1945.0, 1950.0), vec![0, 1]);
        assert_eq!(range_indices(&ds, columns::YEAR, 1945.0, 1945.0), vec![0]);
    }

    #[test]
    fn range_cardinality_matches_brute_force() {
        let years = [1945, 1949, 1952, 1961, 1961, 1974, 1980, 1996, 1998];
        let ds = dataset(years.iter().map(|&y| record(Some(y), None)).collect());
        let (lo, hi) = (1950.0, 1990.0);
        let expected = years.iter().filter(|&&y| (y as f64) >= lo && (y as f64) <= hi).count();
        assert_eq!(range_indices(&ds, columns::YEAR, lo, hi).len(), expected);
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let ds = dataset(vec![record(Some(1960), None)]);
        assert!(range_indices(&ds, columns::YEAR, 1990.0, 1950.0).is_empty());
    }

    #[test]
    fn range_excludes_missing_values_and_preserves_order() {
        let ds = dataset(vec![
            record(Some(1970), None),
            record(None, None),
            record(Some(1955), None),
        ]);
        assert_eq!(range_indices(&ds, columns::YEAR, 1900.0, 2000.0), vec![0, 2]);
    }

    #[test]
    fn multi_select_keeps_only_allowed_values() {
        let ds = dataset(vec![
            record(None, Some("WR")),
            record(None, Some("PNE")),
            record(None, None),
            record(None, Some("COMBAT")),
        ]);
        let allowed: BTreeSet<String> =
            ["WR", "COMBAT"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            multi_select_indices(&ds, columns::DETONATION_REASON, &allowed),
            vec![0, 3]
        );
    }

    #[test]
    fn empty_selection_yields_empty_view() {
        let ds = dataset(vec![record(None, Some("WR"))]);
        let allowed = BTreeSet::new();
        assert!(multi_select_indices(&ds, columns::DETONATION_REASON, &allowed).is_empty());
    }
}
