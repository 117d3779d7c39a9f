use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Stable column names
// ---------------------------------------------------------------------------

/// Stable internal column names used by every pipeline operation.
pub mod columns {
    pub const SOURCE: &str = "Source";
    pub const SOURCE_COUNTRY: &str = "Source Country";
    pub const DEPLOYMENT_LOCATION: &str = "Deployment Location";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const DEPTH: &str = "Depth";
    pub const BODY_WAVE_MAGNITUDE: &str = "Body Wave Magnitude";
    pub const SURFACE_WAVE_MAGNITUDE: &str = "Surface Wave Magnitude";
    pub const YIELD_LOWER: &str = "Explosion Yield Lower";
    pub const YIELD_UPPER: &str = "Explosion Yield Upper";
    pub const DETONATION_REASON: &str = "Detonation Reason";
    pub const NAME: &str = "Name";
    pub const DETONATION_METHOD: &str = "Detonation Method";
    pub const DAY: &str = "Day";
    pub const MONTH: &str = "Month";
    pub const YEAR: &str = "Year";
}

/// Raw source header → stable name, in display order. The raw headers carry
/// the source file's own spelling (including its "Cordinates"/"Yeild" typos).
pub const RENAME_MAP: &[(&str, &str)] = &[
    ("Data.Source", columns::SOURCE),
    ("WEAPON SOURCE COUNTRY", columns::SOURCE_COUNTRY),
    ("WEAPON DEPLOYMENT LOCATION", columns::DEPLOYMENT_LOCATION),
    ("Location.Cordinates.Latitude", columns::LATITUDE),
    ("Location.Cordinates.Longitude", columns::LONGITUDE),
    ("Location.Cordinates.Depth", columns::DEPTH),
    ("Data.Magnitude.Body", columns::BODY_WAVE_MAGNITUDE),
    ("Data.Magnitude.Surface", columns::SURFACE_WAVE_MAGNITUDE),
    ("Data.Yeild.Lower", columns::YIELD_LOWER),
    ("Data.Yeild.Upper", columns::YIELD_UPPER),
    ("Data.Purpose", columns::DETONATION_REASON),
    ("Data.Name", columns::NAME),
    ("Data.Type", columns::DETONATION_METHOD),
    ("Date.Day", columns::DAY),
    ("Date.Month", columns::MONTH),
    ("Date.Year", columns::YEAR),
];

/// Stable column names in display order.
pub fn stable_columns() -> Vec<String> {
    RENAME_MAP.iter().map(|(_, s)| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural failure: the source table does not match the expected schema.
/// Fatal; the pipeline never runs on an unnormalized dataset.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("required column '{0}' is missing from the source table")]
    MissingColumn(String),
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Rename raw source headers to the stable scheme. Pure rename: no value
/// transformation, no row filtering. Headers already in stable form are
/// accepted as-is, so re-normalizing is a no-op. Columns outside the schema
/// are dropped.
///
/// Runs exactly once, at load time, before any other pipeline component.
pub fn normalize(
    headers: &[String],
    rows: Vec<Vec<CellValue>>,
) -> Result<Dataset, SchemaError> {
    // Map each header position to its stable name.
    let mut position_of: BTreeMap<&str, usize> = BTreeMap::new();
    for (idx, header) in headers.iter().enumerate() {
        position_of.insert(header.as_str(), idx);
    }

    let mut column_positions: Vec<(usize, &str)> = Vec::with_capacity(RENAME_MAP.len());
    for (raw, stable) in RENAME_MAP {
        let idx = position_of
            .get(raw)
            .or_else(|| position_of.get(stable))
            .ok_or_else(|| SchemaError::MissingColumn((*raw).to_string()))?;
        column_positions.push((*idx, *stable));
    }

    let records = rows
        .into_iter()
        .map(|row| {
            let mut fields = BTreeMap::new();
            for (idx, stable) in &column_positions {
                let value = row.get(*idx).cloned().unwrap_or(CellValue::Null);
                fields.insert((*stable).to_string(), value);
            }
            Record { fields }
        })
        .collect();

    Ok(Dataset::new(records, stable_columns()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_headers() -> Vec<String> {
        RENAME_MAP.iter().map(|(raw, _)| raw.to_string()).collect()
    }

    #[test]
    fn renames_raw_headers_to_stable_names() {
        let row: Vec<CellValue> = (0..RENAME_MAP.len() as i64).map(CellValue::Integer).collect();
        let ds = normalize(&raw_headers(), vec![row]).unwrap();

        assert_eq!(ds.column_names, stable_columns());
        assert_eq!(ds.len(), 1);
        // Date.Year is the last raw column.
        assert_eq!(
            ds.records[0].get(columns::YEAR),
            &CellValue::Integer(RENAME_MAP.len() as i64 - 1)
        );
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let mut headers = raw_headers();
        headers.retain(|h| h != "Date.Year");
        let err = normalize(&headers, Vec::new()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn(ref c) if c == "Date.Year"));
    }

    #[test]
    fn already_stable_headers_pass_through() {
        let headers = stable_columns();
        let row = vec![CellValue::Null; headers.len()];
        let ds = normalize(&headers, vec![row]).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn short_rows_pad_with_null() {
        let ds = normalize(&raw_headers(), vec![vec![CellValue::Integer(7)]]).unwrap();
        assert_eq!(ds.records[0].get(columns::SOURCE), &CellValue::Integer(7));
        assert!(ds.records[0].get(columns::YEAR).is_null());
    }
}
