use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset};
use super::schema;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the detonation dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – delimited text with the raw source headers (recommended)
/// * `.json` – records-oriented array of objects
///
/// Headers are normalized to the stable column scheme before the dataset is
/// handed out; a missing required column aborts the load.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

/// Parse a CSV stream: header row with the raw column names, then one record
/// per row. Cell types are inferred per cell; empty cells become `Null`.
pub fn parse_csv<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    schema::normalize(&headers, rows).context("normalizing CSV schema")
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "WEAPON SOURCE COUNTRY": "USA", "Date.Year": 1945, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    // Collect the header set from the first record; every raw column the
    // schema requires must appear there.
    let headers: Vec<String> = records
        .first()
        .and_then(|r| r.as_object())
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default();

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let row: Vec<CellValue> = headers
            .iter()
            .map(|h| obj.get(h).map_or(CellValue::Null, json_to_cell))
            .collect();
        rows.push(row);
    }

    schema::normalize(&headers, rows).context("normalizing JSON schema")
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::columns;

    const SAMPLE_CSV: &str = "\
WEAPON SOURCE COUNTRY,WEAPON DEPLOYMENT LOCATION,Data.Source,Location.Cordinates.Latitude,Location.Cordinates.Longitude,Location.Cordinates.Depth,Data.Magnitude.Body,Data.Magnitude.Surface,Data.Yeild.Lower,Data.Yeild.Upper,Data.Purpose,Data.Name,Data.Type,Date.Day,Date.Month,Date.Year
USA,Hiroshima,DOE,34.23,132.27,-0.6,0.0,0.0,15.0,15.0,Combat,Little Boy,Airdrop,6,8,1945
USSR,Semi Kazakh,MIC,50.0,78.0,0.0,,,400.0,400.0,Wr,Joe 1,Tower,29,8,1949
USA,Bikini,DOE,,,0.0,0.0,0.0,15000.0,15000.0,Wr,Bravo,Surface,1,3,1954
";

    #[test]
    fn csv_rows_come_back_typed_and_normalized() {
        let ds = parse_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].text(columns::SOURCE_COUNTRY), Some("USA"));
        assert_eq!(ds.records[0].number(columns::YEAR), Some(1945.0));
        assert_eq!(ds.records[1].number(columns::LATITUDE), Some(50.0));
        // Empty cells become Null.
        assert!(ds.records[1].get(columns::BODY_WAVE_MAGNITUDE).is_null());
        assert!(ds.records[2].get(columns::LATITUDE).is_null());
    }

    #[test]
    fn csv_missing_required_column_fails() {
        let bad = "Date.Year,Data.Purpose\n1945,Combat\n";
        assert!(parse_csv(bad.as_bytes()).is_err());
    }

    #[test]
    fn json_records_round_into_a_dataset() {
        let mut obj = serde_json::Map::new();
        for (raw, _) in crate::data::schema::RENAME_MAP {
            obj.insert((*raw).to_string(), serde_json::json!(1));
        }
        obj.insert("Date.Year".into(), serde_json::json!(1962));
        obj.insert("Data.Purpose".into(), serde_json::json!("We"));
        let text = serde_json::to_string(&vec![JsonValue::Object(obj)]).unwrap();

        let ds = parse_json(&text).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].number(columns::YEAR), Some(1962.0));
        assert_eq!(ds.records[0].text(columns::DETONATION_REASON), Some("We"));
    }
}
