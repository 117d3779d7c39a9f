use super::model::Dataset;

/// Display radius divisor for threshold extraction (yield kilotons → point
/// radius). Purely a rendering scale, no semantic meaning.
pub const RADIUS_SCALE: f64 = 10.0;

// ---------------------------------------------------------------------------
// Threshold extraction
// ---------------------------------------------------------------------------

/// A record exceeding the threshold, paired with its derived display radius.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdHit {
    pub index: usize,
    pub value: f64,
    pub radius: f64,
}

/// Return records whose numeric value in `column` strictly exceeds
/// `threshold`, each with radius = value / [`RADIUS_SCALE`].
///
/// Missing values are excluded. No record above the threshold is a normal
/// outcome and yields an empty view.
pub fn above_threshold(dataset: &Dataset, column: &str, threshold: f64) -> Vec<ThresholdHit> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter_map(|(index, rec)| {
            let value = rec.number(column)?;
            (value > threshold).then_some(ThresholdHit {
                index,
                value,
                radius: value / RADIUS_SCALE,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Geographic projection
// ---------------------------------------------------------------------------

/// One plottable map point: position plus the attribute shown in tooltips.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    /// Row index back into the dataset, for attribute lookups at render time.
    pub index: usize,
}

/// The map-ready view of a filtered record set.
#[derive(Debug, Clone, Default)]
pub struct GeoPoints {
    pub points: Vec<GeoPoint>,
}

impl GeoPoints {
    /// Arithmetic mean of the retained latitudes/longitudes, for initial map
    /// framing. `None` when no point survived coordinate filtering — the
    /// caller substitutes its default viewport instead of dividing by zero.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let (lat_sum, lon_sum) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(la, lo), p| (la + p.lat, lo + p.lon));
        Some((lat_sum / n, lon_sum / n))
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Project the given rows onto the map plane: rows missing latitude or
/// longitude are dropped, everything else becomes a [`GeoPoint`].
pub fn project(dataset: &Dataset, indices: &[usize], lat_col: &str, lon_col: &str) -> GeoPoints {
    let points = indices
        .iter()
        .filter_map(|&index| {
            let rec = &dataset.records[index];
            let lat = rec.number(lat_col)?;
            let lon = rec.number(lon_col)?;
            Some(GeoPoint { lat, lon, index })
        })
        .collect();
    GeoPoints { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};
    use crate::data::schema::columns;
    use std::collections::BTreeMap;

    fn geo_record(lat: Option<f64>, lon: Option<f64>, yield_lower: f64) -> Record {
        let mut fields = BTreeMap::new();
        fields.insert(
            columns::LATITUDE.to_string(),
            lat.map_or(CellValue::Null, CellValue::Float),
        );
        fields.insert(
            columns::LONGITUDE.to_string(),
            lon.map_or(CellValue::Null, CellValue::Float),
        );
        fields.insert(columns::YIELD_LOWER.to_string(), CellValue::Float(yield_lower));
        Record { fields }
    }

    fn dataset(rows: Vec<Record>) -> Dataset {
        Dataset::new(
            rows,
            vec![
                columns::LATITUDE.to_string(),
                columns::LONGITUDE.to_string(),
                columns::YIELD_LOWER.to_string(),
            ],
        )
    }

    #[test]
    fn threshold_keeps_strictly_exceeding_records() {
        let ds = dataset(vec![
            geo_record(Some(0.0), Some(0.0), 500.0),
            geo_record(Some(0.0), Some(0.0), 1500.0),
            geo_record(Some(0.0), Some(0.0), 2000.0),
        ]);
        let hits = above_threshold(&ds, columns::YIELD_LOWER, 1000.0);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].radius, 150.0);
        assert_eq!(hits[1].radius, 200.0);
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        let ds = dataset(vec![geo_record(Some(0.0), Some(0.0), 1000.0)]);
        assert!(above_threshold(&ds, columns::YIELD_LOWER, 1000.0).is_empty());
    }

    #[test]
    fn radii_are_monotone_in_value() {
        let ds = dataset(vec![
            geo_record(None, None, 20.0),
            geo_record(None, None, 300.0),
            geo_record(None, None, 4500.0),
        ]);
        let hits = above_threshold(&ds, columns::YIELD_LOWER, 10.0);
        for pair in hits.windows(2) {
            assert!(pair[0].value < pair[1].value);
            assert!(pair[0].radius < pair[1].radius);
        }
    }

    #[test]
    fn projection_drops_rows_missing_coordinates() {
        let ds = dataset(vec![
            geo_record(Some(37.0), Some(-116.0), 0.0),
            geo_record(None, Some(10.0), 0.0),
            geo_record(Some(50.0), None, 0.0),
            geo_record(Some(73.0), Some(54.0), 0.0),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let geo = project(&ds, &indices, columns::LATITUDE, columns::LONGITUDE);
        assert_eq!(geo.points.len(), 2);
        assert_eq!(geo.points[0].index, 0);
        assert_eq!(geo.points[1].index, 3);
    }

    #[test]
    fn centroid_is_the_arithmetic_mean() {
        let ds = dataset(vec![
            geo_record(Some(10.0), Some(20.0), 0.0),
            geo_record(Some(30.0), Some(-40.0), 0.0),
        ]);
        let geo = project(&ds, &[0, 1], columns::LATITUDE, columns::LONGITUDE);
        assert_eq!(geo.centroid(), Some((20.0, -10.0)));
    }

    #[test]
    fn empty_projection_has_no_centroid() {
        let ds = dataset(vec![geo_record(None, None, 0.0)]);
        let geo = project(&ds, &[0], columns::LATITUDE, columns::LONGITUDE);
        assert!(geo.is_empty());
        assert_eq!(geo.centroid(), None);
    }
}
