//! CSV writing operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{CsvWriter, NamedFrom}, series::Series};

use crate::types::GeoId;

/// Write a DataFrame to a CSV file.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::csv::write] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))
}

/// Write a DataFrame to a CSV string.
pub(crate) fn write_csv_string(df: &mut DataFrame) -> Result<String> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .finish(df)
        .with_context(|| "[io::csv::write] Failed to write CSV to string")?;
    String::from_utf8(buffer)
        .with_context(|| "[io::csv::write] CSV output is not valid UTF-8")
}

/// Build a `geo_id,district` DataFrame from (GeoId, district) tuples.
fn labels_frame(labels: &[(GeoId, u32)]) -> Result<DataFrame> {
    let (geo_ids, districts) = labels.iter()
        .map(|(geo_id, district)| (geo_id.id().to_string(), *district))
        .unzip::<_, _, Vec<_>, Vec<_>>();

    Ok(DataFrame::new(vec![
        Series::new("geo_id".into(), geo_ids).into(),
        Series::new("district".into(), districts).into(),
    ])?)
}

/// Write district labels to a CSV file.
pub(crate) fn write_district_labels(labels: &[(GeoId, u32)], path: &Path) -> Result<()> {
    write_csv(&mut labels_frame(labels)?, path)
}

/// Write district labels to a CSV string.
pub(crate) fn write_district_labels_string(labels: &[(GeoId, u32)]) -> Result<String> {
    write_csv_string(&mut labels_frame(labels)?)
}
