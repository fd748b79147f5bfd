//! CSV reading operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result, anyhow, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::CsvReadOptions};

use crate::graph::PopulationTable;

/// Reads a headerless CSV file from `path` with every column kept as a string.
pub(crate) fn read_raw_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))
}

/// Read county populations for one state from a population DataFrame.
///
/// The DataFrame should have three columns: state FIPS code, county long name, population.
/// Rows for other states (and any header row) are skipped.
pub(crate) fn read_population_table(df: DataFrame, state_fips: &str) -> Result<PopulationTable> {
    ensure!(df.width() >= 3, "[io::csv::read] population CSV must have three columns: state,county,population");

    let columns = df.get_columns();
    let codes = columns[0].str()?;
    let names = columns[1].str()?;
    let pops = columns[2].str()?;

    let mut table = PopulationTable::default();
    for ((code, name), pop) in codes.into_iter().zip(names.into_iter()).zip(pops.into_iter()) {
        let (Some(code), Some(name)) = (code, name) else { continue };
        if code.trim() != state_fips { continue }

        let pop = pop
            .ok_or_else(|| anyhow!("[io::csv::read] missing population for {name}"))?
            .trim()
            .parse::<u64>()
            .with_context(|| format!("[io::csv::read] invalid population for {name}"))?;
        table.insert(name.trim(), pop);
    }

    Ok(table)
}

/// Load the county population table for one state from a CSV file.
pub fn read_populations(path: &Path, state_fips: &str) -> Result<PopulationTable> {
    read_population_table(read_raw_csv(path)?, state_fips)
        .with_context(|| format!("[io::csv::read] Failed to load populations from {}", path.display()))
}
