use std::path::Path;

use anyhow::Result;

use crate::plan::Plan;

impl Plan {
    /// Write a `geo_id,district` CSV with labels in `[0, k)` for every county.
    pub fn write_labels_csv(&self, path: &Path) -> Result<()> {
        crate::io::csv::write_district_labels(&self.labels(), path)
    }

    /// Generate the `geo_id,district` CSV as a string.
    pub fn to_labels_csv(&self) -> Result<String> {
        crate::io::csv::write_district_labels_string(&self.labels())
    }
}
