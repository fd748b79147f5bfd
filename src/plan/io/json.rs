use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};

use crate::plan::Plan;

impl Plan {
    /// Serialize the districts (center, members, names, population) as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("[Plan::to_json] Failed to serialize plan")
    }

    /// Write the JSON district report to `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("[Plan::write_json] Failed to create file: {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("[Plan::write_json] Failed to write plan to {}", path.display()))
    }
}
