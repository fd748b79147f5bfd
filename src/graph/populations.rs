use ahash::AHashMap;
use anyhow::{Result, bail};
use tracing::debug;

use crate::graph::CountyGraph;

/// County populations keyed by canonical long name, e.g. "Adams County".
#[derive(Debug, Clone, Default)]
pub struct PopulationTable {
    by_name: AHashMap<String, u64>,
}

impl PopulationTable {
    pub fn insert(&mut self, name: &str, population: u64) {
        self.by_name.insert(canonical_county_name(name).to_string(), population);
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.by_name.get(canonical_county_name(name)).copied()
    }

    #[inline] pub fn len(&self) -> usize { self.by_name.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.by_name.is_empty() }
}

impl FromIterator<(String, u64)> for PopulationTable {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (name, population) in iter { table.insert(&name, population) }
        table
    }
}

/// Census name spellings that differ between the geography and population releases.
fn canonical_county_name(name: &str) -> &str {
    match name {
        "La Salle Parish" => "LaSalle Parish",
        other => other,
    }
}

impl CountyGraph {
    /// Overwrite every county's population from `table`, matching by long name.
    /// Counties whose long name has a canonical spelling are renamed to it.
    pub fn attach_populations(&mut self, table: &PopulationTable) -> Result<()> {
        let mut missing = Vec::new();
        for county in self.counties_mut() {
            let canonical = canonical_county_name(&county.long_name);
            if canonical != county.long_name {
                debug!("[graph::populations] renaming {} to {canonical}", county.long_name);
                county.long_name = canonical.to_string();
            }

            match table.get(&county.long_name) {
                Some(population) => county.population = population,
                None => missing.push(county.long_name.clone()),
            }
        }

        if !missing.is_empty() {
            bail!("[graph::populations] no population found for {}", missing.join(", "));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::County;

    fn parishes() -> CountyGraph {
        CountyGraph::from_edges(
            vec![
                County::new("22001", "Acadia", 0).with_long_name("Acadia Parish"),
                County::new("22059", "La Salle", 0).with_long_name("La Salle Parish"),
            ],
            &[(0, 1)],
        ).unwrap()
    }

    #[test]
    fn populations_are_attached_by_long_name() {
        let mut graph = parishes();
        let table = [("Acadia Parish".to_string(), 57576), ("LaSalle Parish".to_string(), 14791)]
            .into_iter()
            .collect::<PopulationTable>();

        graph.attach_populations(&table).unwrap();

        assert_eq!(graph.population(0), 57576);
        assert_eq!(graph.population(1), 14791);
        assert_eq!(graph.county(1).long_name, "LaSalle Parish");
    }

    #[test]
    fn lookups_accept_either_spelling() {
        let table = [("La Salle Parish".to_string(), 5)].into_iter().collect::<PopulationTable>();
        assert_eq!(table.get("LaSalle Parish"), Some(5));
        assert_eq!(table.get("La Salle Parish"), Some(5));
    }

    #[test]
    fn missing_county_is_an_error() {
        let mut graph = parishes();
        let table = [("Acadia Parish".to_string(), 1)].into_iter().collect::<PopulationTable>();

        let err = graph.attach_populations(&table).unwrap_err();
        assert!(err.to_string().contains("LaSalle Parish"));
    }
}
