use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::Serialize;

use fermigraph_core::models::Assembly;

use crate::decode::handlers::load_assembly;

#[derive(Serialize)]
pub struct AssemblySummary {
    pub contigs: usize,
    pub connections: usize,
    pub total_length: u64,
    pub size_statistic: usize,
}

impl AssemblySummary {
    pub fn from_assembly(assembly: &Assembly) -> Result<Self> {
        Ok(AssemblySummary {
            contigs: assembly.len(),
            connections: assembly.connection_count(),
            total_length: assembly.total_length(),
            size_statistic: assembly.size_statistic()?,
        })
    }

    pub fn to_table(&self) -> String {
        format!(
            "contigs\t{}\nconnections\t{}\ntotal_length\t{}\nsize_statistic\t{}",
            self.contigs, self.connections, self.total_length, self.size_statistic
        )
    }
}

pub fn run_stats(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to an assembly buffer is required.")?;

    let assembly = load_assembly(input)?;
    let summary = AssemblySummary::from_assembly(&assembly)?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.to_table());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use fermigraph_core::models::Contig;
    use serde_json::json;

    #[rstest]
    fn test_summary() {
        let contigs = [10, 20, 70]
            .iter()
            .map(|&len| Contig::new(vec![b'C'; len], vec![1; len], 1).unwrap())
            .collect();
        let summary = AssemblySummary::from_assembly(&Assembly::new(contigs).unwrap()).unwrap();

        assert_eq!(summary.total_length, 100);
        assert_eq!(summary.size_statistic, 70);
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({"contigs": 3, "connections": 0, "total_length": 100, "size_statistic": 70})
        );
        assert_eq!(
            summary.to_table(),
            "contigs\t3\nconnections\t0\ntotal_length\t100\nsize_statistic\t70"
        );
    }
}
