use super::status::BuscoStatus;
use super::tables::{load_full_table, BuscoDescription, TaxonTable};
use crate::utils::{Progress, Result};
use itertools::Itertools;
use std::{collections::HashMap, io::Write, path::PathBuf};

/// Statuses of all BUSCO genes for one taxon.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonStatuses {
    pub label: String,
    pub source: PathBuf,
    pub statuses: HashMap<String, BuscoStatus>,
}

impl TaxonStatuses {
    pub fn load(table: &TaxonTable) -> Result<Self> {
        Ok(TaxonStatuses {
            label: table.label.clone(),
            source: table.full_table.clone(),
            statuses: load_full_table(&table.full_table)?,
        })
    }
}

/// One row of the coverage matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneCoverage {
    pub busco_id: String,
    pub url: String,
    pub description: String,
    /// One status per taxon, in the column order of the matrix.
    pub statuses: Vec<BuscoStatus>,
    pub complete: usize,
    /// Percentage of taxa with a complete copy, rounded to two decimals.
    pub coverage: f64,
}

impl GeneCoverage {
    pub fn passes(&self, threshold: u8) -> bool {
        self.coverage >= f64::from(threshold)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

pub fn coverage_percent(complete: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(complete as f64 / total as f64 * 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMatrix {
    taxa: Vec<String>,
    rows: Vec<GeneCoverage>,
}

impl CoverageMatrix {
    pub fn new(descriptions: Vec<BuscoDescription>, columns: &[TaxonStatuses]) -> Result<Self> {
        if columns.is_empty() {
            return Err("No taxa given to compute BUSCO coverage".to_string());
        }
        let taxa: Vec<String> = columns.iter().map(|c| c.label.clone()).collect();
        let mut rows = Vec::with_capacity(descriptions.len());
        for BuscoDescription {
            busco_id,
            description,
            url,
        } in descriptions
        {
            let statuses = columns
                .iter()
                .map(|column| {
                    column.statuses.get(&busco_id).copied().ok_or_else(|| {
                        format!(
                            "BUSCO {} is missing from the results of {}: {}",
                            busco_id,
                            column.label,
                            column.source.display()
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let complete = statuses.iter().filter(|s| s.is_present()).count();
            rows.push(GeneCoverage {
                busco_id,
                url,
                description,
                coverage: coverage_percent(complete, taxa.len()),
                statuses,
                complete,
            });
        }
        Ok(CoverageMatrix { taxa, rows })
    }

    /// Reads the `full_table.tsv` of every taxon and builds the matrix.
    pub fn load(
        descriptions: Vec<BuscoDescription>,
        tables: &[TaxonTable],
        progress: &dyn Progress,
    ) -> Result<Self> {
        progress.start("Reading", tables.len());
        let mut columns = Vec::with_capacity(tables.len());
        for table in tables {
            columns.push(TaxonStatuses::load(table)?);
            progress.file_read(&table.full_table);
        }
        progress.finish();
        Self::new(descriptions, &columns)
    }

    pub fn taxa(&self) -> &[String] {
        &self.taxa
    }

    pub fn rows(&self) -> &[GeneCoverage] {
        &self.rows
    }

    #[cfg(test)]
    pub fn status(&self, busco_id: &str, taxon: &str) -> Option<BuscoStatus> {
        let column = self.taxa.iter().position(|t| t == taxon)?;
        self.rows
            .iter()
            .find(|row| row.busco_id == busco_id)
            .map(|row| row.statuses[column])
    }

    /// Genes whose coverage reaches `threshold` percent.
    pub fn retained(&self, threshold: u8) -> Vec<&GeneCoverage> {
        self.rows.iter().filter(|row| row.passes(threshold)).collect()
    }

    /// Writes every gene, kept or not, as a tab-separated table.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let to_err = |e: std::io::Error| format!("Failed to write coverage matrix: {}", e);
        writeln!(
            writer,
            "\tOrthoDB_URL\tDesc\tNo_taxa\tCoverage%\t{}",
            self.taxa.iter().join("\t")
        )
        .map_err(to_err)?;
        for row in &self.rows {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{:.2}\t{}",
                row.busco_id,
                row.url,
                row.description,
                row.complete,
                row.coverage,
                row.statuses.iter().join("\t")
            )
            .map_err(to_err)?;
        }
        Ok(())
    }
}
