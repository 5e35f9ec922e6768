use super::coverage::{CoverageMatrix, GeneCoverage};
use super::tables::TaxonTable;
use crate::supermatrix::{read_fasta, write_fasta, FastaRecord};
use crate::utils::{create_dataset_writer, open_text_reader, Progress, Result};
use std::{io::Write, path::Path};

pub const DATASET_LINE_WIDTH: usize = 80;
pub const DATASET_EXTENSION: &str = "faa";

/// Sequences of one BUSCO gene from every taxon where it is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleCopyDataset {
    pub busco_id: String,
    pub records: Vec<FastaRecord>,
}

impl SingleCopyDataset {
    /// `tables` must be in the column order of the matrix the gene comes from.
    pub fn collect(gene: &GeneCoverage, tables: &[TaxonTable]) -> Result<Self> {
        let mut records = Vec::with_capacity(gene.complete);
        for (table, status) in tables.iter().zip(&gene.statuses) {
            if !status.is_present() {
                continue;
            }
            let path = table
                .single_copy_dir()
                .join(format!("{}.{}", gene.busco_id, DATASET_EXTENSION));
            records.push(FastaRecord {
                id: table.label.clone(),
                seq: read_single_copy_sequence(&path)?,
            });
        }
        Ok(SingleCopyDataset {
            busco_id: gene.busco_id.clone(),
            records,
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_fasta(
            writer,
            self.records.iter().map(|r| (r.id.as_str(), r.seq.as_str())),
            Some(DATASET_LINE_WIDTH),
        )
    }
}

/// Joins all sequence lines of a BUSCO single-copy sequence file, uppercased.
fn read_single_copy_sequence(path: &Path) -> Result<String> {
    let reader = open_text_reader(path)?;
    let records = read_fasta(reader, &path.to_string_lossy())?;
    if records.is_empty() {
        return Err(format!("No sequence found in {}", path.display()));
    }
    Ok(records
        .iter()
        .map(|r| r.seq.as_str())
        .collect::<String>()
        .to_uppercase())
}

/// Writes `<busco_id>.faa` into `output_dir` for every retained gene.
pub fn write_single_copy_datasets(
    matrix: &CoverageMatrix,
    retained: &[&GeneCoverage],
    tables: &[TaxonTable],
    output_dir: &Path,
    progress: &dyn Progress,
) -> Result<usize> {
    if matrix.taxa().len() != tables.len()
        || matrix.taxa().iter().zip(tables).any(|(t, table)| *t != table.label)
    {
        return Err("Taxon tables do not match the coverage matrix columns".to_string());
    }

    progress.start("Writing", retained.len());
    let mut n_written = 0;
    for gene in retained {
        let dataset = SingleCopyDataset::collect(gene, tables)?;
        if dataset.records.is_empty() {
            log::debug!("No complete copy of {}, skipping", gene.busco_id);
            continue;
        }
        let (path, mut writer) =
            create_dataset_writer(output_dir, &dataset.busco_id, DATASET_EXTENSION)?;
        dataset.write(&mut writer)?;
        writer
            .flush()
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        progress.gene_written(&dataset.busco_id);
        n_written += 1;
    }
    progress.finish();
    Ok(n_written)
}
