use super::fasta::write_fasta;
use super::gap_fill::{FilledAlignments, FilledGene};
use super::partition::ModelGroups;
use super::universe::TaxonUniverse;
use crate::utils::Result;
use std::{collections::HashSet, io::Write};

/// Order in which genes are joined.
#[derive(Debug, Clone, Copy)]
pub enum GeneOrder<'a> {
    /// Load order of the alignment files.
    Loaded,
    /// Models in list order, genes within a model in list order.
    Partitioned(&'a ModelGroups),
}

/// Concatenated alignment: one row per taxon.
#[derive(Debug, Clone, PartialEq)]
pub struct Supermatrix {
    rows: Vec<(String, String)>,
    genes: Vec<String>,
    width: usize,
}

impl Supermatrix {
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows.iter().map(|(t, s)| (t.as_str(), s.as_str()))
    }

    pub fn get(&self, taxon: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(t, _)| t == taxon)
            .map(|(_, s)| s.as_str())
    }

    /// Gene labels in concatenation order.
    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    /// Sum of the lengths of the concatenated genes.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn taxon_count(&self) -> usize {
        self.rows.len()
    }

    /// Writes one unwrapped FASTA record per taxon.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_fasta(writer, self.rows(), None)
    }
}

fn ordered_genes<'a>(
    filled: &'a FilledAlignments,
    order: GeneOrder<'_>,
) -> Result<Vec<&'a FilledGene>> {
    match order {
        GeneOrder::Loaded => Ok(filled.genes().iter().collect()),
        GeneOrder::Partitioned(groups) => {
            let genes = groups
                .gene_order()
                .map(|label| {
                    filled.get(label).ok_or_else(|| {
                        format!("Alignment {} listed in the model list was not loaded", label)
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let listed: HashSet<&str> = genes.iter().map(|g| g.label.as_str()).collect();
            let n_unlisted = filled
                .genes()
                .iter()
                .filter(|g| !listed.contains(g.label.as_str()))
                .count();
            if n_unlisted > 0 {
                log::warn!(
                    "{} loaded alignments are not listed in the model list and were left out",
                    n_unlisted
                );
            }
            Ok(genes)
        }
    }
}

pub fn concatenate(
    filled: &FilledAlignments,
    universe: &TaxonUniverse,
    order: GeneOrder<'_>,
) -> Result<Supermatrix> {
    let genes = ordered_genes(filled, order)?;
    let width: usize = genes.iter().map(|g| g.length).sum();

    let mut rows = Vec::with_capacity(universe.len());
    for taxon in universe.iter() {
        let mut row = String::with_capacity(width);
        for gene in &genes {
            let seq = gene.sequence(taxon).ok_or_else(|| {
                format!("Taxon {} has no sequence in alignment {}", taxon, gene.label)
            })?;
            row.push_str(seq);
        }
        if row.len() != width {
            log::warn!(
                "Concatenated sequence of {} has length {}, expected {}",
                taxon,
                row.len(),
                width
            );
        }
        rows.push((taxon.to_string(), row));
    }

    Ok(Supermatrix {
        rows,
        genes: genes.iter().map(|g| g.label.clone()).collect(),
        width,
    })
}
