use super::store::AlignmentStore;
use super::universe::{GeneLengths, TaxonUniverse};
use std::collections::HashMap;

pub const GAP: char = '-';

/// Alignment of one gene holding a sequence for every taxon of the universe.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledGene {
    pub label: String,
    pub length: usize,
    sequences: HashMap<String, String>,
}

impl FilledGene {
    pub fn sequence(&self, taxon: &str) -> Option<&str> {
        self.sequences.get(taxon).map(String::as_str)
    }

    #[cfg(test)]
    pub fn taxon_count(&self) -> usize {
        self.sequences.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilledAlignments {
    genes: Vec<FilledGene>,
    index: HashMap<String, usize>,
}

impl FilledAlignments {
    /// Genes in load order.
    pub fn genes(&self) -> &[FilledGene] {
        &self.genes
    }

    pub fn get(&self, label: &str) -> Option<&FilledGene> {
        self.index.get(label).map(|&idx| &self.genes[idx])
    }
}

/// Pads every gene with a gap-only sequence for each taxon it lacks.
pub fn fill_gaps(
    store: AlignmentStore,
    universe: &TaxonUniverse,
    lengths: &GeneLengths,
) -> FilledAlignments {
    let mut filled = FilledAlignments::default();
    for gene in store.into_genes() {
        let (label, mut sequences) = gene.into_sequences();
        let length = lengths.get(&label).unwrap_or(0);
        let mut n_missing = 0;
        for taxon in universe.iter() {
            if !sequences.contains_key(taxon) {
                sequences.insert(taxon.to_string(), GAP.to_string().repeat(length));
                n_missing += 1;
            }
        }
        if n_missing > 0 {
            log::debug!("{}: added placeholders for {} missing taxa", label, n_missing);
        }
        filled.index.insert(label.clone(), filled.genes.len());
        filled.genes.push(FilledGene {
            label,
            length,
            sequences,
        });
    }
    filled
}
