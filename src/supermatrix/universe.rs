use super::store::AlignmentStore;
use std::collections::{HashMap, HashSet};

/// Canonical alignment length of every gene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneLengths {
    lengths: HashMap<String, usize>,
}

impl GeneLengths {
    pub fn get(&self, label: &str) -> Option<usize> {
        self.lengths.get(label).copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

impl FromIterator<(String, usize)> for GeneLengths {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        GeneLengths {
            lengths: iter.into_iter().collect(),
        }
    }
}

/// Union of the taxa of all raw alignments, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxonUniverse {
    taxa: Vec<String>,
}

impl TaxonUniverse {
    pub fn resolve(store: &AlignmentStore) -> (GeneLengths, TaxonUniverse) {
        let mut seen = HashSet::new();
        let mut taxa = Vec::new();
        let mut lengths = HashMap::with_capacity(store.len());
        for gene in store.genes() {
            lengths.insert(gene.label().to_string(), gene.canonical_length());
            for taxon in gene.taxa() {
                if seen.insert(taxon) {
                    taxa.push(taxon.to_string());
                }
            }
        }
        log::debug!("Resolved {} taxa across {} genes", taxa.len(), store.len());
        (GeneLengths { lengths }, TaxonUniverse { taxa })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.taxa.iter().map(String::as_str)
    }

    #[cfg(test)]
    pub fn contains(&self, taxon: &str) -> bool {
        self.taxa.iter().any(|t| t == taxon)
    }

    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }
}
