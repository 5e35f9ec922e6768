use super::fasta::{read_fasta, FastaRecord};
use super::label::GeneLabeler;
use crate::utils::{open_text_reader, Progress, Result};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    str::FromStr,
};

/// How sequences whose length differs from the first record of their gene are handled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LengthPolicy {
    /// Log a warning and keep the sequence as is.
    #[default]
    Lenient,
    /// Reject the alignment.
    Strict,
}

impl FromStr for LengthPolicy {
    type Err = String;
    fn from_str(policy: &str) -> std::result::Result<Self, Self::Err> {
        match policy {
            "lenient" => Ok(LengthPolicy::Lenient),
            "strict" => Ok(LengthPolicy::Strict),
            _ => Err(format!("Invalid length policy: {}", policy)),
        }
    }
}

/// Raw alignment of one gene, as read from its file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneAlignment {
    label: String,
    source: PathBuf,
    taxa: Vec<String>,
    sequences: HashMap<String, String>,
}

impl GeneAlignment {
    pub fn from_records(
        label: impl Into<String>,
        source: impl Into<PathBuf>,
        records: Vec<FastaRecord>,
        policy: LengthPolicy,
    ) -> Result<Self> {
        let label = label.into();
        let source = source.into();
        if records.is_empty() {
            return Err(format!(
                "Alignment {} contains no sequences: {}",
                label,
                source.display()
            ));
        }

        let mut taxa = Vec::with_capacity(records.len());
        let mut sequences = HashMap::with_capacity(records.len());
        for FastaRecord { id, seq } in records {
            if sequences.contains_key(&id) {
                log::warn!(
                    "Taxon {} occurs more than once in {}, keeping the last record",
                    id,
                    source.display()
                );
            } else {
                taxa.push(id.clone());
            }
            sequences.insert(id, seq);
        }

        let alignment = GeneAlignment {
            label,
            source,
            taxa,
            sequences,
        };
        alignment.check_lengths(policy)?;
        Ok(alignment)
    }

    fn check_lengths(&self, policy: LengthPolicy) -> Result<()> {
        let expected = self.canonical_length();
        for taxon in &self.taxa {
            let len = self.sequences[taxon].len();
            if len == expected {
                continue;
            }
            let msg = format!(
                "Sequence of {} in alignment {} has length {}, expected {} ({})",
                taxon,
                self.label,
                len,
                expected,
                self.source.display()
            );
            match policy {
                LengthPolicy::Strict => return Err(msg),
                LengthPolicy::Lenient => log::warn!("{}", msg),
            }
        }
        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Length of the first record of the file.
    pub fn canonical_length(&self) -> usize {
        self.taxa
            .first()
            .and_then(|taxon| self.sequences.get(taxon))
            .map_or(0, |seq| seq.len())
    }

    /// Taxa in file order.
    pub fn taxa(&self) -> impl Iterator<Item = &str> {
        self.taxa.iter().map(String::as_str)
    }

    pub fn sequence(&self, taxon: &str) -> Option<&str> {
        self.sequences.get(taxon).map(String::as_str)
    }

    pub(crate) fn into_sequences(self) -> (String, HashMap<String, String>) {
        (self.label, self.sequences)
    }
}

/// All gene alignments of a run, in load order.
#[derive(Debug, Default)]
pub struct AlignmentStore {
    genes: Vec<GeneAlignment>,
    index: HashMap<String, usize>,
}

impl AlignmentStore {
    pub fn load<P: AsRef<Path>>(
        paths: &[P],
        labeler: &dyn GeneLabeler,
        policy: LengthPolicy,
        progress: &dyn Progress,
    ) -> Result<Self> {
        progress.start("Reading", paths.len());
        let mut genes = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let label = labeler.label(path)?;
            let reader = open_text_reader(path)?;
            let records = read_fasta(reader, &path.to_string_lossy())?;
            log::debug!("Read {} sequences for {} from {}", records.len(), label, path.display());
            genes.push(GeneAlignment::from_records(label, path, records, policy)?);
            progress.file_read(path);
        }
        progress.finish();
        Ok(Self::from_genes(genes))
    }

    /// A later gene with an already seen label replaces the earlier one in place.
    pub fn from_genes(genes: impl IntoIterator<Item = GeneAlignment>) -> Self {
        let mut store = AlignmentStore::default();
        for gene in genes {
            match store.index.get(gene.label()) {
                Some(&idx) => {
                    log::warn!(
                        "Gene label {} from {} collides with {}, keeping the later file",
                        gene.label(),
                        gene.source().display(),
                        store.genes[idx].source().display()
                    );
                    store.genes[idx] = gene;
                }
                None => {
                    store.index.insert(gene.label().to_string(), store.genes.len());
                    store.genes.push(gene);
                }
            }
        }
        store
    }

    pub fn genes(&self) -> &[GeneAlignment] {
        &self.genes
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&GeneAlignment> {
        self.index.get(label).map(|&idx| &self.genes[idx])
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub(crate) fn into_genes(self) -> Vec<GeneAlignment> {
        self.genes
    }
}

#[cfg(test)]
pub(crate) fn gene(label: &str, records: &[(&str, &str)]) -> GeneAlignment {
    let records = records
        .iter()
        .map(|(id, seq)| FastaRecord {
            id: id.to_string(),
            seq: seq.to_string(),
        })
        .collect();
    GeneAlignment::from_records(label, format!("{}.fa", label), records, LengthPolicy::Strict)
        .unwrap()
}
