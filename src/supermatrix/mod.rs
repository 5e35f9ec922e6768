mod concatenate;
mod fasta;
mod gap_fill;
mod label;
mod partition;
mod store;
mod universe;

pub use concatenate::{concatenate, GeneOrder, Supermatrix};
pub use fasta::{read_fasta, write_fasta, FastaRecord};
pub use gap_fill::{fill_gaps, FilledAlignments, FilledGene, GAP};
pub use label::{GeneLabeler, LabelScheme};
pub use partition::{ModelGroups, Partition, PartitionScheme};
pub use store::{AlignmentStore, GeneAlignment, LengthPolicy};
pub use universe::{GeneLengths, TaxonUniverse};
