mod coverage;
mod dataset;
mod status;
mod tables;

pub use coverage::{coverage_percent, CoverageMatrix, GeneCoverage, TaxonStatuses};
pub use dataset::{
    write_single_copy_datasets, SingleCopyDataset, DATASET_EXTENSION, DATASET_LINE_WIDTH,
};
pub use status::BuscoStatus;
pub use tables::{
    load_full_table, read_descriptions, read_full_table, read_taxon_tables, BuscoDescription,
    TaxonTable,
};
