use crate::busco::{read_descriptions, read_taxon_tables, write_single_copy_datasets, CoverageMatrix};
use crate::cli::SelectArgs;
use crate::utils::{
    create_writer, ensure_output_dir, open_list_reader, open_text_reader, BarProgress, Result,
};
use std::{io::Write, time};

pub fn select(args: SelectArgs) -> Result<()> {
    let start_timer = time::Instant::now();

    let tables = read_taxon_tables(open_list_reader(&args.label_list)?, &args.label_list)?;
    let descriptions = read_descriptions(
        open_text_reader(&args.busco_desc)?,
        &args.busco_desc.to_string_lossy(),
    )?;
    log::info!(
        "Computing coverage of {} BUSCO genes across {} taxa",
        descriptions.len(),
        tables.len()
    );

    let progress = BarProgress::new();
    let matrix = CoverageMatrix::load(descriptions, &tables, &progress)?;

    let retained = matrix.retained(args.taxa_coverage);
    log::info!(
        "Number of BUSCO genes with low taxa coverage: {}",
        matrix.rows().len() - retained.len()
    );

    let mut writer = create_writer(&args.out_matrix)?;
    matrix.write(&mut writer)?;
    writer
        .flush()
        .map_err(|e| format!("Failed to write {}: {}", args.out_matrix.display(), e))?;

    ensure_output_dir(&args.out_dir)?;
    let n_written =
        write_single_copy_datasets(&matrix, &retained, &tables, &args.out_dir, &progress)?;
    log::info!(
        "Wrote {} single-copy BUSCO datasets to {}",
        n_written,
        args.out_dir.display()
    );

    log::info!("Total execution time: {:.2?}", start_timer.elapsed());
    Ok(())
}
