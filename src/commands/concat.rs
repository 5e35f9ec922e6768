use crate::cli::ConcatArgs;
use crate::supermatrix::{
    concatenate, fill_gaps, AlignmentStore, GeneOrder, ModelGroups, PartitionScheme, TaxonUniverse,
};
use crate::utils::{
    create_writer, open_list_reader, open_text_reader, read_path_list, BarProgress, Result,
};
use std::{io::Write, path::Path, time};

pub fn concat(args: ConcatArgs) -> Result<()> {
    let start_timer = time::Instant::now();

    let list_reader = open_list_reader(&args.alignment_list)?;
    let paths = read_path_list(list_reader, &args.alignment_list)?;
    if paths.is_empty() {
        return Err(format!("No alignment files listed in {}", args.alignment_list));
    }

    let progress = BarProgress::new();
    let store = AlignmentStore::load(&paths, &args.label_scheme, args.length_policy, &progress)?;
    let (lengths, universe) = TaxonUniverse::resolve(&store);
    log::info!(
        "Loaded {} alignments covering {} taxa",
        store.len(),
        universe.len()
    );
    let filled = fill_gaps(store, &universe, &lengths);

    let model_groups = args
        .model_list
        .as_deref()
        .map(|path| read_model_groups(path, &args))
        .transpose()?;
    let order = match &model_groups {
        Some(groups) => GeneOrder::Partitioned(groups),
        None => GeneOrder::Loaded,
    };
    let matrix = concatenate(&filled, &universe, order)?;

    let mut writer = create_writer(&args.output_path)?;
    matrix.write(&mut writer)?;
    writer
        .flush()
        .map_err(|e| format!("Failed to write {}: {}", args.output_path.display(), e))?;
    log::info!(
        "Wrote supermatrix of {} taxa x {} columns from {} genes to {}",
        matrix.taxon_count(),
        matrix.width(),
        matrix.genes().len(),
        args.output_path.display()
    );

    if let Some(groups) = &model_groups {
        let scheme = PartitionScheme::new(groups, &lengths)?;
        let mut writer = create_writer(&args.partition_scheme)?;
        scheme.write(&mut writer)?;
        writer.flush().map_err(|e| {
            format!("Failed to write {}: {}", args.partition_scheme.display(), e)
        })?;
        log::info!(
            "Wrote {} partitions to {}",
            scheme.partitions().len(),
            args.partition_scheme.display()
        );
    }

    log::info!("Total execution time: {:.2?}", start_timer.elapsed());
    Ok(())
}

fn read_model_groups(path: &Path, args: &ConcatArgs) -> Result<ModelGroups> {
    let reader = open_text_reader(path)?;
    let groups = ModelGroups::from_reader(reader, &path.to_string_lossy(), &args.label_scheme)?;
    log::debug!("Read {} models from {}", groups.len(), path.display());
    Ok(groups)
}
