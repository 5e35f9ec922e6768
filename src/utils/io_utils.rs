use crate::utils::Result;
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

pub fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create output file {}: {}", path.display(), e))?;
    Ok(BufWriter::new(file))
}

/// Writer for `<output_dir>/<stem>.<extension>`.
pub fn create_dataset_writer(
    output_dir: &Path,
    stem: &str,
    extension: &str,
) -> Result<(PathBuf, BufWriter<File>)> {
    let output_path = output_dir.join(format!("{}.{}", stem, extension));
    let writer = create_writer(&output_path)?;
    Ok((output_path, writer))
}

pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    log::debug!("Creating output directory {}", path.display());
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create output directory {}: {}", path.display(), e))
}
