use super::Result;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read as ioRead};
use std::path::Path;

/// Token standing in for standard input wherever a list file is accepted.
pub const STDIN_TOKEN: &str = "-";

fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip")
}

/// Opens a plain or gzip-compressed text file.
pub fn open_text_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    let file = File::open(path)
        .map_err(|e| format!("Cannot open file {}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.display()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

/// Opens a list file, or standard input for `-`.
pub fn open_list_reader(source: &str) -> Result<BufReader<Box<dyn ioRead>>> {
    if source == STDIN_TOKEN {
        Ok(BufReader::new(Box::new(io::stdin())))
    } else {
        open_text_reader(Path::new(source))
    }
}

/// Reads a list of paths, one per line, skipping blank lines.
pub fn read_path_list<R: BufRead>(reader: R, source: &str) -> Result<Vec<String>> {
    let mut paths = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            format!("Error reading {} at line {}: {}", source, line_number + 1, e)
        })?;
        let path = line.trim();
        if !path.is_empty() {
            paths.push(path.to_string());
        }
    }
    Ok(paths)
}
