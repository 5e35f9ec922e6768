use crate::utils::Result;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq)]
pub struct FastaRecord {
    pub id: String,
    pub seq: String,
}

/// Parses FASTA text. Sequence lines are joined until the next header, blank
/// lines are skipped and a sequence line before the first header is an error.
pub fn read_fasta<R: BufRead>(reader: R, source: &str) -> Result<Vec<FastaRecord>> {
    let mut records: Vec<FastaRecord> = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            format!("Error reading {} at line {}: {}", source, line_number + 1, e)
        })?;
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(header) = line.strip_prefix('>') {
            records.push(FastaRecord {
                id: header.trim_start_matches('>').to_string(),
                seq: String::new(),
            });
        } else if line.trim().is_empty() {
            continue;
        } else {
            match records.last_mut() {
                Some(record) => record.seq.push_str(line.trim()),
                None => {
                    return Err(format!(
                        "Malformed FASTA {}: sequence found before any header at line {}",
                        source,
                        line_number + 1
                    ))
                }
            }
        }
    }
    Ok(records)
}

/// Writes records as FASTA, wrapping sequences at `line_width` columns when set.
pub fn write_fasta<'a, W, I>(writer: &mut W, records: I, line_width: Option<usize>) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let to_err = |e: std::io::Error| format!("Failed to write FASTA record: {}", e);
    for (id, seq) in records {
        writeln!(writer, ">{}", id).map_err(to_err)?;
        match line_width {
            Some(width) if width > 0 => {
                for chunk in seq.as_bytes().chunks(width) {
                    writer.write_all(chunk).map_err(to_err)?;
                    writer.write_all(b"\n").map_err(to_err)?;
                }
            }
            _ => writeln!(writer, "{}", seq).map_err(to_err)?,
        }
    }
    Ok(())
}
