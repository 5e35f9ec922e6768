use super::status::BuscoStatus;
use crate::utils::{open_text_reader, Result};
use std::{
    collections::HashMap,
    io::BufRead,
    path::{Path, PathBuf},
};

/// A taxon label and the BUSCO `full_table.tsv` assessed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonTable {
    pub label: String,
    pub full_table: PathBuf,
}

impl TaxonTable {
    /// Directory BUSCO writes single-copy protein sequences to, next to `full_table.tsv`.
    pub fn single_copy_dir(&self) -> PathBuf {
        self.full_table
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join("busco_sequences")
            .join("single_copy_busco_sequences")
    }
}

/// Parses the `label path` list. A repeated label replaces the earlier entry in place.
pub fn read_taxon_tables<R: BufRead>(reader: R, source: &str) -> Result<Vec<TaxonTable>> {
    const EXPECTED_FIELD_COUNT: usize = 2;
    let mut tables: Vec<TaxonTable> = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line =
            line.map_err(|e| format!("Error reading {} at line {}: {}", source, line_number + 1, e))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let (label, path) = match &fields[..] {
            [label, path] => (*label, *path),
            _ => {
                return Err(format!(
                    "Expected {} fields in the format 'label full_table' in {} at line {}, found {}: {}",
                    EXPECTED_FIELD_COUNT,
                    source,
                    line_number + 1,
                    fields.len(),
                    line
                ))
            }
        };
        let table = TaxonTable {
            label: label.to_string(),
            full_table: PathBuf::from(path),
        };
        match tables.iter_mut().find(|t| t.label == label) {
            Some(existing) => {
                log::warn!("Taxon label {} listed more than once, keeping {}", label, path);
                *existing = table;
            }
            None => tables.push(table),
        }
    }
    Ok(tables)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuscoDescription {
    pub busco_id: String,
    pub description: String,
    pub url: String,
}

/// Parses the `busco_id<TAB>description<TAB>url` table.
pub fn read_descriptions<R: BufRead>(reader: R, source: &str) -> Result<Vec<BuscoDescription>> {
    let mut descriptions: Vec<BuscoDescription> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line =
            line.map_err(|e| format!("Error reading {} at line {}: {}", source, line_number + 1, e))?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(format!(
                "Expected 3 tab-separated fields in the format 'busco_id description url' in {} at line {}, found {}: {}",
                source,
                line_number + 1,
                fields.len(),
                line
            ));
        }
        let entry = BuscoDescription {
            busco_id: fields[0].to_string(),
            description: fields[1].to_string(),
            url: fields[2].to_string(),
        };
        match index.get(&entry.busco_id) {
            Some(&idx) => {
                log::warn!("BUSCO {} described more than once in {}", entry.busco_id, source);
                descriptions[idx] = entry;
            }
            None => {
                index.insert(entry.busco_id.clone(), descriptions.len());
                descriptions.push(entry);
            }
        }
    }
    Ok(descriptions)
}

/// Parses a BUSCO `full_table.tsv`; the first status of a repeated BUSCO id wins.
pub fn read_full_table<R: BufRead>(reader: R, source: &str) -> Result<HashMap<String, BuscoStatus>> {
    let mut statuses = HashMap::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line =
            line.map_err(|e| format!("Error reading {} at line {}: {}", source, line_number + 1, e))?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let mut fields = line.trim_end_matches('\r').split('\t');
        let (busco_id, status) = match (fields.next(), fields.next()) {
            (Some(busco_id), Some(status)) => (busco_id, status),
            _ => {
                return Err(format!(
                    "Missing BUSCO id/status in {} at line {}: {}",
                    source,
                    line_number + 1,
                    line
                ))
            }
        };
        let status = status
            .parse::<BuscoStatus>()
            .map_err(|e| format!("{} in {} at line {}", e, source, line_number + 1))?;
        statuses.entry(busco_id.to_string()).or_insert(status);
    }
    Ok(statuses)
}

pub fn load_full_table(path: &Path) -> Result<HashMap<String, BuscoStatus>> {
    let reader = open_text_reader(path)?;
    read_full_table(reader, &path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn taxon_tables_from_reader() {
        let data = "\
GCA_902806535.1    ./GCA_902806535.1_busco/run_ascomycota_odb10/full_table.tsv\n\
\n\
GCA_002246955.1\t./GCA_002246955.1_busco/run_ascomycota_odb10/full_table.tsv\n";
        let tables = read_taxon_tables(Cursor::new(data), "labels.txt").unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].label, "GCA_002246955.1");
        assert_eq!(
            tables[0].single_copy_dir(),
            PathBuf::from("./GCA_902806535.1_busco/run_ascomycota_odb10/busco_sequences/single_copy_busco_sequences")
        );
    }

    #[test]
    fn taxon_tables_incomplete_line_err() {
        let data = "GCA_1 a/full_table.tsv\nGCA_2\n";
        assert_eq!(
            read_taxon_tables(Cursor::new(data), "labels.txt"),
            Err("Expected 2 fields in the format 'label full_table' in labels.txt at line 2, found 1: GCA_2".to_string())
        );
    }

    #[test]
    fn taxon_tables_repeated_label_replaced() {
        let data = "GCA_1 a/full_table.tsv\nGCA_2 b/full_table.tsv\nGCA_1 c/full_table.tsv\n";
        let tables = read_taxon_tables(Cursor::new(data), "labels.txt").unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].full_table, PathBuf::from("c/full_table.tsv"));
    }

    #[test]
    fn descriptions_from_reader() {
        let data = "\
262829at4890\tProteasome subunit alpha type\thttps://www.orthodb.org/v10?query=262829at4890\n\
331536at4890\tMediator of RNA polymerase II transcription subunit 6\thttps://www.orthodb.org/v10?query=331536at4890\n";
        let descriptions = read_descriptions(Cursor::new(data), "desc.txt").unwrap();
        assert_eq!(descriptions.len(), 2);
        assert_eq!(descriptions[0].busco_id, "262829at4890");
        assert_eq!(descriptions[0].description, "Proteasome subunit alpha type");
        assert_eq!(
            descriptions[1].url,
            "https://www.orthodb.org/v10?query=331536at4890"
        );
    }

    #[test]
    fn descriptions_missing_url_err() {
        let data = "262829at4890\tProteasome subunit alpha type\n";
        assert!(read_descriptions(Cursor::new(data), "desc.txt")
            .unwrap_err()
            .contains("at line 1, found 2"));
    }

    #[test]
    fn full_table_first_status_wins() {
        let data = "\
# BUSCO version is: 5.2.2\n\
# Busco id\tStatus\tSequence\tGene Start\tGene End\tScore\tLength\n\
10at4890\tComplete\tscaffold_1\t100\t900\t512.3\t266\n\
20at4890\tDuplicated\tscaffold_2\t10\t500\t300.1\t163\n\
20at4890\tDuplicated\tscaffold_7\t10\t500\t299.0\t163\n\
30at4890\tMissing\n";
        let statuses = read_full_table(Cursor::new(data), "full_table.tsv").unwrap();
        assert_eq!(statuses.len(), 3);
        assert_eq!(statuses["10at4890"], BuscoStatus::Complete);
        assert_eq!(statuses["20at4890"], BuscoStatus::Duplicated);
        assert_eq!(statuses["30at4890"], BuscoStatus::Missing);
    }

    #[test]
    fn full_table_unknown_status_err() {
        let data = "10at4890\tPartial\n";
        assert_eq!(
            read_full_table(Cursor::new(data), "full_table.tsv"),
            Err("Unknown BUSCO status: Partial in full_table.tsv at line 1".to_string())
        );
    }

    #[test]
    fn full_table_missing_status_err() {
        let data = "10at4890\n";
        assert!(read_full_table(Cursor::new(data), "full_table.tsv").is_err());
    }
}
