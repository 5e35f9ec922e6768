use super::label::GeneLabeler;
use super::universe::GeneLengths;
use crate::utils::Result;
use std::{
    collections::HashMap,
    fmt,
    io::{BufRead, Write},
    path::Path,
};

/// Gene labels grouped by evolutionary model, both in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelGroups {
    groups: Vec<(String, Vec<String>)>,
}

impl ModelGroups {
    /// Parses a `path model` list; blank lines are skipped.
    pub fn from_reader<R: BufRead>(
        reader: R,
        source: &str,
        labeler: &dyn GeneLabeler,
    ) -> Result<Self> {
        const EXPECTED_FIELD_COUNT: usize = 2;
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        let mut model_index: HashMap<String, usize> = HashMap::new();

        for (line_number, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                format!("Error reading {} at line {}: {}", source, line_number + 1, e)
            })?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            let (path, model) = match &fields[..] {
                [path, model] => (*path, *model),
                _ => {
                    return Err(format!(
                        "Expected {} fields in the format 'alignment model' in {} at line {}, found {}: {}",
                        EXPECTED_FIELD_COUNT,
                        source,
                        line_number + 1,
                        fields.len(),
                        line
                    ))
                }
            };
            let label = labeler.label(Path::new(path))?;
            match model_index.get(model) {
                Some(&idx) => groups[idx].1.push(label),
                None => {
                    model_index.insert(model.to_string(), groups.len());
                    groups.push((model.to_string(), vec![label]));
                }
            }
        }
        Ok(ModelGroups { groups })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(model, genes)| (model.as_str(), genes.as_slice()))
    }

    /// Gene labels in model-grouped order.
    pub fn gene_order(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|(_, genes)| genes.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<M, G> FromIterator<(M, G)> for ModelGroups
where
    M: Into<String>,
    G: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (M, G)>>(iter: I) -> Self {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for (model, gene) in iter {
            let model = model.into();
            match groups.iter_mut().find(|(m, _)| *m == model) {
                Some((_, genes)) => genes.push(gene.into()),
                None => groups.push((model, vec![gene.into()])),
            }
        }
        ModelGroups { groups }
    }
}

/// One model-level partition; `start` and `end` are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub model: String,
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}, partition{} = {}-{}",
            self.model, self.index, self.start, self.end
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionScheme {
    partitions: Vec<Partition>,
}

impl PartitionScheme {
    pub fn new(groups: &ModelGroups, lengths: &GeneLengths) -> Result<Self> {
        let mut partitions = Vec::with_capacity(groups.len());
        let mut consumed = 0;
        for (index, (model, genes)) in groups.iter().enumerate() {
            let start = consumed + 1;
            for label in genes {
                consumed += lengths.get(label).ok_or_else(|| {
                    format!(
                        "Alignment {} assigned to model {} was not loaded",
                        label, model
                    )
                })?;
            }
            partitions.push(Partition {
                model: model.to_string(),
                index: index + 1,
                start,
                end: consumed,
            });
        }
        Ok(PartitionScheme { partitions })
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Number of columns covered by all partitions.
    pub fn total_length(&self) -> usize {
        self.partitions.last().map_or(0, |p| p.end)
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        for partition in &self.partitions {
            writeln!(writer, "{}", partition)
                .map_err(|e| format!("Failed to write partition scheme: {}", e))?;
        }
        Ok(())
    }
}
