use crate::utils::Result;
use std::{path::Path, str::FromStr};

/// Derives a gene label from the path of its alignment file.
pub trait GeneLabeler {
    fn label(&self, path: &Path) -> Result<String>;
}

impl<F> GeneLabeler for F
where
    F: Fn(&Path) -> Result<String>,
{
    fn label(&self, path: &Path) -> Result<String> {
        self(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LabelScheme {
    /// Base name up to the first `.`: `gene123.fasta.aln` -> `gene123`.
    /// Labels that themselves contain a `.` collide.
    #[default]
    FirstDot,
    /// Base name without its last extension: `gene123.fasta.aln` -> `gene123.fasta`.
    FileStem,
}

impl FromStr for LabelScheme {
    type Err = String;
    fn from_str(scheme: &str) -> std::result::Result<Self, Self::Err> {
        match scheme {
            "first-dot" => Ok(LabelScheme::FirstDot),
            "file-stem" => Ok(LabelScheme::FileStem),
            _ => Err(format!(
                "Invalid label scheme: {} (expected first-dot or file-stem)",
                scheme
            )),
        }
    }
}

impl GeneLabeler for LabelScheme {
    fn label(&self, path: &Path) -> Result<String> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .ok_or_else(|| format!("Cannot derive a gene label from path: {}", path.display()))?;
        let label = match self {
            LabelScheme::FirstDot => file_name.split('.').next().unwrap_or_default(),
            LabelScheme::FileStem => match file_name.rfind('.') {
                Some(idx) if idx > 0 => &file_name[..idx],
                _ => &file_name[..],
            },
        };
        if label.is_empty() {
            return Err(format!("Empty gene label derived from path: {}", path.display()));
        }
        Ok(label.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_dot_truncates_at_first_dot() {
        let label = LabelScheme::FirstDot
            .label(Path::new("trimmed/gene123.fasta.aln"))
            .unwrap();
        assert_eq!(label, "gene123");
    }

    #[test]
    fn first_dot_collides_on_dotted_names() {
        let a = LabelScheme::FirstDot.label(Path::new("10at4890.1.aln")).unwrap();
        let b = LabelScheme::FirstDot.label(Path::new("10at4890.2.aln")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn file_stem_strips_last_extension() {
        let label = LabelScheme::FileStem
            .label(Path::new("trimmed/10at4890.1.aln"))
            .unwrap();
        assert_eq!(label, "10at4890.1");
        let label = LabelScheme::FileStem.label(Path::new("gene")).unwrap();
        assert_eq!(label, "gene");
    }

    #[test]
    fn hidden_file_has_no_first_dot_label() {
        assert_eq!(
            LabelScheme::FirstDot.label(Path::new("dir/.aln")),
            Err("Empty gene label derived from path: dir/.aln".to_string())
        );
    }

    #[test]
    fn closure_labeler() {
        let upper = |path: &Path| -> Result<String> {
            Ok(path.file_name().unwrap().to_string_lossy().to_uppercase())
        };
        assert_eq!(upper.label(Path::new("a/gene.fa")).unwrap(), "GENE.FA");
    }

    #[test]
    fn label_scheme_from_str() {
        assert_eq!("first-dot".parse::<LabelScheme>(), Ok(LabelScheme::FirstDot));
        assert_eq!("file-stem".parse::<LabelScheme>(), Ok(LabelScheme::FileStem));
        assert!("basename".parse::<LabelScheme>().is_err());
    }
}
