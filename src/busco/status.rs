use std::{fmt, str::FromStr};

/// BUSCO assessment status of one gene in one assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuscoStatus {
    Complete,
    Duplicated,
    Fragmented,
    Missing,
}

impl BuscoStatus {
    /// Only single-copy complete genes count towards taxon coverage.
    pub fn is_present(self) -> bool {
        self == BuscoStatus::Complete
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuscoStatus::Complete => "Complete",
            BuscoStatus::Duplicated => "Duplicated",
            BuscoStatus::Fragmented => "Fragmented",
            BuscoStatus::Missing => "Missing",
        }
    }
}

impl FromStr for BuscoStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Complete" => Ok(BuscoStatus::Complete),
            "Duplicated" => Ok(BuscoStatus::Duplicated),
            "Fragmented" => Ok(BuscoStatus::Fragmented),
            "Missing" => Ok(BuscoStatus::Missing),
            _ => Err(format!("Unknown BUSCO status: {}", s)),
        }
    }
}

impl fmt::Display for BuscoStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
