//! Performance data, the part of a plugin's output after the `|`
//!
//! Each label renders as `label=value[UOM];[warn];[crit];[min];[max]`.
//! Graphing add-ons store every label as one data source in the service's
//! RRD file, in the order they are printed.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct PerfData {
    pub label: String,
    pub value: u64,
    pub unit: &'static str,
    pub warn: Option<u64>,
    pub crit: Option<u64>,
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl PerfData {
    /// A byte-valued label with a minimum of zero
    pub fn bytes<S: Into<String>>(label: S, value: u64) -> PerfData {
        PerfData {
            label: label.into(),
            value,
            unit: "B",
            warn: None,
            crit: None,
            min: Some(0),
            max: None,
        }
    }

    pub fn with_thresholds(mut self, warn: u64, crit: u64) -> PerfData {
        self.warn = Some(warn);
        self.crit = Some(crit);
        self
    }
}

fn opt(f: &mut fmt::Formatter, value: Option<u64>) -> fmt::Result {
    match value {
        Some(v) => write!(f, ";{}", v),
        None => write!(f, ";"),
    }
}

impl fmt::Display for PerfData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}{}", self.label, self.value, self.unit)?;
        opt(f, self.warn)?;
        opt(f, self.crit)?;
        opt(f, self.min)?;
        if self.max.is_some() {
            opt(f, self.max)?;
        }
        Ok(())
    }
}

/// Join labels into the space-separated perfdata section
pub fn format_all(data: &[PerfData]) -> String {
    data.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
