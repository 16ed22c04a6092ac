//! Warning and critical levels for available memory
//!
//! Thresholds are lower bounds: the check alerts when available memory
//! drops to or below them. They can be given in bytes, as a percentage of
//! total memory, or both, in which case the larger of the two wins.

use std::cmp::max;
use std::fmt;

use crate::Status;

#[derive(Debug, PartialEq)]
pub enum ThresholdError {
    /// critical would trigger before warning
    CriticalAboveWarning { warning: u64, critical: u64 },
    /// a percentage outside of 0..=100
    PercentOutOfRange { name: &'static str, value: u32 },
}

impl fmt::Display for ThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ThresholdError::CriticalAboveWarning { warning, critical } => write!(
                f,
                "critical must be smaller than warning ({} > {})",
                critical, warning
            ),
            ThresholdError::PercentOutOfRange { name, value } => write!(
                f,
                "{} can't be smaller than 0 or greater than 100 (got {})",
                name, value
            ),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Thresholds {
    /// Available bytes to warn at
    pub warning: Option<u64>,
    /// Available bytes to go critical at
    pub critical: Option<u64>,
    /// Percent of total memory available to warn at
    pub warning_percent: Option<u32>,
    /// Percent of total memory available to go critical at
    pub critical_percent: Option<u32>,
}

/// Thresholds resolved to bytes against a known total
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    pub warning: u64,
    pub critical: u64,
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if let (Some(warning), Some(critical)) = (self.warning, self.critical) {
            if critical > warning {
                return Err(ThresholdError::CriticalAboveWarning { warning, critical });
            }
        }
        if let (Some(warning), Some(critical)) = (self.warning_percent, self.critical_percent) {
            if critical > warning {
                return Err(ThresholdError::CriticalAboveWarning {
                    warning: u64::from(warning),
                    critical: u64::from(critical),
                });
            }
        }
        for &(name, value) in &[
            ("Warning", self.warning_percent),
            ("Critical", self.critical_percent),
        ] {
            if let Some(value) = value {
                if value > 100 {
                    return Err(ThresholdError::PercentOutOfRange { name, value });
                }
            }
        }
        Ok(())
    }

    /// Resolve to bytes, unset levels become zero
    pub fn levels(&self, total: u64) -> Levels {
        let resolve = |bytes: Option<u64>, percent: Option<u32>| {
            // at most total, since validated percents are <= 100
            let from_percent = percent.map_or(0, |p| {
                (u128::from(total) * u128::from(p) / 100) as u64
            });
            max(bytes.unwrap_or(0), from_percent)
        };
        Levels {
            warning: resolve(self.warning, self.warning_percent),
            critical: resolve(self.critical, self.critical_percent),
        }
    }
}

impl Levels {
    pub fn status(&self, available: u64) -> Status {
        if available <= self.critical {
            Status::Critical
        } else if available <= self.warning {
            Status::Warning
        } else {
            Status::Ok
        }
    }
}
