//! Structs and impls for files from the /proc filesystem
//!
//! Each file gets a struct to represent its data, with an associated `load`
//! function.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::num;
use std::path::Path;
use std::result::Result as StdResult;
use std::str::FromStr;

use derive_more::From;
use log::debug;
use regex::Regex;

pub const MEMINFO_PATH: &str = "/proc/meminfo";

/// ProcFs errors
///
/// Every error from in this module can be converted into a `ProcFsError`
#[derive(Debug, From)]
pub enum ProcFsError {
    /// Errors originating in IO
    Io(io::Error),
    /// Error pulling all required data out of procfs
    InsufficientData(String),
    /// Happens when we try to parse an int from something in procfs
    InvalidInt(num::ParseIntError),
}

impl fmt::Display for ProcFsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> StdResult<(), fmt::Error> {
        use self::ProcFsError::*;
        match *self {
            Io(ref e) => write!(f, "{}", e),
            InsufficientData(ref e) => write!(f, "{}", e),
            InvalidInt(ref e) => write!(f, "{}", e),
        }
    }
}

/// All the results are results with `ProcFsError`s
pub type Result<T> = StdResult<T, ProcFsError>;

const KB: u64 = 1024;

/// The parts of /proc/meminfo that we care about, in kB
#[derive(Debug, PartialEq, Default, Clone)]
pub struct MemInfo {
    pub total: Option<u64>,
    pub free: Option<u64>,
    pub available: Option<u64>,
    pub buffers: Option<u64>,
    pub cached: Option<u64>,
    pub swap_total: Option<u64>,
    pub swap_free: Option<u64>,
}

impl MemInfo {
    /// Read the data from /proc/meminfo into a `MemInfo`
    pub fn load() -> Result<MemInfo> {
        MemInfo::load_from(MEMINFO_PATH)
    }

    /// Read a file in /proc/meminfo format
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<MemInfo> {
        debug!("reading {}", path.as_ref().display());
        let mut fh = File::open(path)?;
        let mut contents = String::new();
        fh.read_to_string(&mut contents)?;
        contents.parse()
    }

    /// Convert to bytes and derive how memory is being used
    ///
    /// Available memory is free + buffers + cached, `MemAvailable` is not
    /// consulted.
    pub fn usage(&self) -> Result<Usage> {
        let total = match self.total {
            Some(total) if total > 0 => to_bytes("MemTotal", total)?,
            _ => {
                return Err(ProcFsError::InsufficientData(
                    "No memory? /proc/meminfo is missing MemTotal".into(),
                ))
            }
        };
        let free = to_bytes("MemFree", self.free.unwrap_or(0))?;
        let buffers = to_bytes("Buffers", self.buffers.unwrap_or(0))?;
        let cached = to_bytes("Cached", self.cached.unwrap_or(0))?;
        let swap_total = to_bytes("SwapTotal", self.swap_total.unwrap_or(0))?;
        let swap_free = to_bytes("SwapFree", self.swap_free.unwrap_or(0))?;

        // available() sums these, make sure that can't overflow
        free.checked_add(buffers)
            .and_then(|sum| sum.checked_add(cached))
            .ok_or_else(|| {
                ProcFsError::InsufficientData(
                    "MemFree + Buffers + Cached does not fit in 64 bits".into(),
                )
            })?;

        Ok(Usage {
            total,
            free,
            buffers,
            cached,
            swap_total,
            swap_free,
        })
    }
}

fn to_bytes(field: &str, kb: u64) -> Result<u64> {
    kb.checked_mul(KB).ok_or_else(|| {
        ProcFsError::InsufficientData(format!("{} of {} kB does not fit in 64 bits", field, kb))
    })
}

impl FromStr for MemInfo {
    type Err = ProcFsError;

    /// Convert the contents of a string like /proc/meminfo into a MemInfo
    /// object
    fn from_str(meminfo: &str) -> Result<Self> {
        let line = Regex::new(r"^\s*([A-Za-z0-9_()]+):\s*([0-9]+)(?:\s*kB)?\s*$")
            .expect("meminfo regex is valid");
        let mut info = MemInfo::default();

        for caps in meminfo.lines().filter_map(|l| line.captures(l)) {
            let field = match &caps[1] {
                "MemTotal" => &mut info.total,
                "MemFree" => &mut info.free,
                "MemAvailable" => &mut info.available,
                "Buffers" => &mut info.buffers,
                "Cached" => &mut info.cached,
                "SwapTotal" => &mut info.swap_total,
                "SwapFree" => &mut info.swap_free,
                _ => continue, // don't care
            };
            *field = Some(caps[2].parse()?);
        }

        Ok(info)
    }
}

/// Memory usage in bytes
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Usage {
    pub total: u64,
    pub free: u64,
    pub buffers: u64,
    pub cached: u64,
    pub swap_total: u64,
    pub swap_free: u64,
}

impl Usage {
    /// Memory that is neither free, nor used for buffers or cache
    pub fn used(&self) -> u64 {
        self.total
            .saturating_sub(self.free)
            .saturating_sub(self.buffers)
            .saturating_sub(self.cached)
    }

    pub fn swap_used(&self) -> u64 {
        self.swap_total.saturating_sub(self.swap_free)
    }

    /// Memory that could be handed out: free, buffers and cache
    pub fn available(&self) -> u64 {
        self.free
            .saturating_add(self.buffers)
            .saturating_add(self.cached)
    }

    pub fn percent_available(&self) -> f64 {
        self.available() as f64 / self.total as f64 * 100.0
    }
}

#[cfg(test)]
mod test {
    use super::{MemInfo, ProcFsError, Usage};

    const MEMINFO: &str = "\
MemTotal:        8000000 kB
MemFree:         1000000 kB
MemAvailable:    5000000 kB
Buffers:          500000 kB
Cached:          2500000 kB
SwapCached:            0 kB
Active(anon):     123456 kB
SwapTotal:       2000000 kB
SwapFree:        1500000 kB
HugePages_Total:       0
";

    #[test]
    fn parse_meminfo() {
        assert_eq!(
            MEMINFO.parse::<MemInfo>().unwrap(),
            MemInfo {
                total: Some(8_000_000),
                free: Some(1_000_000),
                available: Some(5_000_000),
                buffers: Some(500_000),
                cached: Some(2_500_000),
                swap_total: Some(2_000_000),
                swap_free: Some(1_500_000),
            }
        );
    }

    #[test]
    fn parse_ignores_unknown_lines() {
        let info = concat!(
            "Useless: 898\n",
            "MemTotal: 500\n",
            "garbage line\n",
            "Meaningless: 777\n",
            "Cached: 200\n"
        )
        .parse::<MemInfo>()
        .unwrap();
        assert_eq!(info.total, Some(500));
        assert_eq!(info.cached, Some(200));
        assert_eq!(info.free, None);
    }

    #[test]
    fn parse_rejects_overflowing_numbers() {
        match "MemTotal: 99999999999999999999999 kB\n".parse::<MemInfo>() {
            Err(ProcFsError::InvalidInt(_)) => {}
            other => panic!("expected an int error, got {:?}", other),
        }
    }

    #[test]
    fn usage_in_bytes() {
        let usage = MEMINFO.parse::<MemInfo>().unwrap().usage().unwrap();
        assert_eq!(usage.total, 8_000_000 * 1024);
        assert_eq!(usage.used(), 4_000_000 * 1024);
        assert_eq!(usage.available(), 4_000_000 * 1024);
        assert_eq!(usage.swap_used(), 500_000 * 1024);
        assert_eq!(usage.percent_available(), 50.0);
    }

    #[test]
    fn usage_needs_total() {
        let mem = MemInfo {
            free: Some(10),
            ..MemInfo::default()
        };
        assert!(mem.usage().is_err());

        let mem = MemInfo {
            total: Some(0),
            ..MemInfo::default()
        };
        assert!(mem.usage().is_err());
    }

    #[test]
    fn usage_rejects_counters_too_large_for_bytes() {
        match "MemTotal: 18014398509481984 kB\n".parse::<MemInfo>().unwrap().usage() {
            Err(ProcFsError::InsufficientData(msg)) => assert!(msg.contains("MemTotal")),
            other => panic!("expected insufficient data, got {:?}", other),
        }

        let mem = MemInfo {
            total: Some(100),
            cached: Some(u64::max_value() / 1024 + 1),
            ..MemInfo::default()
        };
        assert!(mem.usage().is_err());
    }

    #[test]
    fn usage_rejects_available_overflow() {
        let half = u64::max_value() / 1024 / 2;
        let mem = MemInfo {
            total: Some(100),
            free: Some(half),
            buffers: Some(half),
            cached: Some(half),
            ..MemInfo::default()
        };
        match mem.usage() {
            Err(ProcFsError::InsufficientData(msg)) => assert!(msg.contains("Cached")),
            other => panic!("expected insufficient data, got {:?}", other),
        }
    }

    #[test]
    fn used_never_underflows() {
        let usage = Usage {
            total: 100,
            free: 80,
            buffers: 30,
            cached: 30,
            swap_total: 0,
            swap_free: 10,
        };
        assert_eq!(usage.used(), 0);
        assert_eq!(usage.swap_used(), 0);
    }
}
