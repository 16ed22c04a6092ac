//! Memory monitoring plugins for Nagios-style systems
//!
//! Two scripts live here:
//!
//! * `check-meminfo` reads `/proc/meminfo`, checks available memory against
//!   thresholds and prints a status line with performance data.
//! * `meminfo-graph` renders the rrdtool template that charts that
//!   performance data (used, buffered, cached and swap).
//!
//! See the [`scripts`](scripts/index.html) module for their usage.

use std::fmt;
use std::process;

pub mod linux;
pub mod perfdata;
pub mod procfs;
pub mod rrd;
pub mod scripts;
pub mod template;
pub mod thresholds;

/// All possible exit statuses for a check
///
/// Ordered from least to most severe for the purposes of `max`, with
/// `Unknown` sorting last.
#[must_use]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    #![cfg_attr(test, allow(dead_code))]
    pub fn exit(self) -> ! {
        process::exit(self.code())
    }

    /// The process exit code monitoring systems expect for this status
    pub fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match *self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        };
        write!(f, "{}", msg)
    }
}

/// Set up `env_logger` for a script
///
/// Log lines go to stderr so they never get mixed into the status line that
/// the monitoring system reads from stdout. `RUST_LOG` is respected, and
/// `verbose` forces debug output.
pub fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // a logger may already be installed, e.g. when called twice in tests
    let _ = builder.try_init();
}

#[cfg(test)]
mod test {
    use super::Status;
    use std::cmp::max;

    #[test]
    fn status_ordering_picks_most_severe() {
        assert_eq!(max(Status::Ok, Status::Warning), Status::Warning);
        assert_eq!(max(Status::Critical, Status::Warning), Status::Critical);
        assert_eq!(max(Status::Critical, Status::Unknown), Status::Unknown);
    }

    #[test]
    fn status_codes() {
        assert_eq!(Status::Ok.code(), 0);
        assert_eq!(Status::Warning.code(), 1);
        assert_eq!(Status::Critical.code(), 2);
        assert_eq!(Status::Unknown.code(), 3);
    }

    #[test]
    fn status_displays_as_plugin_output() {
        assert_eq!(Status::Ok.to_string(), "OK");
        assert_eq!(Status::Warning.to_string(), "WARNING");
        assert_eq!(Status::Critical.to_string(), "CRITICAL");
        assert_eq!(Status::Unknown.to_string(), "UNKNOWN");
    }
}
