//! Check the available memory of the system
//!
//! Available memory is free + buffers + cached. Prints the status along with
//! performance data for every memory counter, in the order memavailable,
//! memtotal, memused, membuffer, memcached, swaptotal, swapused.
//!
//! That order does not line up with the data sources `meminfo-graph`
//! expects (total, used, buffers, cache, swap used, swap total). When the
//! graphing add-on numbers data sources in print order, pass them to
//! `meminfo-graph` explicitly instead of as `1 2 3 4 5 6`.

use log::debug;
use serde::Deserialize;
use structopt::StructOpt;

use meminfo_plugins::linux::bytes_to_human_size;
use meminfo_plugins::perfdata::{self, PerfData};
use meminfo_plugins::procfs::{MemInfo, MEMINFO_PATH};
use meminfo_plugins::thresholds::Thresholds;
use meminfo_plugins::Status;

/// Check the available memory of the system
///
/// Alerts when available memory (free + buffers + cached) drops to or below
/// a threshold. Thresholds can be given in bytes and in percent of total
/// memory; when both are given the larger one is used.
#[derive(Deserialize, Debug, StructOpt)]
#[structopt(
    name = "check-meminfo (part of meminfo-plugins)",
    raw(setting = "structopt::clap::AppSettings::ColoredHelp")
)]
struct Args {
    #[structopt(
        short = "w",
        long = "warning",
        help = "Available bytes to warn at"
    )]
    warning: Option<u64>,
    #[structopt(
        short = "c",
        long = "critical",
        help = "Available bytes to go critical at"
    )]
    critical: Option<u64>,
    #[structopt(
        short = "W",
        long = "Warning",
        help = "Percent of memory available to warn at"
    )]
    warning_percent: Option<u32>,
    #[structopt(
        short = "C",
        long = "Critical",
        help = "Percent of memory available to go critical at"
    )]
    critical_percent: Option<u32>,
    #[structopt(
        long = "meminfo",
        help = "File to read memory counters from",
        raw(default_value = "MEMINFO_PATH")
    )]
    meminfo: String,
    #[structopt(
        short = "v",
        long = "verbose",
        help = "Log thresholds and memory counters to stderr"
    )]
    verbose: bool,
}

impl Args {
    fn thresholds(&self) -> Thresholds {
        Thresholds {
            warning: self.warning,
            critical: self.critical,
            warning_percent: self.warning_percent,
            critical_percent: self.critical_percent,
        }
    }
}

/// Work out the status and the line to print for it
fn do_check(thresholds: &Thresholds, mem: &MemInfo) -> (Status, String) {
    let usage = match mem.usage() {
        Ok(usage) => usage,
        Err(e) => return (Status::Unknown, format!("UNKNOWN - {}", e)),
    };
    let levels = thresholds.levels(usage.total);
    debug!("usage: {:?}", usage);
    debug!("levels: {:?}", levels);

    let available = usage.available();
    let status = levels.status(available);
    let perf = [
        PerfData::bytes("memavailable", available).with_thresholds(levels.warning, levels.critical),
        PerfData::bytes("memtotal", usage.total),
        PerfData::bytes("memused", usage.used()),
        PerfData::bytes("membuffer", usage.buffers),
        PerfData::bytes("memcached", usage.cached),
        PerfData::bytes("swaptotal", usage.swap_total),
        PerfData::bytes("swapused", usage.swap_used()),
    ];

    let line = format!(
        "{} - Free: {:4.2} % ({}) |{}",
        status,
        usage.percent_available(),
        bytes_to_human_size(available),
        perfdata::format_all(&perf)
    );
    (status, line)
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    let args = Args::from_args();
    meminfo_plugins::init_logging(args.verbose);

    let thresholds = args.thresholds();
    if let Err(e) = thresholds.validate() {
        eprintln!("{}", e);
        Status::Unknown.exit();
    }
    debug!("thresholds: {:?}", thresholds);

    let mem = match MemInfo::load_from(&args.meminfo) {
        Ok(mem) => mem,
        Err(e) => {
            println!("UNKNOWN - unable to read {}: {}", args.meminfo, e);
            Status::Unknown.exit();
        }
    };

    let (status, line) = do_check(&thresholds, &mem);
    println!("{}", line);
    status.exit();
}

#[cfg(test)]
mod test {
    use structopt::StructOpt;

    use meminfo_plugins::procfs::MemInfo;
    use meminfo_plugins::thresholds::Thresholds;
    use meminfo_plugins::Status;

    use super::{do_check, Args};

    fn build_args(argv: Vec<&str>) -> Args {
        Args::from_iter(argv.into_iter())
    }

    fn mem() -> MemInfo {
        MemInfo {
            total: Some(8_000_000),
            free: Some(1_000_000),
            available: Some(5_000_000),
            buffers: Some(500_000),
            cached: Some(2_500_000),
            swap_total: Some(2_000_000),
            swap_free: Some(1_500_000),
        }
    }

    #[test]
    fn flags() {
        let args = build_args(vec!["check-meminfo"]);
        assert_eq!(args.thresholds(), Thresholds::default());
        assert_eq!(args.meminfo, "/proc/meminfo");
        assert!(!args.verbose);

        let args = build_args(vec![
            "check-meminfo",
            "-w",
            "2048",
            "-c",
            "1024",
            "-W",
            "20",
            "-C",
            "10",
            "-v",
        ]);
        assert_eq!(
            args.thresholds(),
            Thresholds {
                warning: Some(2048),
                critical: Some(1024),
                warning_percent: Some(20),
                critical_percent: Some(10),
            }
        );
        assert!(args.verbose);

        let args = build_args(vec!["check-meminfo", "--Warning", "15", "--critical", "7"]);
        assert_eq!(args.warning_percent, Some(15));
        assert_eq!(args.critical, Some(7));
    }

    #[test]
    fn ok_output_with_perfdata() {
        let (status, line) = do_check(&Thresholds::default(), &mem());
        assert_eq!(status, Status::Ok);
        assert_eq!(
            line,
            "OK - Free: 50.00 % (3.81 GB) |\
             memavailable=4096000000B;0;0;0 \
             memtotal=8192000000B;;;0 \
             memused=4096000000B;;;0 \
             membuffer=512000000B;;;0 \
             memcached=2560000000B;;;0 \
             swaptotal=2048000000B;;;0 \
             swapused=512000000B;;;0"
        );
    }

    #[test]
    fn alerts_when_told_to() {
        let args = build_args(vec!["check-meminfo", "-W", "60"]);
        let (status, line) = do_check(&args.thresholds(), &mem());
        assert_eq!(status, Status::Warning);
        assert!(line.starts_with("WARNING - Free: 50.00 %"));
        assert!(line.contains("memavailable=4096000000B;4915200000;0;0 "));

        let args = build_args(vec!["check-meminfo", "-W", "60", "-C", "50"]);
        let (status, _) = do_check(&args.thresholds(), &mem());
        assert_eq!(status, Status::Critical);

        let args = build_args(vec!["check-meminfo", "-c", "5000000000"]);
        let (status, _) = do_check(&args.thresholds(), &mem());
        assert_eq!(status, Status::Critical);
    }

    #[test]
    fn unknown_without_total() {
        let mem = MemInfo {
            total: None,
            ..mem()
        };
        let (status, line) = do_check(&Thresholds::default(), &mem);
        assert_eq!(status, Status::Unknown);
        assert!(line.starts_with("UNKNOWN - No memory?"));
    }

    #[test]
    fn unknown_when_counters_overflow() {
        let mem = "MemTotal: 18014398509481984 kB\nMemFree: 1 kB\n"
            .parse::<MemInfo>()
            .unwrap();
        let (status, line) = do_check(&Thresholds::default(), &mem);
        assert_eq!(status, Status::Unknown);
        assert!(line.starts_with("UNKNOWN - MemTotal"), "{}", line);
    }
}
