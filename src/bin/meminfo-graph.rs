//! Render the memory usage graph template
//!
//! Prints the rrdtool options on the first line and the graph directives on
//! the second, ready to be appended to an `rrdtool graph` command.

use std::fmt;
use std::str::FromStr;

use derive_more::From;
use serde::Deserialize;
use structopt::StructOpt;

use meminfo_plugins::template::{self, TemplateError, TemplateInput};
use meminfo_plugins::Status;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
enum Format {
    Plain,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Format, String> {
        match s {
            "plain" => Ok(Format::Plain),
            "json" => Ok(Format::Json),
            _ => Err(format!("unknown output format '{}'", s)),
        }
    }
}

/// Render the rrdtool arguments for a memory usage graph
///
/// The data sources are expected in the order: memory total, used, buffers,
/// cache, swap used, swap total. Extra data sources are ignored.
#[derive(Deserialize, Debug, StructOpt)]
#[structopt(
    name = "meminfo-graph (part of meminfo-plugins)",
    raw(setting = "structopt::clap::AppSettings::ColoredHelp")
)]
struct Args {
    #[structopt(
        long = "warn",
        help = "Warning threshold to mark on the graph",
        parse(try_from_str = "finite")
    )]
    warn: Option<f64>,
    #[structopt(
        long = "crit",
        help = "Critical threshold to mark on the graph",
        parse(try_from_str = "finite")
    )]
    crit: Option<f64>,
    #[structopt(
        long = "threshold-markers",
        help = "Draw horizontal rules at the warning and critical thresholds"
    )]
    threshold_markers: bool,
    #[structopt(
        long = "format",
        help = "How to print the result",
        default_value = "plain",
        raw(possible_values = r#"&["plain", "json"]"#)
    )]
    format: Format,
    #[structopt(short = "v", long = "verbose", help = "Log debug output to stderr")]
    verbose: bool,

    #[structopt(help = "Display name of the monitored host")]
    hostname: String,
    #[structopt(help = "Display name of the monitored service")]
    servicedesc: String,
    #[structopt(help = "Path of the RRD file holding the data")]
    rrdfile: String,
    #[structopt(name = "DS", help = "Data source selectors within the RRD file")]
    ds: Vec<String>,
}

/// Thresholds end up in `HRULE` directives, which rrdtool only accepts for
/// real numbers
fn finite(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("threshold must be a finite number, got '{}'", s))
    }
}

#[derive(Debug, From)]
enum Error {
    Template(TemplateError),
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Template(ref e) => write!(f, "{}", e),
            Error::Json(ref e) => write!(f, "unable to serialize graph: {}", e),
        }
    }
}

fn render(args: &Args) -> Result<String, Error> {
    let input = TemplateInput {
        warn: args.warn,
        crit: args.crit,
        threshold_markers: args.threshold_markers,
        ..TemplateInput::new(&args.hostname, &args.servicedesc, &args.rrdfile, &args.ds)
    };
    let graph = template::render(&input)?;
    let out = match args.format {
        Format::Plain => format!("{}\n{}", graph.opt, graph.def),
        Format::Json => serde_json::to_string(&graph)?,
    };
    Ok(out)
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    let args = Args::from_args();
    meminfo_plugins::init_logging(args.verbose);

    match render(&args) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("UNKNOWN [meminfo-graph]: {}", e);
            Status::Unknown.exit();
        }
    }
}

#[cfg(test)]
mod test {
    use structopt::StructOpt;

    use super::{finite, render, Args, Error, Format};

    fn build_args(argv: Vec<&str>) -> Args {
        Args::from_iter(argv.into_iter())
    }

    fn srv1(extra: Vec<&'static str>) -> Args {
        let mut argv = vec!["meminfo-graph"];
        argv.extend(extra);
        argv.extend(vec![
            "srv1",
            "Memory",
            "/var/rrd/srv1/mem.rrd",
            "a",
            "b",
            "c",
            "d",
            "e",
            "f",
        ]);
        build_args(argv)
    }

    #[test]
    fn flags() {
        let args = srv1(vec![]);
        assert_eq!(args.format, Format::Plain);
        assert!(!args.threshold_markers);
        assert_eq!(args.ds, vec!["a", "b", "c", "d", "e", "f"]);

        let args = srv1(vec!["--warn", "80", "--crit", "90.5", "--threshold-markers", "--format", "json"]);
        assert_eq!(args.warn, Some(80.0));
        assert_eq!(args.crit, Some(90.5));
        assert!(args.threshold_markers);
        assert_eq!(args.format, Format::Json);
    }

    #[test]
    fn plain_output_is_two_lines() {
        let out = render(&srv1(vec![])).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "--vertical-label \"Byte Usage\" -l0 -b 1024 --alt-autoscale-max --rigid \
             --title \"Memory-Usage for srv1 / Memory\" "
        );
        assert!(lines[1].starts_with(
            "DEF:var1=/var/rrd/srv1/mem.rrd:a:AVERAGE CDEF:varm1=var1,1048576,/ \
             DEF:var2=/var/rrd/srv1/mem.rrd:b:AVERAGE CDEF:varm2=var2,1048576,/ "
        ));
    }

    #[test]
    fn json_output() {
        let out = render(&srv1(vec!["--format", "json"])).unwrap();
        let graph: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(graph["opt"].as_str().unwrap().contains("Byte Usage"));
        assert!(graph["def"].as_str().unwrap().ends_with(r#"GPRINT:varm5:MAX:"%6.0lf\n" "#));
    }

    #[test]
    fn threshold_markers_from_flags() {
        let out = render(&srv1(vec!["--warn", "80", "--crit", "90"])).unwrap();
        assert!(!out.contains("HRULE"));

        let out = render(&srv1(vec!["--warn", "80", "--crit", "90", "--threshold-markers"])).unwrap();
        assert!(out.contains("HRULE:80#FFFF00 HRULE:90#FF0000 "));
    }

    #[test]
    fn thresholds_must_be_finite() {
        assert_eq!(finite("80"), Ok(80.0));
        assert_eq!(finite("-1.5"), Ok(-1.5));
        assert!(finite("NaN").is_err());
        assert!(finite("inf").is_err());
        assert!(finite("-inf").is_err());
        assert!(finite("eighty").is_err());

        let base = vec!["meminfo-graph", "h", "s", "/x.rrd", "a", "b", "c", "d", "e", "f"];
        for bad in &["NaN", "inf"] {
            let mut argv = base.clone();
            argv.extend(vec!["--warn", *bad]);
            assert!(Args::from_iter_safe(argv.clone().into_iter()).is_err());
            let i = argv.len() - 2;
            argv[i] = "--crit";
            assert!(Args::from_iter_safe(argv.into_iter()).is_err());
        }
    }

    #[test]
    fn too_few_data_sources() {
        let args = build_args(vec!["meminfo-graph", "h", "s", "/x.rrd", "a", "b"]);
        match render(&args) {
            Err(Error::Template(e)) => assert!(e.to_string().contains("index 3")),
            other => panic!("expected a template error, got {:?}", other),
        }
    }
}
