// Fake module for documentation
//! Documentation about the various scripts contained herein
//!
//! - [check-meminfo](#check-meminfo)
//! - [meminfo-graph](#meminfo-graph)
//!
//! # check-meminfo
//!
//! Linux-only. Reads /proc/meminfo.
//!
//! ```plain
//! $ check-meminfo --help
//! check-meminfo (part of meminfo-plugins) 0.2.0
//! Brandon W Maister <quodlibetor@gmail.com>
//! Check the available memory of the system
//!
//! Alerts when available memory (free + buffers + cached) drops to or below
//! a threshold. Thresholds can be given in bytes and in percent of total
//! memory; when both are given the larger one is used.
//!
//! USAGE:
//!     check-meminfo [FLAGS] [OPTIONS]
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!     -v, --verbose    Log thresholds and memory counters to stderr
//!
//! OPTIONS:
//!     -C, --Critical <critical_percent>    Percent of memory available to go critical at
//!     -W, --Warning <warning_percent>      Percent of memory available to warn at
//!     -c, --critical <critical>            Available bytes to go critical at
//!         --meminfo <meminfo>              File to read memory counters from [default: /proc/meminfo]
//!     -w, --warning <warning>              Available bytes to warn at
//! ```
//!
//! # meminfo-graph
//!
//! Cross platform, only renders text for rrdtool.
//!
//! ```plain
//! $ meminfo-graph --help
//! meminfo-graph (part of meminfo-plugins) 0.2.0
//! Brandon W Maister <quodlibetor@gmail.com>
//! Render the rrdtool arguments for a memory usage graph
//!
//! The data sources are expected in the order: memory total, used, buffers,
//! cache, swap used, swap total. Extra data sources are ignored.
//!
//! USAGE:
//!     meminfo-graph [FLAGS] [OPTIONS] <hostname> <servicedesc> <rrdfile> [DS]...
//!
//! FLAGS:
//!     -h, --help                 Prints help information
//!         --threshold-markers    Draw horizontal rules at the warning and critical thresholds
//!     -V, --version              Prints version information
//!     -v, --verbose              Log debug output to stderr
//!
//! OPTIONS:
//!         --crit <crit>        Critical threshold to mark on the graph
//!         --format <format>    How to print the result [default: plain]  [possible values: plain, json]
//!         --warn <warn>        Warning threshold to mark on the graph
//!
//! ARGS:
//!     <hostname>       Display name of the monitored host
//!     <servicedesc>    Display name of the monitored service
//!     <rrdfile>        Path of the RRD file holding the data
//!     <DS>...          Data source selectors within the RRD file
//! ```
