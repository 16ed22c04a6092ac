//! The memory usage graph template
//!
//! Turns the values a PNP-style caller knows about a service (host name,
//! service description, RRD file and its data sources) into the two strings
//! handed to `rrdtool graph`: the options (`opt`) and the graph directives
//! (`def`).
//!
//! The data sources are expected in this order:
//!
//! 1. memory total
//! 2. memory used
//! 3. buffers
//! 4. cache
//! 5. swap used
//! 6. swap total
//!
//! This is not the order `check-meminfo` prints its performance data in
//! (memavailable, memtotal, memused, membuffer, memcached, swaptotal,
//! swapused). Callers that number data sources by print order get e.g.
//! memavailable drawn as "Memory" and memcached as swap used, so they have
//! to map the selectors themselves.
//!
//! Every data source is read with `DEF` and converted to megabytes with a
//! `CDEF`. The areas and lines draw the raw byte values (the y axis uses
//! base 1024), while the `GPRINT` readouts show the megabyte values.

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::rrd::{ArgList, Color, ConsolidationFn, Directive, GraphOption, Value};

/// How many data sources the template reads
pub const DATA_SOURCES: usize = 6;

const BYTES_PER_MB: u64 = 1_048_576;

const WARN_COLOR: Color = Color::rgb(0xFF, 0xFF, 0x00);
const CRIT_COLOR: Color = Color::rgb(0xFF, 0x00, 0x00);

const HEADER: &str = "\\t\\t LAST MB\\t    AVG MB\\t    MAX MB\\n";

const MEMORY_PAD: &str = "     ";
const SWAP_PAD: &str = "      ";

/// What a layer draws
enum Element {
    /// An area filled from the data source with this index
    Area { var: usize, stack: bool },
    /// A line of the given width, along a data source or flat at zero
    Line { width: u32, var: Option<usize> },
}

/// One row of the legend: a graph element and three readouts
struct Layer {
    element: Element,
    color: Color,
    legend: &'static str,
    /// Index of the data source the readouts are printed from
    readout: usize,
    /// Padding after the LAST readout
    pad: &'static str,
}

// The "Swap" row is drawn flat at zero and prints the swap total; the swap
// used curve and its numbers come in the following row.
const LAYERS: [Layer; 6] = [
    Layer {
        element: Element::Area { var: 1, stack: false },
        color: Color::rgb(0xEA, 0x8F, 0x00),
        legend: "Memory    \\t",
        readout: 1,
        pad: MEMORY_PAD,
    },
    Layer {
        element: Element::Area { var: 2, stack: false },
        color: Color::rgb(0x00, 0xFF, 0x00),
        legend: "-used     \\t",
        readout: 2,
        pad: MEMORY_PAD,
    },
    Layer {
        element: Element::Area { var: 3, stack: true },
        color: Color::rgb(0xAA, 0xCC, 0x01),
        legend: "-buffered \\t",
        readout: 3,
        pad: MEMORY_PAD,
    },
    Layer {
        element: Element::Area { var: 4, stack: true },
        color: Color::rgb(0xEA, 0xCC, 0x00),
        legend: "-cached   \\t",
        readout: 4,
        pad: MEMORY_PAD,
    },
    Layer {
        element: Element::Line { width: 0, var: None },
        color: Color::rgb(0x44, 0x33, 0xFF),
        legend: "Swap    \\t",
        readout: 6,
        pad: SWAP_PAD,
    },
    Layer {
        element: Element::Line { width: 1, var: Some(5) },
        color: Color::rgb(0x44, 0xCC, 0xFF),
        legend: "-used     \\t",
        readout: 5,
        pad: SWAP_PAD,
    },
];

fn var(idx: usize) -> String {
    format!("var{}", idx)
}

fn varm(idx: usize) -> String {
    format!("varm{}", idx)
}

/// Everything the template needs to know about the service being graphed
#[derive(Debug, Clone)]
pub struct TemplateInput<'a> {
    pub hostname: &'a str,
    pub servicedesc: &'a str,
    pub rrdfile: &'a str,
    /// Data source selectors, only the first `DATA_SOURCES` are used
    pub ds: &'a [String],
    /// Warning threshold, only drawn if `threshold_markers` is set
    pub warn: Option<f64>,
    /// Critical threshold, only drawn if `threshold_markers` is set
    pub crit: Option<f64>,
    pub threshold_markers: bool,
}

impl<'a> TemplateInput<'a> {
    pub fn new(
        hostname: &'a str,
        servicedesc: &'a str,
        rrdfile: &'a str,
        ds: &'a [String],
    ) -> TemplateInput<'a> {
        TemplateInput {
            hostname,
            servicedesc,
            rrdfile,
            ds,
            warn: None,
            crit: None,
            threshold_markers: false,
        }
    }

    /// The data source for the 1-based `idx`
    fn data_source(&self, idx: usize) -> Result<&'a str, TemplateError> {
        self.ds
            .get(idx - 1)
            .map(|ds| ds.as_str())
            .ok_or(TemplateError::MissingDataSource {
                index: idx,
                given: self.ds.len(),
            })
    }
}

#[derive(Debug, PartialEq)]
pub enum TemplateError {
    /// The caller passed fewer than `DATA_SOURCES` data sources
    MissingDataSource { index: usize, given: usize },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TemplateError::MissingDataSource { index, given } => write!(
                f,
                "no data source for index {}: the template needs {} but got {}",
                index, DATA_SOURCES, given
            ),
        }
    }
}

/// The rendered template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub opt: String,
    pub def: String,
}

/// The chart options: axis label, scaling and title
pub fn options(hostname: &str, servicedesc: &str) -> ArgList<GraphOption> {
    let mut opts = ArgList::new();
    opts.push(GraphOption::VerticalLabel("Byte Usage".into()))
        .push(GraphOption::LowerLimit(0))
        .push(GraphOption::Base(1024))
        .push(GraphOption::AltAutoscaleMax)
        .push(GraphOption::Rigid)
        .push(GraphOption::Title(format!(
            "Memory-Usage for {} / {}",
            hostname, servicedesc
        )));
    opts
}

/// The graph directives, in the order rrdtool should see them
pub fn directives(input: &TemplateInput) -> Result<ArgList<Directive>, TemplateError> {
    let mut defs = ArgList::new();

    for idx in 1..=DATA_SOURCES {
        defs.push(Directive::Def {
            vname: var(idx),
            rrdfile: input.rrdfile.to_owned(),
            ds: input.data_source(idx)?.to_owned(),
            cf: ConsolidationFn::Average,
        })
        .push(Directive::Cdef {
            vname: varm(idx),
            rpn: format!("{},{},/", var(idx), BYTES_PER_MB),
        });
    }

    if input.threshold_markers {
        if let Some(warn) = input.warn {
            defs.push(Directive::Hrule {
                value: warn,
                color: WARN_COLOR,
            });
        }
        if let Some(crit) = input.crit {
            defs.push(Directive::Hrule {
                value: crit,
                color: CRIT_COLOR,
            });
        }
    }

    defs.push(Directive::Comment(HEADER.into()));

    for layer in LAYERS.iter() {
        defs.push(element(layer));
        defs.extend(readouts(layer));
    }

    Ok(defs)
}

fn element(layer: &Layer) -> Directive {
    let legend = Some(layer.legend.to_owned());
    match layer.element {
        Element::Area { var: idx, stack } => Directive::Area {
            value: Value::var(var(idx)),
            color: layer.color,
            legend,
            stack,
        },
        Element::Line { width, var: idx } => Directive::Line {
            width,
            value: idx.map_or(Value::Constant(0.0), |idx| Value::var(var(idx))),
            color: layer.color,
            legend,
        },
    }
}

fn readouts(layer: &Layer) -> Vec<Directive> {
    let formats = [
        (ConsolidationFn::Last, format!("%6.0lf{}", layer.pad)),
        (ConsolidationFn::Average, "%6.0lf   ".to_owned()),
        (ConsolidationFn::Max, "%6.0lf\\n".to_owned()),
    ];
    formats
        .iter()
        .map(|&(cf, ref format)| Directive::Gprint {
            vname: varm(layer.readout),
            cf,
            format: format.clone(),
        })
        .collect()
}

/// Render both strings for the given service
pub fn render(input: &TemplateInput) -> Result<Graph, TemplateError> {
    let opts = options(input.hostname, input.servicedesc);
    let defs = directives(input)?;
    debug!(
        "rendered {} options and {} directives for {} / {}",
        opts.len(),
        defs.len(),
        input.hostname,
        input.servicedesc
    );
    Ok(Graph {
        opt: opts.render(),
        def: defs.render(),
    })
}
