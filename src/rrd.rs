//! The rrdtool graph mini-language
//!
//! `rrdtool graph` takes two kinds of arguments: options (`--title`, `-b`,
//! ...) and graph directives (`DEF:`, `CDEF:`, `AREA:`, ...). This module
//! models both as typed values whose `Display` output is exactly what
//! rrdtool expects, and an append-only `ArgList` that joins them.
//!
//! Text arguments (legends, comments, print formats) are written out
//! verbatim between double quotes. rrdtool interprets escape sequences like
//! `\t` and `\n` itself, so callers pass them as literal backslash sequences.

use std::fmt;
use std::slice;

/// How to aggregate primary data points when reading from an RRA
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsolidationFn {
    Average,
    Max,
    Last,
}

impl ConsolidationFn {
    pub fn as_arg_str(self) -> &'static str {
        match self {
            ConsolidationFn::Average => "AVERAGE",
            ConsolidationFn::Max => "MAX",
            ConsolidationFn::Last => "LAST",
        }
    }
}

impl fmt::Display for ConsolidationFn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_arg_str())
    }
}

/// An opaque RGB color, rendered as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// What a graph element draws: a named variable or a constant
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Var(String),
    Constant(f64),
}

impl Value {
    pub fn var<S: Into<String>>(name: S) -> Value {
        Value::Var(name.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Var(ref name) => f.write_str(name),
            Value::Constant(c) => write!(f, "{}", c),
        }
    }
}

/// A single graph directive
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `DEF:<vname>=<rrdfile>:<ds>:<CF>`
    Def {
        vname: String,
        rrdfile: String,
        ds: String,
        cf: ConsolidationFn,
    },
    /// `CDEF:<vname>=<rpn expression>`
    Cdef { vname: String, rpn: String },
    /// `HRULE:<value><color>`
    Hrule { value: f64, color: Color },
    /// `COMMENT:"<text>"`
    Comment(String),
    /// `AREA:<value><color>[:"<legend>"][:STACK]`
    Area {
        value: Value,
        color: Color,
        legend: Option<String>,
        stack: bool,
    },
    /// `LINE<width>:<value><color>[:"<legend>"]`
    Line {
        width: u32,
        value: Value,
        color: Color,
        legend: Option<String>,
    },
    /// `GPRINT:<vname>:<CF>:"<format>"`
    Gprint {
        vname: String,
        cf: ConsolidationFn,
        format: String,
    },
}

impl Directive {
    /// The leading keyword, e.g. `DEF` or `GPRINT`
    pub fn keyword(&self) -> &'static str {
        match *self {
            Directive::Def { .. } => "DEF",
            Directive::Cdef { .. } => "CDEF",
            Directive::Hrule { .. } => "HRULE",
            Directive::Comment(_) => "COMMENT",
            Directive::Area { .. } => "AREA",
            Directive::Line { .. } => "LINE",
            Directive::Gprint { .. } => "GPRINT",
        }
    }
}

fn write_legend(f: &mut fmt::Formatter, legend: &Option<String>, stack: bool) -> fmt::Result {
    if let Some(ref legend) = *legend {
        write!(f, ":\"{}\"", legend)?;
    }
    if stack {
        f.write_str(":STACK")?;
    }
    Ok(())
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Directive::*;
        match *self {
            Def {
                ref vname,
                ref rrdfile,
                ref ds,
                cf,
            } => write!(f, "DEF:{}={}:{}:{}", vname, rrdfile, ds, cf),
            Cdef { ref vname, ref rpn } => write!(f, "CDEF:{}={}", vname, rpn),
            Hrule { value, color } => write!(f, "HRULE:{}{}", value, color),
            Comment(ref text) => write!(f, "COMMENT:\"{}\"", text),
            Area {
                ref value,
                color,
                ref legend,
                stack,
            } => {
                write!(f, "AREA:{}{}", value, color)?;
                write_legend(f, legend, stack)
            }
            Line {
                width,
                ref value,
                color,
                ref legend,
            } => {
                write!(f, "LINE{}:{}{}", width, value, color)?;
                write_legend(f, legend, false)
            }
            Gprint {
                ref vname,
                cf,
                ref format,
            } => write!(f, "GPRINT:{}:{}:\"{}\"", vname, cf, format),
        }
    }
}

/// Options controlling how the whole graph is rendered
#[derive(Debug, Clone, PartialEq)]
pub enum GraphOption {
    VerticalLabel(String),
    /// `-l<n>`, the lower limit of the y axis
    LowerLimit(i64),
    /// `-b <n>`, 1000 or 1024
    Base(u32),
    AltAutoscaleMax,
    Rigid,
    Title(String),
}

impl fmt::Display for GraphOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::GraphOption::*;
        match *self {
            VerticalLabel(ref label) => write!(f, "--vertical-label \"{}\"", label),
            LowerLimit(limit) => write!(f, "-l{}", limit),
            Base(base) => write!(f, "-b {}", base),
            AltAutoscaleMax => f.write_str("--alt-autoscale-max"),
            Rigid => f.write_str("--rigid"),
            Title(ref title) => write!(f, "--title \"{}\"", title),
        }
    }
}

/// An ordered, append-only list of rrdtool arguments
///
/// Rendering writes every argument followed by a single space, which is the
/// form that PNP-style templates hand to rrdtool.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgList<T>(Vec<T>);

impl<T: fmt::Display> ArgList<T> {
    pub fn new() -> ArgList<T> {
        ArgList(Vec::new())
    }

    pub fn push(&mut self, arg: T) -> &mut Self {
        self.0.push(arg);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<T> {
        self.0.iter()
    }

    pub fn render(&self) -> String {
        self.0.iter().map(|arg| format!("{} ", arg)).collect()
    }
}

impl<T: fmt::Display> Default for ArgList<T> {
    fn default() -> ArgList<T> {
        ArgList::new()
    }
}

impl<T: fmt::Display> Extend<T> for ArgList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}
