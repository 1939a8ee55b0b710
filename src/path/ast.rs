//! Syntax tree types for bean path expressions.

use std::fmt;
use std::str::FromStr;

use super::parser::Parser;
use crate::error::BeanError;

/// A `start:end:step` selector. Missing bounds mean "from the beginning",
/// "to the end" and a step of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub step: Option<i64>,
}

/// One step of a bean path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A field name, map key or, against a sequence, a numeric index.
    Name(String),
    /// A slice over a sequence (`[1:4]`, `[::2]`).
    Slice(Slice),
    /// Several indices or keys at once (`[0,2]`, `['a','b']`).
    Multi(Vec<String>),
}

impl Segment {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Segment::Name(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => write!(f, "{}", name),
            Segment::Slice(slice) => {
                let bound = |b: Option<i64>| b.map(|v| v.to_string()).unwrap_or_default();
                write!(f, "{}:{}", bound(slice.start), bound(slice.end))?;
                if let Some(step) = slice.step {
                    write!(f, ":{}", step)?;
                }
                Ok(())
            }
            Segment::Multi(parts) => write!(f, "{}", parts.join(",")),
        }
    }
}

/// A parsed bean path expression.
///
/// Paths are immutable once parsed and can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BeanPath {
    segments: Vec<Segment>,
    rooted: bool,
}

impl BeanPath {
    /// Parses an expression such as `person.friends[2].name`.
    pub fn parse(expression: &str) -> Result<Self, BeanError> {
        Parser::parse(expression)
    }

    pub fn new(segments: Vec<Segment>, rooted: bool) -> Self {
        Self { segments, rooted }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True if the expression started with `$`.
    pub fn is_rooted(&self) -> bool {
        self.rooted
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for BeanPath {
    type Err = BeanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeanPath::parse(s)
    }
}

impl fmt::Display for BeanPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rooted {
            write!(f, "$")?;
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Name(name) if is_plain_name(name) => {
                    if i > 0 || self.rooted {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                Segment::Name(name) if name.parse::<i64>().is_ok() => write!(f, "[{}]", name)?,
                Segment::Name(name) => write!(f, "['{}']", name)?,
                other => write!(f, "[{}]", other)?,
            }
        }
        Ok(())
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name.parse::<i64>().is_err()
        && !name.starts_with('$')
        && !name.contains(['.', '[', ']', '\'', ':', ','])
}
