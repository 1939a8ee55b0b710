//! Bean path expression parser.
//!
//! The grammar is deliberately loose: `.`, `[` and `]` separate segments and
//! everything else is collected into the current segment. The only hard
//! errors are unbalanced brackets.

use super::ast::{BeanPath, Segment, Slice};
use crate::error::BeanError;

/// Segment contents that are kept verbatim, quotes included.
const LITERAL_MARKERS: &[&str] = &[" = ", " > ", " < ", " like ", ","];

/// Parser for bean path expressions.
pub struct Parser<'a> {
    input: &'a str,
    segments: Vec<Segment>,
    buffer: String,
    in_bracket: bool,
    rooted: bool,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given expression.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            segments: Vec::new(),
            buffer: String::new(),
            in_bracket: false,
            rooted: false,
        }
    }

    /// Parses an expression into a [`BeanPath`].
    pub fn parse(input: &str) -> Result<BeanPath, BeanError> {
        Parser::new(input).run()
    }

    fn run(mut self) -> Result<BeanPath, BeanError> {
        let mut length = 0;
        for (offset, ch) in self.input.chars().enumerate() {
            length = offset + 1;
            if offset == 0 && ch == '$' {
                self.rooted = true;
                continue;
            }
            match ch {
                ']' => {
                    if !self.in_bracket {
                        return Err(self.error(offset, "found ']' without a matching '['"));
                    }
                    self.in_bracket = false;
                    self.flush();
                }
                '[' => {
                    if self.in_bracket {
                        return Err(self.error(offset, "found '[' before the previous ']'"));
                    }
                    self.in_bracket = true;
                    self.flush();
                }
                // Inside brackets a dot belongs to the key: ['a.b']
                '.' if !self.in_bracket => self.flush(),
                _ => self.buffer.push(ch),
            }
        }

        if self.in_bracket {
            return Err(self.error(
                length.saturating_sub(1),
                "found '[' without a matching ']'",
            ));
        }
        self.flush();
        Ok(BeanPath::new(self.segments, self.rooted))
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            let segment = classify(&self.buffer);
            self.segments.push(segment);
            self.buffer.clear();
        }
    }

    fn error(&self, offset: usize, reason: &str) -> BeanError {
        BeanError::InvalidExpression {
            expression: self.input.to_string(),
            offset,
            reason: reason.to_string(),
        }
    }
}

/// Strips one pair of single quotes unless the text is an operator
/// expression. Returns the text and whether quotes were removed.
pub(crate) fn unwrap_quotes(raw: &str) -> (&str, bool) {
    if LITERAL_MARKERS.iter().any(|m| raw.contains(m)) {
        return (raw, false);
    }
    match raw
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        Some(inner) => (inner, true),
        None => (raw, false),
    }
}

fn classify(raw: &str) -> Segment {
    let (text, quoted) = unwrap_quotes(raw);
    if quoted {
        return Segment::Name(text.to_string());
    }
    if text.contains(':') {
        if let Some(slice) = parse_slice(text) {
            return Segment::Slice(slice);
        }
    } else if text.contains(',') {
        let parts = text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        return Segment::Multi(parts);
    }
    Segment::Name(text.to_string())
}

fn parse_slice(text: &str) -> Option<Slice> {
    let parts: Vec<&str> = text.split(':').map(str::trim).collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }
    let bound = |part: &str| -> Option<Option<i64>> {
        if part.is_empty() {
            Some(None)
        } else {
            part.parse::<i64>().ok().map(Some)
        }
    };
    Some(Slice {
        start: bound(parts[0])?,
        end: bound(parts[1])?,
        step: match parts.get(2) {
            Some(part) => bound(part)?,
            None => None,
        },
    })
}
