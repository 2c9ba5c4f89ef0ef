//! Tolerant parsing of oracle text into candidate records
//!
//! The oracle is asked for bare JSON but routinely wraps it in markdown
//! fences or surrounds it with prose. The parser tries an ordered list of
//! [`ParseStrategy`] values; each one proposes a candidate substring which is
//! then parsed strictly against the expected shape.

use crate::error::ParseFailure;
use crate::types::CandidateRecord;
use greenorb_domain::RawOracleResponse;
use serde_json::Value;
use tracing::{debug, warn};

/// Maximum characters of raw text kept in a [`ParseFailure::MalformedOutput`]
pub const SAMPLE_CHARS: usize = 100;

/// JSON shape a template asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// A single JSON object
    Object,
    /// An array of JSON objects
    Array,
}

impl Expect {
    fn delimiters(&self) -> (char, char) {
        match self {
            Expect::Object => ('{', '}'),
            Expect::Array => ('[', ']'),
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            Expect::Object => value.is_object(),
            Expect::Array => value.is_array(),
        }
    }
}

/// One way of locating JSON inside oracle text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// Trim, then drop a leading ```` ```json ```` or ```` ``` ```` and a trailing fence
    FenceStrip,
    /// Scan for balanced `{...}` or `[...]` substrings, ignoring delimiters inside strings
    DelimitedScan,
}

impl ParseStrategy {
    fn attempt(&self, raw: &str, expect: Expect) -> Option<Value> {
        match self {
            ParseStrategy::FenceStrip => parse_strict(strip_fences(raw), expect),
            ParseStrategy::DelimitedScan => {
                let (open, close) = expect.delimiters();
                balanced_spans(raw, open, close)
                    .into_iter()
                    .find_map(|(start, end)| parse_strict(&raw[start..end], expect))
            }
        }
    }
}

/// The successfully parsed payload
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// From [`Expect::Object`]
    Object(CandidateRecord),
    /// From [`Expect::Array`]; non-object elements already dropped
    Array(Vec<CandidateRecord>),
}

/// Parses raw oracle responses with a configurable strategy order
#[derive(Debug, Clone)]
pub struct ResponseParser {
    strategies: Vec<ParseStrategy>,
}

impl ResponseParser {
    /// Parser using the given strategies, tried in order
    pub fn with_strategies(strategies: Vec<ParseStrategy>) -> Self {
        Self { strategies }
    }

    /// The strategies in the order they are tried
    pub fn strategies(&self) -> &[ParseStrategy] {
        &self.strategies
    }

    /// Parse a response into the expected shape
    ///
    /// # Examples
    ///
    /// ```
    /// use greenorb_extractor::{Expect, Parsed, ResponseParser};
    /// use greenorb_domain::RawOracleResponse;
    ///
    /// let parser = ResponseParser::default();
    /// let raw = RawOracleResponse::ok("Sure! {\"company_name\": \"Acme Corp\"} Hope it helps.");
    /// match parser.parse(&raw, Expect::Object).unwrap() {
    ///     Parsed::Object(record) => assert_eq!(record.get("company_name").unwrap(), "Acme Corp"),
    ///     Parsed::Array(_) => unreachable!(),
    /// }
    /// ```
    pub fn parse(&self, raw: &RawOracleResponse, expect: Expect) -> Result<Parsed, ParseFailure> {
        if !raw.is_ok() {
            return Err(ParseFailure::OracleUnavailable {
                status: raw.status.clone(),
            });
        }

        let value = self
            .strategies
            .iter()
            .find_map(|strategy| {
                let value = strategy.attempt(&raw.text, expect);
                if value.is_some() {
                    debug!("Parsed oracle output with {:?}", strategy);
                }
                value
            })
            .ok_or_else(|| malformed(raw))?;

        match value {
            Value::Array(items) => {
                let mut records = Vec::with_capacity(items.len());
                for (idx, item) in items.into_iter().enumerate() {
                    match CandidateRecord::from_value(item) {
                        Some(record) => records.push(record),
                        None => warn!("Skipping array element {}: not a JSON object", idx),
                    }
                }
                Ok(Parsed::Array(records))
            }
            Value::Object(map) => Ok(Parsed::Object(CandidateRecord::new(map))),
            _ => Err(malformed(raw)),
        }
    }

    /// Parse a response expected to be a single object
    pub fn parse_object(&self, raw: &RawOracleResponse) -> Result<CandidateRecord, ParseFailure> {
        match self.parse(raw, Expect::Object)? {
            Parsed::Object(record) => Ok(record),
            Parsed::Array(_) => Err(malformed(raw)),
        }
    }

    /// Parse a response expected to be an array of objects
    pub fn parse_array(&self, raw: &RawOracleResponse) -> Result<Vec<CandidateRecord>, ParseFailure> {
        match self.parse(raw, Expect::Array)? {
            Parsed::Array(records) => Ok(records),
            Parsed::Object(_) => Err(malformed(raw)),
        }
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::with_strategies(vec![ParseStrategy::FenceStrip, ParseStrategy::DelimitedScan])
    }
}

fn malformed(raw: &RawOracleResponse) -> ParseFailure {
    ParseFailure::MalformedOutput {
        sample: raw.text.chars().take(SAMPLE_CHARS).collect(),
    }
}

fn parse_strict(candidate: &str, expect: Expect) -> Option<Value> {
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(|value| expect.matches(value))
}

/// Strip markdown code fences around the payload
fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Byte ranges of balanced `open`/`close` spans, ordered by start
///
/// Single pass over `text`. Quotes are only tracked inside an open span, and
/// delimiters inside strings are ignored. Openers that never close produce no
/// span but do not hide the spans nested after them.
fn balanced_spans(text: &str, open: char, close: char) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut starts: Vec<usize> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == open {
            starts.push(offset);
        } else if c == close {
            if let Some(start) = starts.pop() {
                spans.push((start, offset + c.len_utf8()));
            }
        } else if c == '"' && !starts.is_empty() {
            in_string = true;
        }
    }

    spans.sort_unstable_by_key(|&(start, _)| start);
    spans
}
