//! Structured extraction — coerces free-form completion text into a JSON value.
//!
//! Strategies run in a fixed order, from "the model did the right thing" to
//! best-effort substring recovery. Each one reports an explicit outcome; the
//! first `Parsed` wins. Nothing here panics or returns raw text as success.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::prompts::truncate_chars;

/// Maximum characters of raw text kept in a failure preview.
pub const PREVIEW_CHARS: usize = 500;
const TRUNCATION_MARKER: &str = "...";

/// Shape the caller expects back. Only interview-question generation asks for a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedShape {
    Object,
    List,
}

/// One step of the extraction cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The whole text is a JSON document.
    Direct,
    /// Markdown fences (any language tag) stripped, then parsed.
    Fenced,
    /// Span from the first `{` to the last `}`.
    OuterObject,
    /// Span from the first `[` to the last `]`.
    OuterArray,
}

impl Strategy {
    /// Cascade order for a given shape. A list hint tries the bracket span
    /// before the brace span so `[{..}, {..}]` is not read as one object.
    pub fn cascade(shape: ExpectedShape) -> &'static [Strategy] {
        match shape {
            ExpectedShape::Object => &[Strategy::Direct, Strategy::Fenced, Strategy::OuterObject],
            ExpectedShape::List => &[
                Strategy::Direct,
                Strategy::Fenced,
                Strategy::OuterArray,
                Strategy::OuterObject,
            ],
        }
    }

    pub fn attempt(self, text: &str) -> Attempt {
        match self {
            Strategy::Direct => parse(text),
            Strategy::Fenced => {
                if !text.contains("```") {
                    return Attempt::NotApplicable;
                }
                parse(strip_fences(text).trim())
            }
            Strategy::OuterObject => match outer_span(text, '{', '}') {
                Some(span) => parse(span),
                None => Attempt::NotApplicable,
            },
            Strategy::OuterArray => match outer_span(text, '[', ']') {
                Some(span) => parse(span),
                None => Attempt::NotApplicable,
            },
        }
    }
}

/// Outcome of a single strategy.
#[derive(Debug)]
pub enum Attempt {
    Parsed(Value),
    /// The strategy's precondition did not hold (no fence, no braces, ...).
    NotApplicable,
    Failed(serde_json::Error),
}

/// No strategy produced a value. Carries a bounded preview of the raw text.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Could not extract valid JSON from response ({reason})")]
pub struct ParseFailure {
    pub reason: String,
    pub preview: String,
}

impl ParseFailure {
    fn new(reason: String, raw_text: &str) -> Self {
        Self {
            reason,
            preview: preview(raw_text),
        }
    }
}

/// Runs the extraction cascade over `raw_text`.
pub fn extract(raw_text: &str, shape: ExpectedShape) -> Result<Value, ParseFailure> {
    let mut last_error: Option<serde_json::Error> = None;

    for strategy in Strategy::cascade(shape) {
        match strategy.attempt(raw_text) {
            Attempt::Parsed(value) => {
                debug!("Extracted structured value via {:?}", strategy);
                return Ok(value);
            }
            Attempt::NotApplicable => {}
            Attempt::Failed(e) => last_error = Some(e),
        }
    }

    let reason = match last_error {
        Some(e) => format!("last decode error: {e}"),
        None => "no JSON structure found".to_string(),
    };
    Err(ParseFailure::new(reason, raw_text))
}

/// First `PREVIEW_CHARS` characters of `text`, with a marker when cut.
pub fn preview(text: &str) -> String {
    match truncate_chars(text, PREVIEW_CHARS) {
        (kept, true) => format!("{kept}{TRUNCATION_MARKER}"),
        (kept, false) => kept.to_string(),
    }
}

fn parse(text: &str) -> Attempt {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Attempt::Parsed(value),
        Err(e) => Attempt::Failed(e),
    }
}

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    // Opening fences carry an optional language tag; closing fences are bare.
    FENCE.get_or_init(|| Regex::new(r"```[A-Za-z0-9_+\-]*[ \t]*").unwrap())
}

/// Removes every fence marker (```json, ```JSON, ```javascript, bare ```).
fn strip_fences(text: &str) -> String {
    fence_pattern().replace_all(text, "").into_owned()
}

/// Greedy outer span: first `open` through last `close`. Several top-level
/// groups collapse into one span and are parsed (and usually rejected) as a whole.
fn outer_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (start < end).then(|| &text[start..=end])
}
