//! Regex-pass syntax highlighting.
//!
//! Each language carries a fixed, ordered list of regex rules applied
//! independently over the whole buffer; every match becomes one span. The
//! rendering layer applies spans as successive attribute passes in rule
//! order, so where ranges overlap a later rule's attributes win for the
//! attributes it sets. No nesting, no escape handling, no constructs beyond
//! what a single pass covers. This is an intentional approximation, not a
//! full grammar.

mod markdown;
mod python;

use regex::Regex;
use std::path::Path;

/// Languages the highlighter recognizes. Anything else gets no spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageTag {
    Python,
    Markdown,
}

impl LanguageTag {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::from_extension(&ext)
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "py" => Some(Self::Python),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// Style attribute attached to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanStyle {
    Keyword,
    Str,
    Comment,
    Heading,
    Bold,
}

/// A styled byte range within the highlighted text. `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpan {
    pub start: usize,
    pub end: usize,
    pub style: SpanStyle,
}

pub(crate) struct Rule {
    pattern: Regex,
    style: SpanStyle,
}

impl Rule {
    pub(crate) fn new(pattern: &str, style: SpanStyle) -> Option<Rule> {
        Regex::new(pattern)
            .ok()
            .map(|pattern| Rule { pattern, style })
    }
}

/// Produce style spans for `text` under `language`.
///
/// Pure and total: deterministic for given inputs, tolerates arbitrary
/// input, and unterminated constructs simply match nothing. Spans are
/// ordered by rule, then by position.
pub fn highlight(text: &str, language: LanguageTag) -> Vec<StyleSpan> {
    if text.is_empty() {
        return Vec::new();
    }
    let rules = match language {
        LanguageTag::Python => python::rules(),
        LanguageTag::Markdown => markdown::rules(),
    };

    let mut spans = Vec::new();
    for rule in rules {
        for m in rule.pattern.find_iter(text) {
            if m.start() < m.end() {
                spans.push(StyleSpan {
                    start: m.start(),
                    end: m.end(),
                    style: rule.style,
                });
            }
        }
    }
    spans
}
