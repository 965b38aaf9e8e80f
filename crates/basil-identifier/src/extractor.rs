//! Descendant Chain Extraction
//!
//! The analyser never parses chains itself. It asks an [`IdentifierExtractor`]
//! for the chain at the start of a string and checks whether that is the
//! whole string.
//!
//! Implementations:
//! - [`DescendantIdentifierExtractor`]: `$".parent" >> $".child"`
//! - [`ParentPrefixExtractor`]: `{{ $".parent" }} $".child"`

use crate::grammar::PARENT_PREFIX_REGEX;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEPARATOR: &str = ">>";

const ELEMENT_PREFIX: &str = "$\"";
const PARENT_OPEN: &str = "{{ ";
const PARENT_CLOSE: &str = " }} ";

/// Finds the descendant chain at the start of a raw string.
pub trait IdentifierExtractor: Send + Sync {
    /// Returns the longest prefix of `raw` that is a descendant chain of two
    /// or more segments, or `""` if there is none. Must never panic.
    fn extract_identifier<'a>(&self, raw: &'a str) -> &'a str;
}

/// Which descendant syntax an analyser should recognise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainSyntax {
    #[default]
    Separator,
    Braced,
}

/// Chains written as segments joined by a separator token.
#[derive(Debug, Clone)]
pub struct DescendantIdentifierExtractor {
    separator: String,
}

impl DescendantIdentifierExtractor {
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// The separator is trimmed; a blank separator would make every pair of
    /// adjacent segments a chain, so callers should reject it beforehand.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into().trim().to_string(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Length of the separator plus surrounding whitespace at the start of `rest`.
    fn scan_separator(&self, rest: &str) -> Option<usize> {
        if self.separator.is_empty() {
            return None;
        }
        let after_space = rest.trim_start();
        let after_separator = after_space.strip_prefix(self.separator.as_str())?;
        let after_trailing = after_separator.trim_start();
        Some(rest.len() - after_trailing.len())
    }
}

impl Default for DescendantIdentifierExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierExtractor for DescendantIdentifierExtractor {
    fn extract_identifier<'a>(&self, raw: &'a str) -> &'a str {
        let mut chain_end = 0;
        let mut segments = 0;
        let mut cursor = 0;

        while let Some(segment_end) = scan_element(raw, cursor) {
            segments += 1;
            if segments >= 2 {
                chain_end = segment_end;
            }

            match self.scan_separator(&raw[segment_end..]) {
                Some(len) => cursor = segment_end + len,
                None => {
                    if segments >= 2 {
                        chain_end += scan_attribute(&raw[segment_end..]);
                    }
                    break;
                }
            }
        }

        &raw[..chain_end]
    }
}

/// Chains written as `{{ PARENT }} CHILD`, where the parent may itself be a
/// braced chain. Nesting depth is bounded only by the input length.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParentPrefixExtractor;

impl ParentPrefixExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl IdentifierExtractor for ParentPrefixExtractor {
    fn extract_identifier<'a>(&self, raw: &'a str) -> &'a str {
        if !PARENT_PREFIX_REGEX.is_match(raw) {
            return "";
        }
        match scan_braced(raw) {
            Some(end) => &raw[..end],
            None => "",
        }
    }
}

/// Counts the leading `{{ ` opens, scans the innermost parent, then walks
/// outward matching one ` }} CHILD` per open. Only the outermost child may
/// carry an attribute.
fn scan_braced(raw: &str) -> Option<usize> {
    let mut depth = 0;
    let mut cursor = 0;
    while raw[cursor..].starts_with(PARENT_OPEN) {
        depth += 1;
        cursor += PARENT_OPEN.len();
    }
    if depth == 0 {
        return None;
    }

    let mut end = scan_element(raw, cursor)?;
    for _ in 0..depth {
        if !raw[end..].starts_with(PARENT_CLOSE) {
            return None;
        }
        end = scan_element(raw, end + PARENT_CLOSE.len())?;
    }

    Some(end + scan_attribute(&raw[end..]))
}

/// Scans `$"body"` plus an optional position starting at `from`, returning the
/// byte offset just past it. Inside the body `\"` escapes a quote.
fn scan_element(raw: &str, from: usize) -> Option<usize> {
    let rest = raw[from..].strip_prefix(ELEMENT_PREFIX)?;
    let body_start = from + ELEMENT_PREFIX.len();

    let mut escaped = false;
    let mut body_len = None;
    for (idx, c) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => {
                body_len = Some(idx);
                break;
            }
            _ => {}
        }
    }

    let body = &rest[..body_len?];
    if !is_selector_body(body) {
        return None;
    }

    let quote_end = body_start + body.len() + 1;
    Some(quote_end + scan_position(&raw[quote_end..]))
}

fn is_selector_body(body: &str) -> bool {
    let mut chars = body.chars();
    match chars.next() {
        None | Some('\n') => false,
        Some('/') => chars.next().is_some(),
        Some(_) => true,
    }
}

fn scan_position(rest: &str) -> usize {
    let Some(qualifier) = rest.strip_prefix(':') else {
        return 0;
    };
    for keyword in ["first", "last"] {
        if qualifier.starts_with(keyword) {
            return 1 + keyword.len();
        }
    }

    let sign = usize::from(qualifier.starts_with('-'));
    let digits = qualifier[sign..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 { 0 } else { 1 + sign + digits }
}

fn scan_attribute(rest: &str) -> usize {
    let Some(name) = rest.strip_prefix('.') else {
        return 0;
    };
    let len: usize = name
        .chars()
        .take_while(|c| !c.is_whitespace() && *c != '"')
        .map(char::len_utf8)
        .sum();
    if len == 0 { 0 } else { 1 + len }
}
