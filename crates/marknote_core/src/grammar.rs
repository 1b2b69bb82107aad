//! Grammar-check report model and underline-span resolution.
//!
//! # Responsibility
//! - Mirror the `POST /errorCheck` response shape.
//! - Resolve reported offsets into byte ranges usable for underlining.
//!
//! # Invariants
//! - `offset`/`length` are counted in Unicode code points, not bytes and
//!   not UTF-16 units. Multi-byte text resolves to correct byte ranges.
//! - Out-of-range spans are clamped to the end of the text; spans starting
//!   past the end, and zero-length spans, produce nothing.

use serde::{Deserialize, Serialize};

/// Checker response for one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarReport {
    /// The text that was checked, echoed back by the service.
    pub text: String,
    /// Issues found, in service order.
    pub errors: Vec<GrammarIssue>,
}

/// One reported issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    /// Start of the flagged range, in code points from the start of `text`.
    pub offset: usize,
    /// Length of the flagged range, in code points.
    pub length: usize,
    /// Human-readable description of the issue.
    pub message: String,
    /// Surrounding snippet coordinates, same unit as the outer range.
    pub context: IssueContext,
}

/// Snippet coordinates accompanying an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueContext {
    pub offset: usize,
    pub length: usize,
}

/// Byte range into the checked text, half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnderlineSpan {
    pub start: usize,
    pub end: usize,
}

/// Resolves a code-point range to a byte range into `text`.
///
/// Returns `None` when the range starts at or past the end of the text or
/// has zero length.
pub fn span_at(text: &str, offset: usize, length: usize) -> Option<UnderlineSpan> {
    let total = text.chars().count();
    if length == 0 || offset >= total {
        return None;
    }
    let end_char = (offset + length).min(total);
    Some(UnderlineSpan {
        start: byte_index_of_char(text, offset),
        end: byte_index_of_char(text, end_char),
    })
}

/// Resolves every issue in a report to an underline span over `text`.
///
/// Unresolvable issues are dropped rather than reported as errors: a stale
/// or inconsistent checker response must not break the editor.
pub fn underline_spans(text: &str, issues: &[GrammarIssue]) -> Vec<UnderlineSpan> {
    issues
        .iter()
        .filter_map(|issue| span_at(text, issue.offset, issue.length))
        .collect()
}

fn byte_index_of_char(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
