//! Title and identifier derivation.
//!
//! # Responsibility
//! - Derive a human-readable title from raw Markdown content.
//! - Mint unique-enough identifiers for newly created notes.
//!
//! # Invariants
//! - Title derivation is pure: same content, same title.
//! - Truncation counts Unicode code points, not bytes.

use crate::model::note::NoteId;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s+(.*)").expect("valid heading regex"));

const TITLE_MAX_CHARS: usize = 30;
const UNTITLED: &str = "Untitled Note";
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Derives the display title from note content.
///
/// Rules:
/// - A leading level-1 heading (`# ` + text) wins; its text is trimmed.
/// - Otherwise the first line, cut to 30 code points with a `...` marker
///   when longer.
/// - Empty content or an empty first line yields `"Untitled Note"`.
pub fn derive_title(content: &str) -> String {
    if let Some(caps) = HEADING_RE.captures(content) {
        let heading = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if !heading.is_empty() {
            return heading.trim().to_string();
        }
    }

    let first_line = content.lines().next().unwrap_or("");
    if first_line.is_empty() {
        return UNTITLED.to_string();
    }

    if first_line.chars().count() > TITLE_MAX_CHARS {
        let mut truncated: String = first_line.chars().take(TITLE_MAX_CHARS).collect();
        truncated.push_str("...");
        truncated
    } else {
        first_line.to_string()
    }
}

/// Mints a new note identifier.
///
/// Base-36 of current epoch milliseconds concatenated with a base-36 random
/// 64-bit fragment. Unique with overwhelmingly high probability within one
/// process; collisions are neither detected nor retried. Acceptable for a
/// single-user, low-volume collection only.
pub fn generate_note_id() -> NoteId {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let fragment: u64 = rand::thread_rng().gen();
    format!("{}{}", to_base36(millis), to_base36(fragment))
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut encoded = String::new();
    while value > 0 {
        encoded.insert(0, BASE36_DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    encoded
}
