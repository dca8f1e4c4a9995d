// Parsing and validation of raw model output into an `EMOJI,Begriff` pair.
// Malformed output is routine, not exceptional: every failure path returns
// None, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// A validated combination result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub emoji: String,
    /// Lower-cased label, 2–50 characters.
    pub text: String,
}

/// Emoji tokens longer than this (in UTF-16 code units) are rejected.
const MAX_EMOJI_UTF16_UNITS: usize = 4;

static EMOJI_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"^[\p{Emoji}\p{Emoji_Modifier}\p{Emoji_Component}\p{Emoji_Modifier_Base}\p{Emoji_Presentation}]+$",
    )
    .ok()
});

/// Whether a token looks like a short emoji glyph sequence.
pub fn is_valid_emoji(token: &str) -> bool {
    if token.is_empty() || token.encode_utf16().count() > MAX_EMOJI_UTF16_UNITS {
        return false;
    }
    match EMOJI_RE.as_ref() {
        Some(re) => re.is_match(token),
        // Degraded heuristic when the emoji property classes are unavailable:
        // accept anything that is not plain ASCII alphanumerics.
        None => !token.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}

/// Parse raw generated text into a `Combination`.
///
/// Only the first line is considered. It must contain a comma splitting it
/// into an emoji token and a label token. The label is stripped of brackets
/// and trailing punctuation, collapsed to its first three words, and
/// lower-cased; it must be 2–50 characters and not purely numeric.
pub fn parse_output(raw: &str) -> Option<Combination> {
    let first_line = raw.lines().next().unwrap_or("").trim();

    let mut parts = first_line.split(',');
    let emoji = parts.next()?.trim();
    let label = parts.next()?.trim();

    let label: String = label
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '[' | ']' | '{' | '}'))
        .collect();
    let label = label.trim_end_matches(['.', '!', '?', ';', ':', '—', '–', '-']);
    let label = label
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ");

    let len = label.chars().count();
    if !is_valid_emoji(emoji) || len < 2 || len > 50 {
        return None;
    }
    if label.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(Combination {
        emoji: emoji.to_string(),
        text: label.to_lowercase(),
    })
}
