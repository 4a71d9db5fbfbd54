//! Line tokenizer for `.rpp` project text.
//!
//! A token is either a double-quoted span (quotes removed) or a run of
//! non-whitespace characters. Embedded quotes cannot be escaped.

use std::sync::LazyLock;

use regex::Regex;

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*"|\S+"#).expect("token regex is valid"));

/// Characters stripped from both ends of every token.
const TRIM_CHARS: [char; 4] = [' ', '"', '<', '>'];

/// Split one line into tokens.
///
/// Block markers (`<`, `>`) and surrounding quotes are trimmed off each
/// token, so `<TRACK` yields `TRACK` and `"My Track"` yields `My Track`.
pub fn tokenize(line: &str) -> Vec<String> {
    TOKEN_REGEX
        .find_iter(line)
        .map(|m| m.as_str().trim_matches(TRIM_CHARS.as_slice()).to_string())
        .collect()
}
