//! Output post-formatting
//!
//! Pure transforms applied to text before it reaches the update callback.
//! Most providers pass through unchanged; citation-bearing providers
//! (Perplexity) get their inline `[n]` markers rewritten into Markdown
//! footnote references with an appended definition list.

use once_cell::sync::Lazy;
use regex::Regex;

/// Per-provider text transform: `(text, citations) -> text`.
///
/// Delta frames carry no citations and pass an empty slice.
pub type OutputFormatter = fn(&str, &[String]) -> String;

/// Inline numeric reference marker, e.g. `[3]`.
static CITATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d+)]").expect("citation marker pattern is valid"));

/// Pass-through formatter used by providers without special output handling.
pub fn identity_format(text: &str, _citations: &[String]) -> String {
    text.to_string()
}

/// Rewrite `[n]` markers to footnote references and append the footnote list.
///
/// Every `[n]` becomes ` [^n]`, whether or not a matching citation exists.
/// When the citation list is non-empty, a blank line plus one
/// `[^k]: url` definition per citation (k is the 1-based list position) is
/// appended.
pub fn citation_format(text: &str, citations: &[String]) -> String {
    let mut formatted = CITATION_MARKER.replace_all(text, " [^$1]").into_owned();

    if !citations.is_empty() {
        formatted.push_str("\n\n");
        let footnotes = citations
            .iter()
            .enumerate()
            .map(|(index, url)| format!("[^{}]: {}", index + 1, url))
            .collect::<Vec<_>>()
            .join("\n");
        formatted.push_str(&footnotes);
    }

    formatted
}
