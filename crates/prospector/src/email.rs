//! Contact email extraction and classification.
//!
//! The public event feed is a heterogeneous pile of payload shapes; rather
//! than decoding every event schema, extraction pattern-matches the first
//! `"email":"…"` field in the serialized feed text. First match wins; later
//! candidates are deliberately ignored.

use std::sync::LazyLock;

use regex::Regex;

/// First `"email"` string field anywhere in the serialized feed.
/// Tolerates whitespace around the colon for non-compact serializations.
static EMAIL_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""email"\s*:\s*"(.+?)""#).expect("valid regex"));

/// Minimal email shape: something before an `@`, and a dot somewhere in
/// the domain.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+?@.+\..+$").expect("valid regex"));

/// Classification of a raw feed blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No email-shaped candidate was found.
    NoMatch,
    /// A candidate was found but it is a GitHub-owned placeholder address.
    Excluded,
    /// A usable contact address.
    Valid(String),
}

/// Classify the serialized text of a user's public event feed.
///
/// Returns [`Outcome::Excluded`] for addresses owned by GitHub itself: a
/// literal `github` local part or a domain ending in `github.com` (both
/// case-insensitive). These are noreply/placeholder addresses, not contact
/// info.
pub fn classify(raw_feed: &str) -> Outcome {
    let Some(captures) = EMAIL_FIELD.captures(raw_feed) else {
        return Outcome::NoMatch;
    };
    let candidate = &captures[1];

    if !EMAIL_SHAPE.is_match(candidate) {
        return Outcome::NoMatch;
    }

    let lowered = candidate.to_ascii_lowercase();
    if lowered.starts_with("github@") || lowered.ends_with("github.com") {
        return Outcome::Excluded;
    }

    Outcome::Valid(candidate.to_string())
}
