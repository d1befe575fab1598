//! Model response parsing
//!
//! Turns whatever text the model returned into a Git Flow branch name of the
//! form `<type>/<slug>`, where the slug is lowercase ASCII alphanumeric words
//! joined by single hyphens. Parsing is total: any input yields a name, and an
//! already-normalized name is returned unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::generator::GenerationResult;

/// `BRANCH:` marker, capturing the first non-blank line that follows it
static BRANCH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)BRANCH:\s*([^\r\n]+)").expect("Invalid regex pattern for branch line")
});

/// `EXPLANATION:` marker, capturing everything up to the end of the text
static EXPLANATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)EXPLANATION:\s*(.+)").expect("Invalid regex pattern for explanation")
});

/// Explanation used when the model did not provide one
pub const DEFAULT_EXPLANATION: &str = "Branch name generated successfully.";

/// Parse a raw completion into a branch name and explanation
pub fn parse_response(raw: &str, branch_type: impl AsRef<str>) -> GenerationResult {
    GenerationResult {
        branch_name: normalize_branch_name(raw, branch_type),
        explanation: extract_explanation(raw),
    }
}

/// Normalize raw model output into `<type>/<slug>`
///
/// `branch_type` is used verbatim as the prefix, so it should already be in
/// slug form (see [`BranchTag`](crate::core::branch_type::BranchTag)). The slug
/// may be empty when the model produced nothing usable.
pub fn normalize_branch_name(raw: &str, branch_type: impl AsRef<str>) -> String {
    let candidate = extract_candidate(raw).to_lowercase();

    let replaced: String = candidate
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '/' | '-' => c,
            _ => '-',
        })
        .collect();
    let cleaned = collapse_hyphens(&replaced);
    let cleaned = cleaned.trim_matches(|c| c == '-' || c == '/');

    let prefix = branch_type.as_ref();
    let rest = match cleaned.strip_prefix(prefix) {
        // Covers both "<type>/..." and the bare "<type>..." word
        Some(rest) => rest,
        None => cleaned,
    };

    format!("{prefix}/{}", slugify(rest))
}

/// Extract the explanation line(s), falling back to a fixed sentence
pub fn extract_explanation(raw: &str) -> String {
    EXPLANATION_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_EXPLANATION)
        .to_string()
}

/// Check that `name` is `<type>/<slug>` with a non-empty, well-formed slug
pub fn is_valid_branch_name(name: &str, branch_type: impl AsRef<str>) -> bool {
    match slug_of(name, branch_type) {
        Some(slug) => {
            !slug.is_empty()
                && slug.split('-').all(|segment| {
                    !segment.is_empty()
                        && segment
                            .chars()
                            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                })
        }
        None => false,
    }
}

/// The part after `<type>/`, if `name` carries that prefix
pub fn slug_of(name: &str, branch_type: impl AsRef<str>) -> Option<&str> {
    name.strip_prefix(branch_type.as_ref())?.strip_prefix('/')
}

/// Text after the `BRANCH:` marker, or the whole input when there is none
fn extract_candidate(raw: &str) -> &str {
    BRANCH_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw)
        .trim()
}

/// Turn the remainder after the type prefix into hyphen-joined segments
fn slugify(rest: &str) -> String {
    rest.split(|c| c == '-' || c == '/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn collapse_hyphens(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_hyphen = false;
    for c in s.chars() {
        if c == '-' {
            if !previous_hyphen {
                out.push(c);
            }
            previous_hyphen = true;
        } else {
            out.push(c);
            previous_hyphen = false;
        }
    }
    out
}
