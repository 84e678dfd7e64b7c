//! Candidate-name detector.
//!
//! Unlike the other detectors this one works on the unmodified, line-preserving
//! text: names are conventionally isolated on their own line near the top.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Which rule of the fallback chain produced the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameRule {
    /// A line starting with two or more capitalised words.
    FullNameLine,
    /// `Firstname M. Lastname` anywhere on a line.
    MiddleInitial,
    /// Any `Firstname Lastname` pair.
    FirstLast,
    /// The first non-empty line, when it is 2–4 capitalised words.
    FirstLineFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedName<'a> {
    pub value: &'a str,
    pub rule: NameRule,
}

// Horizontal whitespace only, so a match never spans two lines.
static FULL_NAME_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)^[A-Z][a-z]+ [A-Z][a-z]+(?:[ \t][A-Z][a-z]+)*").expect("valid name regex")
});

static MIDDLE_INITIAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[A-Z][a-z]+[ \t]+[A-Z]\.?[ \t]+[A-Z][a-z]+").expect("valid name regex")
});

static FIRST_LAST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[A-Z][a-z]+[ \t]+[A-Z][a-z]+").expect("valid name regex")
});

/// `Capitalised` in ASCII: one uppercase letter followed only by lowercase letters.
fn is_capitalized_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_lowercase()),
        _ => false,
    }
}

/// Accepts the whole first line when it has 2–4 words, all capitalised.
fn first_line_name(first_line: &str) -> Option<&str> {
    let line = first_line.trim();
    let words: Vec<&str> = line.split_whitespace().collect();
    if (2..=4).contains(&words.len()) && words.iter().all(|w| is_capitalized_word(w)) {
        Some(line)
    } else {
        None
    }
}

/// Runs the name fallback chain over `text`.
///
/// `first_line` is the first non-empty line of `text`, if any.
pub fn find_name<'a>(text: &'a str, first_line: Option<&'a str>) -> Option<DetectedName<'a>> {
    let patterns: [(NameRule, &Regex); 3] = [
        (NameRule::FullNameLine, &*FULL_NAME_LINE_RE),
        (NameRule::MiddleInitial, &*MIDDLE_INITIAL_RE),
        (NameRule::FirstLast, &*FIRST_LAST_RE),
    ];

    for (rule, re) in patterns {
        if let Some(m) = re.find(text) {
            let value = m.as_str().trim();
            if !value.is_empty() {
                return Some(DetectedName { value, rule });
            }
        }
    }

    first_line
        .and_then(first_line_name)
        .map(|value| DetectedName {
            value,
            rule: NameRule::FirstLineFallback,
        })
}
