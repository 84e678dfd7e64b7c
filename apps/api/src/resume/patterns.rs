//! Contact-field detectors: email, phone, LinkedIn and portfolio URLs.
//!
//! Every detector runs over the whitespace-collapsed form of the resume text and
//! returns the first match in document order, borrowed from the input.

use std::sync::LazyLock;

use regex::Regex;

// Word boundaries are ASCII-only: a match may sit directly against CJK or
// accented letters.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?-u:\b)")
        .expect("valid email regex")
});

/// North-American numbers only: optional +1/1 country code, optional parenthesised
/// area code, space/dot/hyphen separators. Area codes are not validated.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}(?-u:\b)")
        .expect("valid phone regex")
});

static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[a-zA-Z0-9-]+")
        .expect("valid linkedin regex")
});

/// Allow-list of hosting platforms. Personal domains are never reported.
static PORTFOLIO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:https?://)?(?:www\.)?(?:portfolio|github|behance)\.(?:com|io|org)/[a-zA-Z0-9\-._\~:/?\#\[\]@!$\&'()*+,;=]+",
    )
    .expect("valid portfolio regex")
});

fn first_match<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.find(text).map(|m| m.as_str())
}

pub fn find_email(text: &str) -> Option<&str> {
    first_match(&EMAIL_RE, text)
}

pub fn find_phone(text: &str) -> Option<&str> {
    first_match(&PHONE_RE, text)
}

pub fn find_linkedin(text: &str) -> Option<&str> {
    first_match(&LINKEDIN_RE, text)
}

pub fn find_portfolio(text: &str) -> Option<&str> {
    first_match(&PORTFOLIO_RE, text)
}
