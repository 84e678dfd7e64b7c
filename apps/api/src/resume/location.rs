//! Location detector: US-biased "City, ST" recognition.
//!
//! Three patterns are tried in priority order over the whitespace-collapsed text:
//!
//! 1. `City, ST 12345[-6789]`
//! 2. `City, ST`
//! 3. `City, State Name`
//!
//! Within a pattern every candidate is checked in document order; a candidate is
//! discarded when its two-letter code is not a USPS code (patterns 1 and 2) or when
//! the city token is a resume section header. The first surviving candidate wins and
//! is rendered as `"City, State"` with any ZIP dropped.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// The 50 states plus DC.
pub const US_STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// Section headers that look like a capitalised city in front of a comma.
pub const CITY_DENYLIST: &[&str] = &[
    "dear",
    "phone",
    "email",
    "address",
    "linkedin",
    "summary",
    "objective",
    "experience",
    "education",
    "skills",
];

/// Which of the three location shapes produced a match, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPattern {
    CityStateZip,
    CityState,
    CityStateName,
}

impl LocationPattern {
    pub const PRIORITY: [LocationPattern; 3] = [
        LocationPattern::CityStateZip,
        LocationPattern::CityState,
        LocationPattern::CityStateName,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            LocationPattern::CityStateZip => &*CITY_STATE_ZIP_RE,
            LocationPattern::CityState => &*CITY_STATE_RE,
            LocationPattern::CityStateName => &*CITY_STATE_NAME_RE,
        }
    }

    fn requires_state_code(self) -> bool {
        !matches!(self, LocationPattern::CityStateName)
    }
}

static CITY_STATE_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?-u:\b)([A-Z][a-z]+(?:\s[A-Z][a-z]+)*),\s*([A-Z]{2})\s+[0-9]{5}(?:-[0-9]{4})?(?-u:\b)",
    )
    .expect("valid city/state/zip regex")
});

static CITY_STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)([A-Z][a-z]+(?:\s[A-Z][a-z]+)*),\s*([A-Z]{2})(?-u:\b)")
        .expect("valid city/state regex")
});

static CITY_STATE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?-u:\b)([A-Z][a-z]+(?:\s[A-Z][a-z]+)*),\s*([A-Z][a-z]+(?:\s[A-Z][a-z]+)*)(?-u:\b)",
    )
    .expect("valid city/state-name regex")
});

/// A validated location candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLocation {
    pub value: String,
    pub pattern: LocationPattern,
}

pub fn is_us_state_code(code: &str) -> bool {
    US_STATE_CODES.contains(&code)
}

fn is_denylisted_city(city: &str) -> bool {
    CITY_DENYLIST
        .iter()
        .any(|word| city.eq_ignore_ascii_case(word))
}

/// Finds the highest-priority valid location in `text`.
///
/// `text` is expected to be whitespace-collapsed already.
pub fn find_location(text: &str) -> Option<DetectedLocation> {
    if text.is_empty() {
        return None;
    }

    for pattern in LocationPattern::PRIORITY {
        for caps in pattern.regex().captures_iter(text) {
            let (Some(city), Some(state)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let city = city.as_str().trim();
            let state = state.as_str().trim();

            if pattern.requires_state_code() && !is_us_state_code(state) {
                continue;
            }
            if is_denylisted_city(city) {
                continue;
            }

            return Some(DetectedLocation {
                value: format!("{city}, {state}"),
                pattern,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_code_table_has_fifty_one_entries() {
        assert_eq!(US_STATE_CODES.len(), 51);
        assert!(is_us_state_code("DC"));
        assert!(!is_us_state_code("PR"));
    }

    #[test]
    fn test_city_state_zip_drops_zip() {
        let loc = find_location("Austin, TX 78701").unwrap();
        assert_eq!(loc.value, "Austin, TX");
        assert_eq!(loc.pattern, LocationPattern::CityStateZip);
    }

    #[test]
    fn test_zip_plus_four() {
        let loc = find_location("Based in New York, NY 10001-2345 since 2019").unwrap();
        assert_eq!(loc.value, "New York, NY");
        assert_eq!(loc.pattern, LocationPattern::CityStateZip);
    }

    #[test]
    fn test_invalid_state_code_rejected() {
        assert_eq!(find_location("Roam, ZZ 90210"), None);
    }

    #[test]
    fn test_denylisted_city_rejected() {
        assert_eq!(find_location("Education, NY"), None);
        assert_eq!(find_location("SKILLS, CA"), None);
    }

    #[test]
    fn test_denylist_skips_to_next_candidate() {
        let loc = find_location("Summary, CA builder of things. Portland, OR").unwrap();
        assert_eq!(loc.value, "Portland, OR");
        assert_eq!(loc.pattern, LocationPattern::CityState);
    }

    #[test]
    fn test_zip_pattern_preferred_over_earlier_bare_state() {
        let text = "Remote from Denver, CO or onsite at Seattle, WA 98101";
        let loc = find_location(text).unwrap();
        assert_eq!(loc.value, "Seattle, WA");
        assert_eq!(loc.pattern, LocationPattern::CityStateZip);
    }

    #[test]
    fn test_zip_pattern_preferred_over_state_name() {
        let text = "Raised in Austin, Texas and now living in Boston, MA 02108";
        let loc = find_location(text).unwrap();
        assert_eq!(loc.value, "Boston, MA");
    }

    #[test]
    fn test_state_name_fallback() {
        let loc = find_location("Lives in Sacramento, California").unwrap();
        assert_eq!(loc.value, "Sacramento, California");
        assert_eq!(loc.pattern, LocationPattern::CityStateName);
    }

    #[test]
    fn test_multi_word_city() {
        let loc = find_location("San Luis Obispo, CA").unwrap();
        assert_eq!(loc.value, "San Luis Obispo, CA");
    }

    #[test]
    fn test_invalid_zip_state_falls_through_to_valid_bare_state() {
        let loc = find_location("Roam, ZZ 90210 then Miami, FL").unwrap();
        assert_eq!(loc.value, "Miami, FL");
        assert_eq!(loc.pattern, LocationPattern::CityState);
    }

    #[test]
    fn test_location_next_to_non_ascii_text() {
        let loc = find_location("地址Austin, TX 78701号").unwrap();
        assert_eq!(loc.value, "Austin, TX");
        assert_eq!(loc.pattern, LocationPattern::CityStateZip);
    }

    #[test]
    fn test_empty_and_lowercase_text() {
        assert_eq!(find_location(""), None);
        assert_eq!(find_location("austin, tx 78701"), None);
    }
}
