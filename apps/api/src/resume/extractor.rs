//! Resume field extraction: turns decoded resume text into an `ExtractedData` record.
//!
//! Pure and infallible: a field that cannot be found is simply absent. Six
//! independent detectors run over the same input; none depends on another's result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::resume::location::find_location;
use crate::resume::name::find_name;
use crate::resume::patterns::{find_email, find_linkedin, find_phone, find_portfolio};

/// Contact details recovered from a resume.
///
/// Absent fields are skipped on serialization, so "not found" is never sent as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    pub raw_text: String,
}

impl ExtractedData {
    /// Wire names of the fields that were found, in declaration order.
    pub fn found_fields(&self) -> Vec<&'static str> {
        [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("location", &self.location),
            ("linkedIn", &self.linked_in),
            ("portfolio", &self.portfolio),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_some())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Collapses every whitespace run (newlines included) to one space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts contact fields from plain resume text.
pub fn extract_data_from_text(text: &str) -> ExtractedData {
    let collapsed = normalize_whitespace(text);
    let first_line = text.lines().find(|line| !line.trim().is_empty());

    let name = find_name(text, first_line);
    let location = find_location(&collapsed);

    if let Some(name) = &name {
        debug!(rule = ?name.rule, "name detected");
    }
    if let Some(location) = &location {
        debug!(pattern = ?location.pattern, "location detected");
    }

    let data = ExtractedData {
        full_name: name.map(|n| n.value.to_string()),
        email: find_email(&collapsed).map(String::from),
        phone: find_phone(&collapsed).map(String::from),
        location: location.map(|l| l.value),
        linked_in: find_linkedin(&collapsed).map(String::from),
        portfolio: find_portfolio(&collapsed).map(String::from),
        raw_text: text.to_string(),
    };

    debug!(
        chars = text.chars().count(),
        found = ?data.found_fields(),
        "resume text extracted"
    );

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    const JANE: &str = "Jane Doe\njanedoe@email.com\n(415) 555-0199\nSan Francisco, CA 94102\nlinkedin.com/in/janedoe";

    #[test]
    fn test_end_to_end_example() {
        let data = extract_data_from_text(JANE);
        assert_eq!(data.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(data.email.as_deref(), Some("janedoe@email.com"));
        assert_eq!(data.phone.as_deref(), Some("(415) 555-0199"));
        assert_eq!(data.location.as_deref(), Some("San Francisco, CA"));
        assert_eq!(data.linked_in.as_deref(), Some("linkedin.com/in/janedoe"));
        assert_eq!(data.portfolio, None);
        assert_eq!(data.raw_text, JANE);
    }

    #[test]
    fn test_empty_input_yields_all_absent() {
        let data = extract_data_from_text("");
        assert_eq!(data, ExtractedData::default());
        assert!(data.found_fields().is_empty());
    }

    #[test]
    fn test_whitespace_only_input() {
        let data = extract_data_from_text(" \n\t \r\n ");
        assert!(data.found_fields().is_empty());
        assert_eq!(data.raw_text, " \n\t \r\n ");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(extract_data_from_text(JANE), extract_data_from_text(JANE));
    }

    #[test]
    fn test_fields_are_substrings_of_normalized_text() {
        let text = "Alex   Kim\n\nEmail: alex.kim@example.io\nPhone:\n+1 (646) 555-0101\nBrooklyn, NY 11201\nhttps://github.com/alexkim\nwww.linkedin.com/in/alex-kim";
        let data = extract_data_from_text(text);
        let collapsed = normalize_whitespace(text);
        for value in [
            &data.email,
            &data.phone,
            &data.linked_in,
            &data.portfolio,
        ]
        .into_iter()
        .flatten()
        {
            assert!(collapsed.contains(value.as_str()), "{value} not in text");
        }
        assert_eq!(data.phone.as_deref(), Some("+1 (646) 555-0101"));
        assert_eq!(data.portfolio.as_deref(), Some("https://github.com/alexkim"));

        // name comes from the line-preserving text
        let name = data.full_name.as_deref().unwrap();
        assert_eq!(name, "Alex   Kim");
        assert!(text.contains(name));

        // location is a "City, ST" span of the collapsed text with the ZIP dropped
        let location = data.location.as_deref().unwrap();
        assert_eq!(location, "Brooklyn, NY");
        assert!(collapsed.contains(&format!("{location} 11201")));
        assert!(!location.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_phone_split_across_lines_is_found() {
        let data = extract_data_from_text("call\n415\n555\n0199");
        assert_eq!(data.phone.as_deref(), Some("415 555 0199"));
    }

    #[test]
    fn test_denylisted_location_not_reported() {
        let data = extract_data_from_text("Education, NY");
        assert_eq!(data.location, None);
    }

    #[test]
    fn test_state_code_validation() {
        assert_eq!(extract_data_from_text("Roam, ZZ 90210").location, None);
        assert_eq!(
            extract_data_from_text("Austin, TX 78701").location.as_deref(),
            Some("Austin, TX")
        );
    }

    #[test]
    fn test_portfolio_allow_list() {
        assert_eq!(
            extract_data_from_text("Visit janedoe.design for my work").portfolio,
            None
        );
        assert_eq!(
            extract_data_from_text("github.com/janedoe")
                .portfolio
                .as_deref(),
            Some("github.com/janedoe")
        );
    }

    #[test]
    fn test_first_line_fallback_name() {
        let data = extract_data_from_text("\n  Alex K  \nalex@example.com");
        assert_eq!(data.full_name.as_deref(), Some("Alex K"));
    }

    #[test]
    fn test_first_line_two_word_name() {
        let data = extract_data_from_text("Alex Kim\nalex@example.com");
        assert_eq!(data.full_name.as_deref(), Some("Alex Kim"));
    }

    #[test]
    fn test_found_fields_order() {
        let data = extract_data_from_text(JANE);
        assert_eq!(
            data.found_fields(),
            vec!["fullName", "email", "phone", "location", "linkedIn"]
        );
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let data = extract_data_from_text("jane@example.com");
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["email"], "jane@example.com");
        assert_eq!(json["rawText"], "jane@example.com");
        assert!(json.get("fullName").is_none());
        assert!(json.get("linkedIn").is_none());
        assert!(json.get("portfolio").is_none());
    }
}
